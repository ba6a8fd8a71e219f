use serde::{Deserialize, Serialize};

/// Parameters for one page of the property listing query.
///
/// Also serves as the tag identifying which state a response belongs
/// to: a response is only applied if the query it answers still equals
/// the list state's current query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Fixed page size
    pub limit: u32,
    /// Free-text search term; empty means "all properties"
    pub search_term: String,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32, search_term: impl Into<String>) -> Self {
        Self {
            page,
            limit,
            search_term: search_term.into(),
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 12,
            search_term: String::new(),
        }
    }
}
