use crate::api::{ListQuery, PropertySource};
use crate::models::{Property, PropertyPage};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Message shown when a listing fetch fails; the previous page stays
/// on screen.
pub const FETCH_ERROR: &str = "Error fetching properties. Please try again.";

/// Client-side listing state: current page, search term, and the last
/// successfully fetched page of results.
///
/// Every fetch is tagged with the query it was issued for and the
/// response is dropped if that query no longer matches the current
/// state, so a late reply can never overwrite a newer one.
#[derive(Debug)]
pub struct ListState {
    page: u32,
    page_size: u32,
    search_term: String,
    properties: Vec<Property>,
    total_pages: u32,
    fetched_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search_term: String::new(),
            properties: Vec::new(),
            total_pages: 0,
            fetched_at: None,
            error: None,
        }
    }

    /// The query a fetch issued right now would carry.
    pub fn current_query(&self) -> ListQuery {
        ListQuery::new(self.page, self.page_size, self.search_term.clone())
    }

    /// Replace the search term and reset to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Move to a page, clamped to the known valid range. The term is
    /// untouched.
    pub fn set_page(&mut self, page: u32) {
        let upper = self.total_pages.max(1);
        self.page = page.clamp(1, upper);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Issue one fetch for the current query. A failure keeps the
    /// previous results and records a user-visible message; there is
    /// no retry.
    pub async fn refresh(&mut self, source: &dyn PropertySource) {
        let query = self.current_query();
        match source.fetch_page(&query).await {
            Ok(page) => {
                self.apply(query, page);
            }
            Err(e) => {
                warn!("Fetch from {} failed: {:#}", source.source_name(), e);
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
    }

    /// Apply a fetched page if it still answers the current query.
    /// Returns false when the response is stale and was discarded.
    pub fn apply(&mut self, issued_for: ListQuery, page: PropertyPage) -> bool {
        if issued_for != self.current_query() {
            debug!(
                "Discarding stale response for page {} term {:?}",
                issued_for.page, issued_for.search_term
            );
            return false;
        }

        self.total_pages = total_pages(page.total, self.page_size);
        self.properties = page.properties;
        self.fetched_at = Some(Utc::now());
        self.error = None;
        true
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// ceil(total / page_size); zero matches yield zero pages, which in
/// turn suppresses the pagination window.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as u64;
    ((total + page_size - 1) / page_size) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PropertySource;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubSource {
        responses: Mutex<Vec<Result<PropertyPage>>>,
        queries: Mutex<Vec<ListQuery>>,
    }

    impl StubSource {
        fn new(responses: Vec<Result<PropertyPage>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn seen_queries(&self) -> Vec<ListQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PropertySource for StubSource {
        async fn fetch_page(&self, query: &ListQuery) -> Result<PropertyPage> {
            self.queries.lock().unwrap().push(query.clone());
            self.responses.lock().unwrap().remove(0)
        }

        fn source_name(&self) -> &'static str {
            "stub"
        }
    }

    fn page_of(addresses: &[&str], total: u64) -> PropertyPage {
        let properties = addresses
            .iter()
            .map(|a| json!({ "address": a }))
            .collect::<Vec<_>>();
        serde_json::from_value(json!({ "properties": properties, "total": total })).unwrap()
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(100, 12), 9);
    }

    #[test]
    fn new_search_term_resets_page() {
        let mut state = ListState::new(12);
        state.apply(state.current_query(), page_of(&[], 60));
        state.set_page(4);
        state.set_search_term("house dublin");
        assert_eq!(state.page(), 1);
        assert_eq!(state.search_term(), "house dublin");
    }

    #[test]
    fn page_change_keeps_term() {
        let mut state = ListState::new(12);
        state.set_search_term("cork");
        state.apply(state.current_query(), page_of(&[], 60));
        state.next_page();
        assert_eq!(state.page(), 2);
        assert_eq!(state.search_term(), "cork");
    }

    #[test]
    fn page_is_clamped_to_known_range() {
        let mut state = ListState::new(12);
        state.apply(state.current_query(), page_of(&[], 30));
        assert_eq!(state.total_pages(), 3);
        state.set_page(99);
        assert_eq!(state.page(), 3);
        state.prev_page();
        state.prev_page();
        state.prev_page();
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = ListState::new(12);
        let stale_query = state.current_query();
        state.set_search_term("galway");

        assert!(!state.apply(stale_query, page_of(&["1 Old Road"], 1)));
        assert!(state.properties().is_empty());

        assert!(state.apply(state.current_query(), page_of(&["2 New Road"], 1)));
        assert_eq!(state.properties()[0].address, "2 New Road");
    }

    #[tokio::test]
    async fn refresh_replaces_results() {
        let source = StubSource::new(vec![Ok(page_of(&["12 Main Street"], 25))]);
        let mut state = ListState::new(12);
        state.refresh(&source).await;

        assert_eq!(state.properties().len(), 1);
        assert_eq!(state.total_pages(), 3);
        assert!(state.error().is_none());
        assert!(state.fetched_at().is_some());
        assert_eq!(source.seen_queries()[0], ListQuery::new(1, 12, ""));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_display() {
        let source = StubSource::new(vec![
            Ok(page_of(&["12 Main Street"], 1)),
            Err(anyhow::anyhow!("connection refused")),
        ]);
        let mut state = ListState::new(12);
        state.refresh(&source).await;
        state.refresh(&source).await;

        assert_eq!(state.properties().len(), 1);
        assert_eq!(state.error(), Some(FETCH_ERROR));
    }

    #[tokio::test]
    async fn refined_term_requeries_from_page_one() {
        let source = StubSource::new(vec![
            Ok(page_of(&[], 60)),
            Ok(page_of(&[], 60)),
            Ok(page_of(&["3 Bed House"], 5)),
        ]);
        let mut state = ListState::new(12);
        state.refresh(&source).await;
        state.set_page(3);
        state.refresh(&source).await;

        state.set_search_term("3 bed house dublin");
        state.refresh(&source).await;

        let queries = source.seen_queries();
        assert_eq!(queries[2].page, 1);
        assert_eq!(queries[2].search_term, "3 bed house dublin");
        assert_eq!(state.search_term(), "3 bed house dublin");
    }
}
