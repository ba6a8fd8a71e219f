use serde::{Deserialize, Serialize};

/// A single property listing as returned by the properties API.
///
/// All descriptive fields are display strings straight from the listing
/// source (e.g. price "€350,000", bedrooms "3 Bed"); the client never
/// parses them back into numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Server-assigned identifier. Older API versions emit `_id`,
    /// newer ones `id`; both deserialize here. May be absent entirely.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub address: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub bedrooms: String,
    #[serde(default)]
    pub bathrooms: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Link to the original listing page, when the source provided one.
    #[serde(default)]
    pub link: Option<String>,
    /// Street-view or map link, when the source provided one.
    #[serde(default)]
    pub map_link: Option<String>,
}

impl Property {
    /// Effective identifier: the server id when present, otherwise a
    /// slug derived from the address ("12 Main Street" -> "12-main-street").
    pub fn identifier(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => address_slug(&self.address),
        }
    }
}

/// Lower-cases an address and collapses whitespace runs into single
/// hyphens, yielding a stable identifier for listings without one.
pub fn address_slug(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// One page of results from `GET /api/properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyPage {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_property(address: &str) -> Property {
        Property {
            id: None,
            address: address.to_string(),
            price: String::new(),
            bedrooms: String::new(),
            bathrooms: String::new(),
            area: String::new(),
            property_type: String::new(),
            description: String::new(),
            features: vec![],
            link: None,
            map_link: None,
        }
    }

    #[test]
    fn identifier_falls_back_to_address_slug() {
        let property = bare_property("12 Main Street");
        assert_eq!(property.identifier(), "12-main-street");
    }

    #[test]
    fn identifier_prefers_server_id() {
        let mut property = bare_property("12 Main Street");
        property.id = Some("abc123".to_string());
        assert_eq!(property.identifier(), "abc123");
    }

    #[test]
    fn empty_server_id_still_slugs() {
        let mut property = bare_property("4  Oak   Road");
        property.id = Some(String::new());
        assert_eq!(property.identifier(), "4-oak-road");
    }

    #[test]
    fn deserializes_mongo_style_id() {
        let raw = r#"{"_id": "65afc", "address": "1 Quay", "price": "€200,000"}"#;
        let property: Property = serde_json::from_str(raw).unwrap();
        assert_eq!(property.id.as_deref(), Some("65afc"));
        assert_eq!(property.price, "€200,000");
    }

    #[test]
    fn page_tolerates_missing_fields() {
        let page: PropertyPage = serde_json::from_str(r#"{"total": 3}"#).unwrap();
        assert!(page.properties.is_empty());
        assert_eq!(page.total, 3);

        let page: PropertyPage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.total, 0);
    }
}
