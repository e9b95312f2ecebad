use crate::error::{FetchError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Field naming the page to scrape.
pub const URL_FIELD: &str = "url";
/// Display-only field, accepted but never forwarded to the target URL.
pub const LOCATION_FIELD: &str = "location";

/// Search parameters for a listing search.
///
/// An insertion-ordered mapping: the required `url` field names the page to
/// scrape, and every other string-valued field becomes a query parameter on
/// it, in the order the fields were added. Non-string values are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchParams {
    fields: IndexMap<String, Value>,
}

impl SearchParams {
    /// Create parameters targeting the given page URL.
    pub fn new(url: impl Into<String>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(URL_FIELD.to_string(), Value::String(url.into()));
        Self { fields }
    }

    /// Add a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn url(&self) -> Option<&str> {
        self.fields.get(URL_FIELD).and_then(Value::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.fields.get(LOCATION_FIELD).and_then(Value::as_str)
    }

    /// Build the final URL to scrape.
    ///
    /// Parses the `url` field, then appends every other string-valued field
    /// as a query pair in insertion order. `location` and non-string values
    /// are skipped.
    pub fn target_url(&self) -> Result<Url> {
        let raw = self
            .url()
            .ok_or_else(|| FetchError::InvalidUrl("missing url field".to_string()))?;
        let mut target =
            Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))?;

        for (key, value) in &self.fields {
            if key == URL_FIELD || key == LOCATION_FIELD {
                continue;
            }
            if let Value::String(s) = value {
                target.query_pairs_mut().append_pair(key, s);
            }
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_fields_become_query_params_in_order() {
        let params = SearchParams::new("https://example.com/search")
            .with("checkin", "2024-01-01")
            .with("checkout", "2024-01-05")
            .with("group_adults", "2");

        let target = params.target_url().unwrap();
        assert_eq!(
            target.as_str(),
            "https://example.com/search?checkin=2024-01-01&checkout=2024-01-05&group_adults=2"
        );
    }

    #[test]
    fn location_is_never_forwarded() {
        let params = SearchParams::new("https://example.com/search")
            .with("location", "Paris")
            .with("checkin", "2024-01-01");

        let target = params.target_url().unwrap();
        assert_eq!(target.as_str(), "https://example.com/search?checkin=2024-01-01");
    }

    #[test]
    fn non_string_values_are_dropped() {
        let params = SearchParams::new("https://example.com/search")
            .with("page", 3)
            .with("order", "price")
            .with("flexible", true);

        let target = params.target_url().unwrap();
        assert_eq!(target.as_str(), "https://example.com/search?order=price");
    }

    #[test]
    fn existing_query_params_are_kept() {
        let params =
            SearchParams::new("https://example.com/search?ss=Paris").with("checkin", "2024-01-01");

        let target = params.target_url().unwrap();
        assert_eq!(
            target.as_str(),
            "https://example.com/search?ss=Paris&checkin=2024-01-01"
        );
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = SearchParams::new("not a url").target_url().unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));

        let err = SearchParams::default().target_url().unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn deserialized_params_keep_document_order() {
        let params: SearchParams = serde_json::from_str(
            r#"{"url": "https://example.com/search", "b": "2", "a": "1"}"#,
        )
        .unwrap();

        let target = params.target_url().unwrap();
        assert_eq!(target.as_str(), "https://example.com/search?b=2&a=1");
    }
}
