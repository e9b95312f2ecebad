use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One extracted listing record.
///
/// Every field is optional: the remote service returns whatever its XPath
/// rules matched, and the shape is deliberately not validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub booking_metadata: Option<String>,
    /// Link to the listing's detail page
    pub link: Option<String>,
    pub price: Option<String>,
    /// Image URL of the listing
    pub url: Option<String>,
    pub rating_word: Option<String>,
    /// Numeric rating, kept as the extracted text node
    pub rating: Option<String>,
    pub rating_count: Option<String>,
    /// Any extra fields the service attached to the record
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Parsed page content produced by the extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultContent {
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_listings: Option<Value>,
    /// Top-level scalar fields other than the listing collection
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// The first result object returned by the scraping service, kept verbatim.
///
/// The raw value is returned exactly as received; `content()` and the
/// accessors built on it are lenient typed views that yield nothing rather
/// than fail when the shape is unexpected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SearchResult {
    raw: Value,
}

impl SearchResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The untouched result object.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Typed view of the parsed page content, when present and well formed.
    pub fn content(&self) -> Option<ResultContent> {
        self.raw
            .get("content")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Extracted listings, empty when the content view is unavailable.
    pub fn listings(&self) -> Vec<Listing> {
        self.content().map(|c| c.listings).unwrap_or_default()
    }

    /// The scalar total-listings field, when the service extracted one.
    pub fn total_listings(&self) -> Option<String> {
        self.content()
            .and_then(|c| c.total_listings)
            .and_then(|v| v.as_str().map(str::to_string))
    }
}

/// Outcome of one search against the scraping service.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The service returned at least one result; this is the first one
    Found(SearchResult),
    /// The service answered, but its `results` array was absent or empty
    Empty,
    /// The request or response handling failed; the reason was also logged
    Failed(String),
}

impl FetchOutcome {
    /// Collapse to the lenient nullable shape: anything but `Found` is `None`.
    pub fn into_result(self) -> Option<SearchResult> {
        match self {
            FetchOutcome::Found(result) => Some(result),
            FetchOutcome::Empty | FetchOutcome::Failed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }
}
