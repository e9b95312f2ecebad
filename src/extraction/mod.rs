//! Declarative extraction rules forwarded to the scraping service.
//!
//! The service evaluates these XPath pipelines against the rendered page;
//! nothing here runs locally. The rules are versioned configuration data so
//! a markup change on the scraped site only needs a new rules file, not a
//! code change.

use crate::error::{FetchError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// One step of an extraction pipeline, e.g. `xpath_one` with its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineFn {
    #[serde(rename = "_fn")]
    pub name: String,
    #[serde(rename = "_args")]
    pub args: Vec<Value>,
}

/// Extraction rule for one output field: a pipeline of functions, plus
/// per-item sub-rules for collection fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(rename = "_fns")]
    pub fns: Vec<PipelineFn>,
    #[serde(rename = "_items", default, skip_serializing_if = "Option::is_none")]
    pub items: Option<IndexMap<String, FieldRule>>,
}

/// A versioned set of parsing instructions for the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSpec {
    pub version: u32,
    pub instructions: IndexMap<String, FieldRule>,
}

/// Rules shipped with the binary, targeting booking.com property cards.
const BUNDLED_RULES: &str = include_str!("../../config/parsing_instructions.json");

impl ExtractionSpec {
    /// The bundled rule set.
    pub fn bundled() -> Self {
        serde_json::from_str(BUNDLED_RULES).expect("bundled parsing instructions are valid JSON")
    }

    /// Load a rule set from an external JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!(
                "cannot read parsing instructions {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            FetchError::Config(format!(
                "invalid parsing instructions {}: {}",
                path.display(),
                e
            ))
        })
    }
}
