//! Fundamentals (beta) models.
//!
//! Every fundamentals resource answers with a top-level array holding one
//! entry per requested symbol. The per-symbol `results` payloads vary by
//! resource and are kept as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One requested symbol's fundamentals result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalsResult {
    /// The symbol as requested
    pub request: String,
    /// Result type, normally "Symbol"
    #[serde(rename = "type")]
    pub result_type: String,
    /// Resource-specific result records
    #[serde(default)]
    pub results: Vec<Value>,
}

impl FundamentalsResult {
    /// Result records whose `type` field matches `kind` (e.g. "Company", "Stock").
    pub fn results_of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.results
            .iter()
            .filter(move |r| r.get("type").and_then(Value::as_str) == Some(kind))
    }
}
