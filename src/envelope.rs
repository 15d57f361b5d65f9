use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// One matched entity in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    /// Always empty; part of the fixed result shape.
    pub text: String,
    pub metadata: Map<String, Value>,
}

/// Top-level shape returned by every `search` call. `ids` is always
/// present; `error` only when the upstream call itself failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub ids: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    pub fn new(ids: Vec<SearchResult>) -> Self {
        Self { ids, error: None }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failure(err: &ClientError) -> Self {
        Self {
            ids: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// Top-level shape returned by every `fetch` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoEnvelope {
    pub info: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InfoEnvelope {
    pub fn new(info: Map<String, Value>) -> Self {
        Self { info, error: None }
    }

    pub fn empty() -> Self {
        Self::new(Map::new())
    }

    pub fn failure(err: &ClientError) -> Self {
        Self {
            info: Map::new(),
            error: Some(err.to_string()),
        }
    }
}
