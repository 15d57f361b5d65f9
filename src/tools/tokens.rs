use super::{required_str, Tool};
use crate::client::SolflareClient;
use crate::envelope::{InfoEnvelope, SearchEnvelope};
use crate::normalize;
use anyhow::Result;
use serde_json::{json, Value};
use tracing::{error, info};

/// The tokens provider's tool set, in registration order.
pub fn all() -> Vec<Box<dyn Tool<SolflareClient>>> {
    vec![Box::new(SearchTokensTool), Box::new(FetchTokenTool)]
}

pub struct SearchTokensTool;

#[async_trait::async_trait]
impl Tool<SolflareClient> for SearchTokensTool {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        "Searches for Solana token by name or symbol. Returns a list of tokens with metadata."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Token name or symbol to search for"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, client: &SolflareClient, args: Value) -> Result<Value> {
        let query = required_str(&args, "query")?;
        info!("Searching for tokens matching: {query}");

        let envelope = match client
            .get(
                "/search",
                &[
                    ("query", query.as_str()),
                    ("chainId", "101"),
                    ("start", "0"),
                    ("limit", "20"),
                ],
            )
            .await
        {
            Ok(raw) => normalize::token_search(raw),
            Err(err) => {
                error!("Search error: {err}");
                SearchEnvelope::failure(&err)
            }
        };

        Ok(serde_json::to_value(envelope)?)
    }
}

pub struct FetchTokenTool;

#[async_trait::async_trait]
impl Tool<SolflareClient> for FetchTokenTool {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn description(&self) -> &'static str {
        "Returns the information for a given token."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Token mint address to fetch details for"
                }
            },
            "required": ["id"]
        })
    }

    async fn call(&self, client: &SolflareClient, args: Value) -> Result<Value> {
        let id = required_str(&args, "id")?;
        info!("Fetching information for token: {id}");

        let envelope = match client
            .post(
                "/mints",
                &[("chainId", "101")],
                &json!({ "addresses": [id] }),
            )
            .await
        {
            Ok(raw) => normalize::token_detail(raw),
            Err(err) => {
                error!("Fetch error: {err}");
                InfoEnvelope::failure(&err)
            }
        };

        Ok(serde_json::to_value(envelope)?)
    }
}
