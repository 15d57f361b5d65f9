use super::{required_str, Tool};
use crate::client::ShyftClient;
use crate::envelope::{InfoEnvelope, SearchEnvelope};
use crate::normalize;
use anyhow::Result;
use serde_json::{json, Value};
use tracing::{error, info};

/// The pools provider's tool set, in registration order.
pub fn all() -> Vec<Box<dyn Tool<ShyftClient>>> {
    vec![Box::new(SearchPoolsTool), Box::new(FetchPoolTool)]
}

pub struct SearchPoolsTool;

#[async_trait::async_trait]
impl Tool<ShyftClient> for SearchPoolsTool {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        "Searches for Solana liquidity pools by token pubkey. Returns a list of pools with dex info & metadata."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Token public key to search for"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, client: &ShyftClient, args: Value) -> Result<Value> {
        let query = required_str(&args, "query")?;
        info!("Searching for pools with token: {query}");

        let envelope = match client
            .get(
                "/v0/pools/get_by_token",
                &[("token", query.as_str()), ("page", "1"), ("per_page", "10")],
            )
            .await
        {
            Ok(raw) => normalize::pool_search(raw),
            Err(err) => {
                error!("Search error: {err}");
                SearchEnvelope::failure(&err)
            }
        };

        Ok(serde_json::to_value(envelope)?)
    }
}

pub struct FetchPoolTool;

#[async_trait::async_trait]
impl Tool<ShyftClient> for FetchPoolTool {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn description(&self) -> &'static str {
        "Returns the amount of each token in the liquidity pool."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Pool address to fetch details for"
                }
            },
            "required": ["id"]
        })
    }

    async fn call(&self, client: &ShyftClient, args: Value) -> Result<Value> {
        let id = required_str(&args, "id")?;
        info!("Fetching information for pool: {id}");

        let envelope = match client
            .get("/v0/pools/get_liquidity_details", &[("address", id.as_str())])
            .await
        {
            Ok(raw) => normalize::pool_detail(raw),
            Err(err) => {
                error!("Fetch error: {err}");
                InfoEnvelope::failure(&err)
            }
        };

        Ok(serde_json::to_value(envelope)?)
    }
}
