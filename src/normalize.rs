//! Mapping from raw provider JSON to the canonical envelopes.
//!
//! Each normalizer parses the raw value once at the boundary into a typed
//! record with optional fields. An upstream shape that does not match
//! degrades to an empty success result with a warn log; it never becomes
//! an error envelope.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::envelope::{InfoEnvelope, SearchEnvelope, SearchResult};

/// Dexes dropped from pool search results; known-unreliable sources.
pub const EXCLUDED_DEXES: [&str; 2] = ["openbookV2", "fluxbeam"];

const TOKEN_DETAIL_FIELDS: [&str; 5] = ["address", "name", "symbol", "decimals", "logoURI"];

#[derive(Deserialize)]
struct PoolSearchResponse {
    result: Option<PoolSearchResult>,
}

#[derive(Deserialize)]
struct PoolSearchResult {
    dexes: Option<Map<String, Value>>,
}

#[derive(Deserialize, Default)]
struct DexPools {
    #[serde(default)]
    pools: Vec<Map<String, Value>>,
}

/// Normalizes a `get_by_token` pool search response.
pub fn pool_search(raw: Value) -> SearchEnvelope {
    let parsed: PoolSearchResponse = match serde_json::from_value(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Unexpected pool search structure: {err}");
            return SearchEnvelope::empty();
        }
    };
    let Some(dexes) = parsed.result.and_then(|result| result.dexes) else {
        warn!("Unexpected pool search structure: missing result.dexes");
        return SearchEnvelope::empty();
    };

    let mut ids = Vec::new();
    for (dex, entry) in dexes {
        if EXCLUDED_DEXES.contains(&dex.as_str()) {
            continue;
        }
        let entry: DexPools = match serde_json::from_value(entry) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping dex {dex}: unexpected pool list structure: {err}");
                continue;
            }
        };
        for pool in entry.pools {
            let pubkey = str_field(&pool, "pubkey");
            let mut metadata = Map::new();
            // A `dex` key inside the pool record wins over the injected one.
            metadata.insert("dex".into(), Value::String(dex.clone()));
            for (key, value) in pool {
                metadata.insert(key, value);
            }
            ids.push(SearchResult {
                id: pubkey.clone(),
                title: format!("{dex} {pubkey}"),
                text: String::new(),
                metadata,
            });
        }
    }
    SearchEnvelope::new(ids)
}

#[derive(Deserialize)]
struct TokenSearchResponse {
    content: Option<Vec<Map<String, Value>>>,
}

/// Normalizes a `/search` token list response.
pub fn token_search(raw: Value) -> SearchEnvelope {
    let parsed: TokenSearchResponse = match serde_json::from_value(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Unexpected token search structure: {err}");
            return SearchEnvelope::empty();
        }
    };
    let Some(content) = parsed.content else {
        warn!("Unexpected token search structure: missing content");
        return SearchEnvelope::empty();
    };

    let ids = content
        .into_iter()
        .map(|mint| {
            let address = str_field(&mint, "address");
            let name = str_field(&mint, "name");
            SearchResult {
                id: address.clone(),
                title: format!("{name} {address}"),
                text: String::new(),
                metadata: mint,
            }
        })
        .collect();
    SearchEnvelope::new(ids)
}

#[derive(Deserialize, Default)]
struct PoolDetailResponse {
    result: Option<PoolDetailResult>,
}

#[derive(Deserialize, Default)]
struct PoolDetailResult {
    address: Option<String>,
    dex: Option<String>,
    liquidity: Option<PoolLiquidity>,
}

#[derive(Deserialize, Default)]
struct PoolLiquidity {
    #[serde(rename = "tokenA")]
    token_a: Option<Map<String, Value>>,
    #[serde(rename = "tokenB")]
    token_b: Option<Map<String, Value>>,
}

/// Normalizes a `get_liquidity_details` response into the flat
/// `address, dex, tokenA, tokenB` record. All four keys are always
/// present; missing upstream pieces become null or the empty map.
pub fn pool_detail(raw: Value) -> InfoEnvelope {
    let parsed: PoolDetailResponse = serde_json::from_value(raw).unwrap_or_else(|err| {
        warn!("Unexpected liquidity detail structure: {err}");
        PoolDetailResponse::default()
    });
    let result = parsed.result.unwrap_or_default();
    let liquidity = result.liquidity.unwrap_or_default();

    let mut info = Map::new();
    info.insert("address".into(), opt_string(result.address));
    info.insert("dex".into(), opt_string(result.dex));
    info.insert(
        "tokenA".into(),
        Value::Object(liquidity.token_a.unwrap_or_default()),
    );
    info.insert(
        "tokenB".into(),
        Value::Object(liquidity.token_b.unwrap_or_default()),
    );
    InfoEnvelope::new(info)
}

#[derive(Deserialize)]
struct TokenDetailResponse {
    content: Option<Vec<Map<String, Value>>>,
}

/// Normalizes a `/mints` batch response. The request always carries a
/// single address, so only the first record is projected.
pub fn token_detail(raw: Value) -> InfoEnvelope {
    let parsed: TokenDetailResponse = match serde_json::from_value(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Unexpected mint detail structure: {err}");
            return InfoEnvelope::empty();
        }
    };
    let Some(mint) = parsed.content.unwrap_or_default().into_iter().next() else {
        warn!("Unexpected mint detail structure or empty content");
        return InfoEnvelope::empty();
    };

    let mut info = Map::new();
    for field in TOKEN_DETAIL_FIELDS {
        info.insert(
            field.into(),
            mint.get(field).cloned().unwrap_or(Value::Null),
        );
    }
    InfoEnvelope::new(info)
}

fn str_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn opt_string(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}
