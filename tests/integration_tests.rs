use serde_json::json;
use solana_defi_mcp::client::{ShyftClient, SolflareClient};
use solana_defi_mcp::tools::pools::{FetchPoolTool, SearchPoolsTool};
use solana_defi_mcp::tools::tokens::{FetchTokenTool, SearchTokensTool};
use solana_defi_mcp::tools::Tool;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn shyft_client(server: &MockServer) -> ShyftClient {
    ShyftClient::new(&server.uri(), "test-key").expect("Failed to create Shyft client")
}

async fn solflare_client(server: &MockServer) -> SolflareClient {
    SolflareClient::new(&server.uri()).expect("Failed to create Solflare client")
}

#[tokio::test]
async fn search_pools_normalizes_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/pools/get_by_token"))
        .and(query_param(
            "token",
            "So11111111111111111111111111111111111111112",
        ))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "10"))
        .and(header("accept", "application/json"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "dexes": {
                    "raydium": { "pools": [{ "pubkey": "ABC", "x": 1 }] },
                    "openbookV2": { "pools": [{ "pubkey": "DEF" }] },
                    "fluxbeam": { "pools": [{ "pubkey": "GHI" }] }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = shyft_client(&server).await;
    let result = SearchPoolsTool
        .call(
            &client,
            json!({ "query": "So11111111111111111111111111111111111111112" }),
        )
        .await
        .unwrap();
    println!("Pool search result: {}", result);

    assert_eq!(
        result,
        json!({
            "ids": [{
                "id": "ABC",
                "title": "raydium ABC",
                "text": "",
                "metadata": { "dex": "raydium", "pubkey": "ABC", "x": 1 }
            }]
        })
    );
}

#[tokio::test]
async fn search_pools_http_error_yields_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/pools/get_by_token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = shyft_client(&server).await;
    let result = SearchPoolsTool
        .call(&client, json!({ "query": "So1" }))
        .await
        .unwrap();

    assert_eq!(result["ids"], json!([]));
    let error = result["error"].as_str().unwrap();
    assert!(error.contains("500"), "unexpected error message: {error}");
}

#[tokio::test]
async fn search_pools_non_json_body_yields_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/pools/get_by_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = shyft_client(&server).await;
    let result = SearchPoolsTool
        .call(&client, json!({ "query": "So1" }))
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({ "ids": [], "error": "Invalid JSON response" })
    );
}

#[tokio::test]
async fn search_pools_unexpected_shape_is_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/pools/get_by_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "no data" })))
        .mount(&server)
        .await;

    let client = shyft_client(&server).await;
    let result = SearchPoolsTool
        .call(&client, json!({ "query": "So1" }))
        .await
        .unwrap();

    assert_eq!(result, json!({ "ids": [] }));
    assert!(result.get("error").is_none());
}

#[tokio::test]
async fn search_pools_missing_query_is_an_error() {
    let server = MockServer::start().await;
    let client = shyft_client(&server).await;

    let result = SearchPoolsTool.call(&client, json!({})).await;
    assert!(result.is_err(), "Expected error for missing query argument");
}

#[tokio::test]
async fn fetch_pool_flattens_liquidity_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/pools/get_liquidity_details"))
        .and(query_param("address", "POOL"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "address": "POOL",
                "dex": "raydium",
                "liquidity": {
                    "tokenA": { "mint": "M1", "amount": 10 },
                    "tokenB": { "mint": "M2", "amount": 20 }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = shyft_client(&server).await;
    let result = FetchPoolTool
        .call(&client, json!({ "id": "POOL" }))
        .await
        .unwrap();
    println!("Pool fetch result: {}", result);

    assert_eq!(
        result,
        json!({
            "info": {
                "address": "POOL",
                "dex": "raydium",
                "tokenA": { "mint": "M1", "amount": 10 },
                "tokenB": { "mint": "M2", "amount": 20 }
            }
        })
    );
}

#[tokio::test]
async fn fetch_pool_http_error_yields_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/pools/get_liquidity_details"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = shyft_client(&server).await;
    let result = FetchPoolTool
        .call(&client, json!({ "id": "POOL" }))
        .await
        .unwrap();

    assert_eq!(result["info"], json!({}));
    assert!(result["error"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn search_tokens_projects_mints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "bonk"))
        .and(query_param("chainId", "101"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "20"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "address": "M1", "name": "Bonk", "symbol": "BONK", "decimals": 5 }
            ]
        })))
        .mount(&server)
        .await;

    let client = solflare_client(&server).await;
    let result = SearchTokensTool
        .call(&client, json!({ "query": "bonk" }))
        .await
        .unwrap();
    println!("Token search result: {}", result);

    assert_eq!(
        result,
        json!({
            "ids": [{
                "id": "M1",
                "title": "Bonk M1",
                "text": "",
                "metadata": { "address": "M1", "name": "Bonk", "symbol": "BONK", "decimals": 5 }
            }]
        })
    );
}

#[tokio::test]
async fn fetch_token_posts_single_address_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mints"))
        .and(query_param("chainId", "101"))
        .and(body_json(json!({ "addresses": ["M1"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "address": "M1",
                "name": "Bonk",
                "symbol": "BONK",
                "decimals": 5,
                "logoURI": "https://example.com/bonk.png",
                "verified": true
            }]
        })))
        .mount(&server)
        .await;

    let client = solflare_client(&server).await;
    let result = FetchTokenTool
        .call(&client, json!({ "id": "M1" }))
        .await
        .unwrap();
    println!("Token fetch result: {}", result);

    assert_eq!(
        result,
        json!({
            "info": {
                "address": "M1",
                "name": "Bonk",
                "symbol": "BONK",
                "decimals": 5,
                "logoURI": "https://example.com/bonk.png"
            }
        })
    );
}

#[tokio::test]
async fn fetch_token_empty_content_is_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let client = solflare_client(&server).await;
    let result = FetchTokenTool
        .call(&client, json!({ "id": "M1" }))
        .await
        .unwrap();

    assert_eq!(result, json!({ "info": {} }));
    assert!(result.get("error").is_none());
}

#[tokio::test]
async fn fetch_token_transport_failure_yields_error_envelope() {
    // No server at this address; the connection itself fails.
    let client = SolflareClient::new("http://127.0.0.1:1").unwrap();
    let result = FetchTokenTool
        .call(&client, json!({ "id": "M1" }))
        .await
        .unwrap();

    assert_eq!(result["info"], json!({}));
    assert!(!result["error"].as_str().unwrap().is_empty());
}
