pub mod pools;
pub mod tokens;

use serde_json::Value;

/// A callable MCP tool bound to a provider client of type `C`.
#[async_trait::async_trait]
pub trait Tool<C>: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> Value;
    async fn call(&self, client: &C, args: Value) -> anyhow::Result<Value>;
}

/// Extracts a required string argument. A missing or non-string argument
/// is a protocol-level failure, not a provider failure.
fn required_str(args: &Value, key: &str) -> anyhow::Result<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing '{key}' argument"))
}
