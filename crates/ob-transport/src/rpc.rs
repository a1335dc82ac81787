//! JSON-RPC client for Sui fullnodes.
//!
//! Only the object lookup is implemented; it is all the struct classes need
//! for `fetch`.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use tracing::debug;

use crate::network::{Network, RpcConfig};
use crate::types::{ObjectDataOptions, ObjectResponse};

/// Blocking JSON-RPC client.
#[derive(Clone)]
pub struct JsonRpcClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl JsonRpcClient {
    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client for mainnet.
    pub fn mainnet() -> Self {
        Self::from_config(&RpcConfig::for_network(Network::Mainnet))
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::from_config(&RpcConfig::for_network(Network::Testnet))
    }

    /// Create a client with a custom endpoint and default timeouts.
    pub fn new(endpoint: &str) -> Self {
        Self::from_config(&RpcConfig::with_endpoint(endpoint))
    }

    /// Create a client configured from `SUI_RPC_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_config(&RpcConfig::from_env())
    }

    pub fn from_config(config: &RpcConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            agent: Self::build_agent(config.timeout, config.connect_timeout),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a JSON-RPC call and return its `result` member.
    fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!(endpoint = %self.endpoint, method, "json-rpc request");

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("JSON-RPC request failed: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse JSON-RPC response: {}", e))?;

        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(anyhow!("JSON-RPC error from {}: {}", method, msg));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("No result in JSON-RPC response"))
    }

    /// Fetch a single object (`sui_getObject`).
    ///
    /// Per-object failures (deleted, not found) come back inside
    /// [`ObjectResponse::error`]; only transport failures are `Err`.
    pub fn get_object(&self, object_id: &str, options: &ObjectDataOptions) -> Result<ObjectResponse> {
        let result = self.call("sui_getObject", json!([object_id, options]))?;
        serde_json::from_value(result)
            .with_context(|| format!("Unexpected sui_getObject response for {}", object_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JsonRpcClient::mainnet();
        assert!(client.endpoint().contains("mainnet"));
        let custom = JsonRpcClient::new("http://127.0.0.1:9000");
        assert_eq!(custom.endpoint(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_unreachable_endpoint_is_error() {
        let config = RpcConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_millis(500),
            connect_timeout: Duration::from_millis(500),
        };
        let client = JsonRpcClient::from_config(&config);
        assert!(client.get_object("0x5", &ObjectDataOptions::bcs()).is_err());
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_fetch_clock_object() {
        let client = JsonRpcClient::mainnet();
        let resp = client.get_object("0x6", &ObjectDataOptions::bcs()).unwrap();
        assert!(resp.data.is_some());
    }
}
