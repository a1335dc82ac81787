//! Network endpoints and client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use ob_types::env_utils::{env_string, env_var_or};

const MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";
const LOCALNET_RPC: &str = "http://127.0.0.1:9000";

/// Default request timeout in seconds (can be overridden by env).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout in seconds (can be overridden by env).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A named Sui network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_RPC,
            Network::Testnet => TESTNET_RPC,
            Network::Devnet => DEVNET_RPC,
            Network::Localnet => LOCALNET_RPC,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "localnet" | "local" => Ok(Network::Localnet),
            other => Err(anyhow!("unknown network '{}'", other)),
        }
    }
}

/// Endpoint and timeouts for a [`JsonRpcClient`](crate::JsonRpcClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RpcConfig {
    /// Configuration for a named network with default timeouts.
    pub fn for_network(network: Network) -> Self {
        Self::with_endpoint(network.rpc_url())
    }

    /// Configuration for an explicit endpoint with default timeouts.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from the environment.
    ///
    /// - `SUI_RPC_URL` - endpoint (default: mainnet fullnode)
    /// - `SUI_RPC_TIMEOUT_SECS` - request timeout (default: 30)
    /// - `SUI_RPC_CONNECT_TIMEOUT_SECS` - connect timeout (default: 10)
    pub fn from_env() -> Self {
        let endpoint = env_string("SUI_RPC_URL").unwrap_or_else(|| MAINNET_RPC.to_string());
        Self {
            endpoint,
            timeout: Duration::from_secs(env_var_or("SUI_RPC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            connect_timeout: Duration::from_secs(env_var_or(
                "SUI_RPC_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}
