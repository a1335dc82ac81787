//! Sui Transport Layer
//!
//! Blocking JSON-RPC transport for the ledger queries the client library
//! needs: fetching a single object with its BCS bytes and parsed content.
//!
//! # Example
//!
//! ```ignore
//! use ob_transport::{JsonRpcClient, ObjectDataOptions};
//!
//! let client = JsonRpcClient::mainnet();
//! let resp = client.get_object("0x5", &ObjectDataOptions::bcs())?;
//! ```

pub mod network;
pub mod rpc;
pub mod types;

pub use network::{Network, RpcConfig};
pub use rpc::JsonRpcClient;
pub use types::{
    ObjectData, ObjectDataOptions, ObjectResponse, ObjectResponseError, RawData, RawMoveObject,
};
