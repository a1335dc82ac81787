//! ob-inspect: resolve, decode and fetch OriginByte Move types from the
//! command line.
//!
//! ```bash
//! # Canonical type name
//! ob-inspect type-name "0x02::coin::Coin<0x2::sui::SUI>"
//!
//! # Decode BCS bytes
//! ob-inspect decode --type 0x2::kiosk::KioskOwnerCap --bcs AAAA...
//!
//! # Fetch and decode an on-chain object
//! ob-inspect --network testnet fetch --type "0x2::coin::Coin<0x2::sui::SUI>" 0x5a...
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use ob_client::reified::codec::decode_bcs;
use ob_client::{default_loader, JsonRpcClient, Network, Reified};
use ob_transport::RpcConfig;
use ob_types::encoding::base64_decode;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ob-inspect",
    version,
    about = "Inspect OriginByte Move types and objects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC URL (overrides --network and SUI_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Named network: mainnet, testnet, devnet or localnet
    #[arg(long, global = true)]
    network: Option<Network>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical full name of a type
    TypeName {
        /// Move type string
        #[arg(value_name = "TYPE")]
        type_str: String,
    },

    /// Decode a value of a given type
    Decode(DecodeCmd),

    /// Fetch an object and decode its contents
    Fetch {
        /// Expected object type
        #[arg(long = "type", value_name = "TYPE")]
        type_str: String,

        /// Object id
        object_id: String,
    },
}

#[derive(Args)]
#[group(id = "input", required = true, multiple = false, args = ["bcs", "fields_with_types"])]
struct DecodeCmd {
    /// Type of the encoded value
    #[arg(long = "type", value_name = "TYPE")]
    type_str: String,

    /// Base64-encoded BCS bytes
    #[arg(long)]
    bcs: Option<String>,

    /// Typed-fields JSON as returned by `sui_getObject` content
    #[arg(long)]
    fields_with_types: Option<String>,
}

impl DecodeCmd {
    fn execute(&self) -> Result<Value> {
        let reified = default_loader().reified(&self.type_str)?;
        if let Some(b64) = &self.bcs {
            let bytes = base64_decode(b64, "--bcs")?;
            debug!(len = bytes.len(), "decoding bcs input");
            return Ok(match &reified {
                Reified::Struct(desc) => desc.from_bcs(&bytes)?.to_json(),
                other => decode_bcs(other, &bytes)?.to_json(),
            });
        }
        let raw = self
            .fields_with_types
            .as_deref()
            .ok_or_else(|| anyhow!("one of --bcs or --fields-with-types is required"))?;
        let item: Value =
            serde_json::from_str(raw).context("--fields-with-types is not valid JSON")?;
        match &reified {
            Reified::Struct(desc) => Ok(desc.from_fields_with_types(&item)?.to_json()),
            other => bail!(
                "--fields-with-types needs a struct type, got {}",
                other.full_type_name()
            ),
        }
    }
}

fn rpc_config(rpc_url: Option<&str>, network: Option<Network>) -> RpcConfig {
    match (rpc_url, network) {
        (Some(url), _) => RpcConfig::with_endpoint(url),
        (None, Some(network)) => RpcConfig::for_network(network),
        (None, None) => RpcConfig::from_env(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("OB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let Cli {
        command,
        rpc_url,
        network,
        json,
    } = Cli::parse();

    let output = match command {
        Commands::TypeName { type_str } => {
            let reified = default_loader().reified(&type_str)?;
            Value::String(reified.full_type_name())
        }
        Commands::Decode(cmd) => cmd.execute()?,
        Commands::Fetch {
            type_str,
            object_id,
        } => {
            let Reified::Struct(desc) = default_loader().reified(&type_str)? else {
                bail!("fetch needs a struct type, got {}", type_str);
            };
            let config = rpc_config(rpc_url.as_deref(), network);
            debug!(endpoint = %config.endpoint, "fetching object");
            let client = JsonRpcClient::from_config(&config);
            desc.fetch(&client, &object_id).await?.to_json()
        }
    };

    match (json, output) {
        (false, Value::String(s)) => println!("{}", s),
        (true, value) => println!("{}", serde_json::to_string(&value)?),
        (false, value) => println!("{}", serde_json::to_string_pretty(&value)?),
    }
    Ok(())
}
