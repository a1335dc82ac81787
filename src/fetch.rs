//! Object retrieval for struct class `fetch`.
//!
//! The ledger is reached through [`ObjectSource`] so that decoding can be
//! exercised against in-memory fixtures as well as a live fullnode.

use anyhow::{Context, Result as AnyResult};
use ob_transport::{JsonRpcClient, ObjectDataOptions, ObjectResponse, RawData};
use ob_types::encoding::base64_decode;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{ReifiedError, Result};
use crate::loader::ensure_nesting;
use crate::reified::{assert_fields_with_types_args_match, StructDescriptor};

/// Anything that can answer a single-object query.
#[async_trait::async_trait]
pub trait ObjectSource: Send + Sync {
    async fn fetch_object(&self, id: &str, options: &ObjectDataOptions)
        -> AnyResult<ObjectResponse>;
}

#[async_trait::async_trait]
impl ObjectSource for JsonRpcClient {
    async fn fetch_object(
        &self,
        id: &str,
        options: &ObjectDataOptions,
    ) -> AnyResult<ObjectResponse> {
        let client = self.clone();
        let id_owned = id.to_string();
        let options = options.clone();
        tokio::task::spawn_blocking(move || client.get_object(&id_owned, &options))
            .await
            .context("object fetch task panicked")?
            .with_context(|| format!("failed to fetch object {}", id))
    }
}

/// Fetch `id` and return its BCS contents once the reported type has been
/// checked against `desc`.
pub(crate) async fn fetch_object_bcs<C>(
    client: &C,
    desc: &StructDescriptor,
    id: &str,
) -> Result<Vec<u8>>
where
    C: ObjectSource + ?Sized,
{
    debug!(id, type_name = desc.full_type_name(), "fetching object");

    let response = client
        .fetch_object(id, &ObjectDataOptions::bcs())
        .await
        .map_err(|e| {
            warn!(id, error = %e, "object fetch failed");
            ReifiedError::Fetch {
                id: id.to_string(),
                reason: format!("{:#}", e),
            }
        })?;

    if let Some(error) = response.error {
        return Err(ReifiedError::Fetch {
            id: id.to_string(),
            reason: error.to_string(),
        });
    }

    let not_an_object = || ReifiedError::NotAnObject {
        id: id.to_string(),
        expected: desc.type_name().to_string(),
    };
    let raw = match response.data.and_then(|d| d.bcs) {
        Some(RawData::MoveObject(raw)) => raw,
        Some(RawData::Package(_)) | None => return Err(not_an_object()),
    };
    ensure_nesting(&raw.type_)?;
    if !desc.is_type(&raw.type_) {
        return Err(not_an_object());
    }
    assert_fields_with_types_args_match(&json!({ "type": raw.type_ }), desc.reified_type_args())?;

    base64_decode(&raw.bcs_bytes, "object BCS").map_err(|e| ReifiedError::MalformedBcs {
        type_name: desc.full_type_name().to_string(),
        reason: e.to_string(),
    })
}
