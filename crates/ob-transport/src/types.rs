//! Response shapes for `sui_getObject`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Which parts of an object the fullnode should include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    pub show_type: bool,
    pub show_bcs: bool,
    pub show_content: bool,
    pub show_owner: bool,
}

impl ObjectDataOptions {
    /// Type plus raw BCS bytes.
    pub fn bcs() -> Self {
        Self {
            show_type: true,
            show_bcs: true,
            ..Default::default()
        }
    }
}

/// Result of a single object lookup. Exactly one of `data` / `error` is set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub data: Option<ObjectData>,
    #[serde(default)]
    pub error: Option<ObjectResponseError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub version: Option<String>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub bcs: Option<RawData>,
    /// Parsed content in the fields-with-types shape (`dataType`, `type`, `fields`).
    #[serde(default)]
    pub content: Option<Value>,
}

/// Raw BCS payload of an object.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum RawData {
    MoveObject(RawMoveObject),
    Package(RawPackage),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoveObject {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub has_public_transfer: bool,
    /// Base64-encoded BCS bytes of the Move struct.
    pub bcs_bytes: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPackage {
    pub id: String,
}

/// Per-object error reported by the fullnode, e.g. `{"code": "notExists", "object_id": ...}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectResponseError {
    pub code: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl fmt::Display for ObjectResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.details.is_empty() {
            write!(f, " {}", Value::Object(self.details.clone()))?;
        }
        Ok(())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_move_object() {
        let resp: ObjectResponse = serde_json::from_value(json!({
            "data": {
                "objectId": "0x5",
                "version": "17",
                "digest": "abc",
                "type": "0x2::coin::Coin<0x2::sui::SUI>",
                "bcs": {
                    "dataType": "moveObject",
                    "type": "0x2::coin::Coin<0x2::sui::SUI>",
                    "hasPublicTransfer": true,
                    "version": 17,
                    "bcsBytes": "AAEC"
                }
            }
        }))
        .unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.version.as_deref(), Some("17"));
        match data.bcs.unwrap() {
            RawData::MoveObject(obj) => {
                assert_eq!(obj.type_, "0x2::coin::Coin<0x2::sui::SUI>");
                assert_eq!(obj.bcs_bytes, "AAEC");
            }
            RawData::Package(_) => panic!("expected move object"),
        }
    }

    #[test]
    fn test_deserialize_error() {
        let resp: ObjectResponse = serde_json::from_value(json!({
            "error": { "code": "notExists", "object_id": "0x9" }
        }))
        .unwrap();
        assert!(resp.data.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, "notExists");
        assert!(err.to_string().starts_with("notExists"));
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let value = serde_json::to_value(ObjectDataOptions::bcs()).unwrap();
        assert_eq!(value["showBcs"], true);
        assert_eq!(value["showContent"], false);
    }
}
