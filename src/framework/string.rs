//! `0x1::string::String` and `0x1::ascii::String`.

use std::sync::Arc;

use ob_types::framework::{ASCII_STRING_TYPE, STRING_TYPE};

use crate::error::{ReifiedError, Result};
use crate::reified::{
    vector, FieldDescriptor, Fields, Primitive, StructClass, StructDescriptor, StructReified,
    TypeArgs, TypeParam,
};

fn bytes_field() -> Vec<FieldDescriptor> {
    vec![FieldDescriptor::new("bytes", vector(Primitive::U8))]
}

/// UTF-8 string.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveString {
    value: String,
    descriptor: Arc<StructDescriptor>,
}

impl MoveString {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl StructClass for MoveString {
    const TYPE_NAME: &'static str = STRING_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        bytes_field()
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        let bytes: Vec<u8> = fields.take("bytes")?;
        let value = String::from_utf8(bytes).map_err(|_| ReifiedError::InvalidField {
            expected: STRING_TYPE.to_string(),
            got: "invalid UTF-8".to_string(),
        })?;
        Ok(Self { value, descriptor })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("bytes", self.value.as_bytes().to_vec())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

/// ASCII string.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiString {
    value: String,
    descriptor: Arc<StructDescriptor>,
}

impl AsciiString {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl StructClass for AsciiString {
    const TYPE_NAME: &'static str = ASCII_STRING_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        bytes_field()
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        let bytes: Vec<u8> = fields.take("bytes")?;
        let value = String::from_utf8(bytes)
            .ok()
            .filter(|s| s.is_ascii())
            .ok_or_else(|| ReifiedError::InvalidField {
                expected: ASCII_STRING_TYPE.to_string(),
                got: "non-ASCII bytes".to_string(),
            })?;
        Ok(Self { value, descriptor })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("bytes", self.value.as_bytes().to_vec())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_string_uses_declared_fields() {
        let s = MoveString::reified()
            .from_fields(&json!({ "bytes": [104, 105] }))
            .unwrap();
        assert_eq!(s.as_str(), "hi");
        assert_eq!(s.to_bcs().unwrap(), vec![2, 104, 105]);
        assert_eq!(s.to_json_field(), json!({ "bytes": [104, 105] }));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(MoveString::reified().from_bcs(&[1, 0xff]).is_err());
        assert!(AsciiString::reified().from_bcs(&[1, 0xc3]).is_err());
        assert!(AsciiString::reified().from_bcs(&[2, 0xc3, 0xa9]).is_err());
        assert!(matches!(
            MoveString::reified().from_fields(&json!({ "bytes": [0xc3] })),
            Err(ReifiedError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_multibyte_string_keeps_bytes() {
        let s = MoveString::reified().from_bcs(&[2, 0xc3, 0xa9]).unwrap();
        assert_eq!(s.as_str(), "\u{e9}");
        assert_eq!(s.bytes(), &[0xc3, 0xa9]);
        assert_eq!(s.to_bcs().unwrap(), vec![2, 0xc3, 0xa9]);
    }
}
