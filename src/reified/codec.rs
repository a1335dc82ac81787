//! BCS encoding and layout-driven parsing.
//!
//! Parsing goes through an intermediate JSON field map so that the raw-fields
//! decoder is the single place where special framework shapes are handled.

use std::fmt;
use std::sync::Arc;

use move_core_types::u256::U256;
use serde::de::{self, DeserializeSeed, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::decode::decode_from_fields;
use super::descriptor::StructDescriptor;
use super::value::{FieldValue, StructValue};
use super::{Primitive, Reified};
use crate::error::{ReifiedError, Result};

/// Wire layout of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BcsLayout {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Vector(Box<BcsLayout>),
    /// Fields in declaration order; encoded back to back with no prefix.
    Struct(Vec<(&'static str, BcsLayout)>),
}

impl BcsLayout {
    pub fn of(ty: &Reified) -> Self {
        match ty {
            Reified::Primitive(p) => match p {
                Primitive::Bool => BcsLayout::Bool,
                Primitive::U8 => BcsLayout::U8,
                Primitive::U16 => BcsLayout::U16,
                Primitive::U32 => BcsLayout::U32,
                Primitive::U64 => BcsLayout::U64,
                Primitive::U128 => BcsLayout::U128,
                Primitive::U256 => BcsLayout::U256,
                Primitive::Address => BcsLayout::Address,
            },
            Reified::Vector(elem) => BcsLayout::Vector(Box::new(BcsLayout::of(elem))),
            Reified::Struct(desc) => BcsLayout::of_struct(desc),
        }
    }

    pub fn of_struct(desc: &StructDescriptor) -> Self {
        BcsLayout::Struct(
            desc.fields()
                .iter()
                .map(|field| (field.name, BcsLayout::of(&field.ty)))
                .collect(),
        )
    }
}

// ===== Parsing =====

impl<'de> DeserializeSeed<'de> for &BcsLayout {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        match self {
            BcsLayout::Bool => bool::deserialize(d).map(Value::Bool),
            BcsLayout::U8 => u8::deserialize(d).map(Value::from),
            BcsLayout::U16 => u16::deserialize(d).map(Value::from),
            BcsLayout::U32 => u32::deserialize(d).map(Value::from),
            BcsLayout::U64 => u64::deserialize(d).map(|n| Value::String(n.to_string())),
            BcsLayout::U128 => u128::deserialize(d).map(|n| Value::String(n.to_string())),
            BcsLayout::U256 => <[u8; 32]>::deserialize(d)
                .map(|b| Value::String(U256::from_le_bytes(&b).to_string())),
            BcsLayout::Address => <[u8; 32]>::deserialize(d).map(|b| Value::String(hex::encode(b))),
            BcsLayout::Vector(elem) => d.deserialize_seq(VectorVisitor(elem)),
            BcsLayout::Struct(fields) => d.deserialize_tuple(fields.len(), StructVisitor(fields)),
        }
    }
}

struct VectorVisitor<'a>(&'a BcsLayout);

impl<'de> Visitor<'de> for VectorVisitor<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a length-prefixed vector")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element_seed(self.0)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }
}

struct StructVisitor<'a>(&'a [(&'static str, BcsLayout)]);

impl<'de> Visitor<'de> for StructVisitor<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a struct with {} fields", self.0.len())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut map = Map::new();
        for (i, (name, layout)) in self.0.iter().enumerate() {
            let value = seq
                .next_element_seed(layout)?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
            map.insert((*name).to_string(), value);
        }
        Ok(Value::Object(map))
    }
}

/// Parse struct bytes into a raw field map.
pub(crate) fn parse_struct(desc: &Arc<StructDescriptor>, data: &[u8]) -> Result<Value> {
    let layout = BcsLayout::of_struct(desc);
    bcs::from_bytes_seed(&layout, data).map_err(|e| ReifiedError::MalformedBcs {
        type_name: desc.full_type_name().to_string(),
        reason: e.to_string(),
    })
}

/// Decode BCS bytes of any resolved type.
pub fn decode_bcs(ty: &Reified, data: &[u8]) -> Result<FieldValue> {
    let layout = BcsLayout::of(ty);
    let raw = bcs::from_bytes_seed(&layout, data).map_err(|e| ReifiedError::MalformedBcs {
        type_name: ty.full_type_name(),
        reason: e.to_string(),
    })?;
    decode_from_fields(ty, &raw)
}

// ===== Encoding =====

struct BcsValue<'a>(&'a FieldValue);

struct BcsStruct<'a>(&'a StructValue);

impl Serialize for BcsValue<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            FieldValue::Bool(b) => s.serialize_bool(*b),
            FieldValue::U8(n) => s.serialize_u8(*n),
            FieldValue::U16(n) => s.serialize_u16(*n),
            FieldValue::U32(n) => s.serialize_u32(*n),
            FieldValue::U64(n) => s.serialize_u64(*n),
            FieldValue::U128(n) => s.serialize_u128(*n),
            FieldValue::U256(n) => n.to_le_bytes().serialize(s),
            FieldValue::Address(a) => a.into_bytes().serialize(s),
            // String, ascii::String and Url all wrap a single vector<u8>.
            FieldValue::String(v) => s.serialize_bytes(v.as_bytes()),
            FieldValue::Vector(items) => {
                let mut seq = s.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&BcsValue(item))?;
                }
                seq.end()
            }
            FieldValue::Option(opt) => {
                let mut seq = s.serialize_seq(Some(usize::from(opt.is_some())))?;
                if let Some(inner) = opt {
                    seq.serialize_element(&BcsValue(inner))?;
                }
                seq.end()
            }
            FieldValue::Struct(v) => BcsStruct(v).serialize(s),
        }
    }
}

impl Serialize for BcsStruct<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = self.0.fields();
        let mut tuple = s.serialize_tuple(fields.len())?;
        for (_, value) in fields.iter() {
            tuple.serialize_element(&BcsValue(value))?;
        }
        tuple.end()
    }
}

pub(crate) fn struct_to_bytes(value: &StructValue) -> Result<Vec<u8>> {
    bcs::to_bytes(&BcsStruct(value)).map_err(|e| ReifiedError::MalformedBcs {
        type_name: value.full_type_name().to_string(),
        reason: e.to_string(),
    })
}

/// BCS bytes of a single value, as passed to a pure move-call input.
pub fn to_bcs_bytes(value: &FieldValue) -> Result<Vec<u8>> {
    bcs::to_bytes(&BcsValue(value)).map_err(|e| ReifiedError::MalformedBcs {
        type_name: value.kind().to_string(),
        reason: e.to_string(),
    })
}
