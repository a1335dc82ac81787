//! Type-erased Move values.
//!
//! Framework types with a special on-chain shape collapse to plain values:
//! `String`, `ascii::String` and `Url` become [`FieldValue::String`], `ID`
//! and `UID` become [`FieldValue::Address`], and `Option<T>` becomes
//! [`FieldValue::Option`].

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;
use move_core_types::u256::U256;
use ob_types::address::address_to_string;
use serde_json::{Map, Value};

use super::descriptor::{StructClass, StructDescriptor};
use super::Reified;
use crate::error::{ReifiedError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    Address(AccountAddress),
    String(String),
    Vector(Vec<FieldValue>),
    Option(Option<Box<FieldValue>>),
    Struct(StructValue),
}

impl FieldValue {
    /// Short label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::U8(_) => "u8",
            FieldValue::U16(_) => "u16",
            FieldValue::U32(_) => "u32",
            FieldValue::U64(_) => "u64",
            FieldValue::U128(_) => "u128",
            FieldValue::U256(_) => "u256",
            FieldValue::Address(_) => "address",
            FieldValue::String(_) => "string",
            FieldValue::Vector(_) => "vector",
            FieldValue::Option(_) => "option",
            FieldValue::Struct(_) => "struct",
        }
    }

    /// JSON projection: 64-bit and wider integers become decimal strings.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::U8(n) => Value::from(*n),
            FieldValue::U16(n) => Value::from(*n),
            FieldValue::U32(n) => Value::from(*n),
            FieldValue::U64(n) => Value::String(n.to_string()),
            FieldValue::U128(n) => Value::String(n.to_string()),
            FieldValue::U256(n) => Value::String(n.to_string()),
            FieldValue::Address(a) => Value::String(address_to_string(a)),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Vector(items) => Value::Array(items.iter().map(|i| i.to_json()).collect()),
            FieldValue::Option(None) => Value::Null,
            FieldValue::Option(Some(inner)) => inner.to_json(),
            FieldValue::Struct(s) => s.to_json_field(),
        }
    }

    /// Whether this value is a valid inhabitant of `ty`.
    pub fn conforms_to(&self, ty: &Reified) -> bool {
        use super::Primitive as P;

        match ty {
            Reified::Primitive(p) => matches!(
                (p, self),
                (P::Bool, FieldValue::Bool(_))
                    | (P::U8, FieldValue::U8(_))
                    | (P::U16, FieldValue::U16(_))
                    | (P::U32, FieldValue::U32(_))
                    | (P::U64, FieldValue::U64(_))
                    | (P::U128, FieldValue::U128(_))
                    | (P::U256, FieldValue::U256(_))
                    | (P::Address, FieldValue::Address(_))
            ),
            Reified::Vector(elem) => match self {
                FieldValue::Vector(items) => items.iter().all(|i| i.conforms_to(elem)),
                _ => false,
            },
            Reified::Struct(desc) => desc.accepts(self),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    FieldValue::$variant(v)
                }
            }

            impl FromFieldValue for $ty {
                fn from_field_value(value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::$variant(v) => Ok(v),
                        other => Err(unexpected(stringify!($variant), &other)),
                    }
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    U256 => U256,
    AccountAddress => Address,
    String => String,
    StructValue => Struct,
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Vector(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        FieldValue::Option(opt.map(|v| Box::new(v.into())))
    }
}

/// Typed extraction out of a [`FieldValue`].
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Result<Self>;
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Vector(items) => items.into_iter().map(T::from_field_value).collect(),
            other => Err(unexpected("Vector", &other)),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Option(None) => Ok(None),
            FieldValue::Option(Some(inner)) => T::from_field_value(*inner).map(Some),
            other => Err(unexpected("Option", &other)),
        }
    }
}

fn unexpected(expected: &str, got: &FieldValue) -> ReifiedError {
    ReifiedError::InvalidField {
        expected: expected.to_string(),
        got: got.kind().to_string(),
    }
}

/// Ordered field name to value list of one struct instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(String, FieldValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field, keeping first-insertion order.
    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Remove a field, failing when it is absent.
    pub fn remove(&mut self, name: &str) -> Result<FieldValue> {
        let idx = self
            .0
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ReifiedError::MissingField {
                struct_type: "fields".to_string(),
                field: name.to_string(),
            })?;
        Ok(self.0.remove(idx).1)
    }

    /// Remove a field and convert it.
    pub fn take<T: FromFieldValue>(&mut self, name: &str) -> Result<T> {
        T::from_field_value(self.remove(name)?)
    }

    /// Remove a nested struct field as its typed class.
    pub fn take_struct<S: StructClass>(&mut self, name: &str) -> Result<S> {
        S::from_value(self.take(name)?)
    }

    pub fn take_option_struct<S: StructClass>(&mut self, name: &str) -> Result<Option<S>> {
        self.take::<Option<StructValue>>(name)?
            .map(S::from_value)
            .transpose()
    }

    pub fn take_vec_struct<S: StructClass>(&mut self, name: &str) -> Result<Vec<S>> {
        self.take::<Vec<StructValue>>(name)?
            .into_iter()
            .map(S::from_value)
            .collect()
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, FieldValue)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(&name, value);
        }
        fields
    }
}

/// A struct instance whose class is only known at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructValue {
    descriptor: Arc<StructDescriptor>,
    fields: Fields,
}

impl StructValue {
    /// Callers guarantee `fields` conform to `descriptor`.
    pub(crate) fn new_unchecked(descriptor: Arc<StructDescriptor>, fields: Fields) -> Self {
        Self { descriptor, fields }
    }

    pub fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }

    pub fn type_name(&self) -> &str {
        self.descriptor.type_name()
    }

    pub fn full_type_name(&self) -> &str {
        self.descriptor.full_type_name()
    }

    pub fn type_args(&self) -> &[String] {
        self.descriptor.type_args()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn into_parts(self) -> (Arc<StructDescriptor>, Fields) {
        (self.descriptor, self.fields)
    }

    /// Declared fields under their camelCase JSON keys.
    fn json_fields(&self) -> Map<String, Value> {
        self.descriptor
            .fields()
            .iter()
            .filter_map(|field| {
                self.fields
                    .get(field.name)
                    .map(|v| (field.json_key().to_string(), v.to_json()))
            })
            .collect()
    }

    /// Field map only, as nested inside another struct's JSON.
    pub fn to_json_field(&self) -> Value {
        Value::Object(self.json_fields())
    }

    /// Top-level JSON with `$typeName` and `$typeArgs`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "$typeName".to_string(),
            Value::String(self.type_name().to_string()),
        );
        map.insert(
            "$typeArgs".to_string(),
            Value::Array(
                self.type_args()
                    .iter()
                    .map(|a| Value::String(a.clone()))
                    .collect(),
            ),
        );
        map.extend(self.json_fields());
        Value::Object(map)
    }

    pub fn to_bcs(&self) -> Result<Vec<u8>> {
        super::codec::struct_to_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wide_integers_serialize_as_strings() {
        assert_eq!(FieldValue::U32(7).to_json(), json!(7));
        assert_eq!(
            FieldValue::U64(u64::MAX).to_json(),
            json!("18446744073709551615")
        );
        assert_eq!(
            FieldValue::U128(u128::MAX).to_json(),
            json!(u128::MAX.to_string())
        );
    }

    #[test]
    fn test_option_and_vector_json() {
        assert_eq!(FieldValue::from(None::<u8>).to_json(), Value::Null);
        assert_eq!(FieldValue::from(Some(3u8)).to_json(), json!(3));
        assert_eq!(FieldValue::from(vec![1u8, 2]).to_json(), json!([1, 2]));
    }

    #[test]
    fn test_address_json_is_full_lowercase_hex() {
        let addr = AccountAddress::from_hex_literal("0xAB").unwrap();
        assert_eq!(
            FieldValue::from(addr).to_json(),
            json!("0x00000000000000000000000000000000000000000000000000000000000000ab")
        );
    }

    #[test]
    fn test_fields_take() {
        let mut fields = Fields::new()
            .with("max", 10u64)
            .with("tags", vec!["a", "b"])
            .with("limit", Some(5u64));
        assert_eq!(fields.take::<u64>("max").unwrap(), 10);
        assert_eq!(
            fields.take::<Vec<String>>("tags").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(fields.take::<Option<u64>>("limit").unwrap(), Some(5));
        assert!(matches!(
            fields.take::<u64>("max"),
            Err(ReifiedError::MissingField { .. })
        ));
    }

    #[test]
    fn test_fields_take_wrong_kind() {
        let mut fields = Fields::new().with("flag", true);
        assert!(matches!(
            fields.take::<u64>("flag"),
            Err(ReifiedError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_fields_insert_replaces() {
        let mut fields = Fields::new().with("a", 1u8).with("b", 2u8);
        fields.insert("a", 3u8);
        let names: Vec<&str> = fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(fields.get("a"), Some(&FieldValue::U8(3)));
    }
}
