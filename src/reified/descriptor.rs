//! Struct descriptors and the struct class contract.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use ob_types::framework::{
    ASCII_STRING_TYPE, BALANCE_TYPE, ID_TYPE, OPTION_TYPE, STRING_TYPE, UID_TYPE, URL_TYPE,
};
use ob_types::{compose_type, compress_type};
use serde_json::Value;

use super::decode::{
    assert_fields_with_types_args_match, assert_reified_type_args_match, decode_from_fields,
    decode_from_fields_with_types, decode_from_json_field,
};
use super::value::{FieldValue, Fields, StructValue};
use super::{extract_type, PhantomReified, Reified, TypeArgs, TypeArgument, TypeParam};
use crate::error::{ReifiedError, Result};
use crate::fetch::{fetch_object_bcs, ObjectSource};
use crate::loader::ensure_nesting;

/// Framework structs whose field representation differs from their layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Special {
    None,
    String,
    Url,
    Id,
    Uid,
    Option,
    Balance,
}

impl Special {
    fn of(type_name: &str) -> Self {
        match type_name {
            STRING_TYPE | ASCII_STRING_TYPE => Special::String,
            URL_TYPE => Special::Url,
            ID_TYPE => Special::Id,
            UID_TYPE => Special::Uid,
            OPTION_TYPE => Special::Option,
            BALANCE_TYPE => Special::Balance,
            _ => Special::None,
        }
    }
}

/// One declared struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Move field name, used by raw fields, fields-with-types and BCS.
    pub name: &'static str,
    pub ty: Reified,
    json_key: String,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, ty: impl Into<Reified>) -> Self {
        Self {
            name,
            ty: ty.into(),
            json_key: to_camel_case(name),
        }
    }

    /// Key in the JSON projection, e.g. `collectionId` for `collection_id`.
    pub fn json_key(&self) -> &str {
        &self.json_key
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// A struct type instantiated with concrete type arguments.
pub struct StructDescriptor {
    type_name: &'static str,
    full_type_name: String,
    type_args: Vec<String>,
    reified_type_args: Vec<TypeArgument>,
    fields: Vec<FieldDescriptor>,
    special: Special,
}

impl StructDescriptor {
    /// Instantiate class `S`, checking arity and parameter kinds.
    ///
    /// A resolved type in a phantom slot is accepted and reduced to its name.
    pub(crate) fn reify<S: StructClass>(type_args: Vec<TypeArgument>) -> Result<Arc<Self>> {
        if type_args.len() != S::TYPE_PARAMS.len() {
            return Err(ReifiedError::TypeArityMismatch {
                type_name: S::TYPE_NAME.to_string(),
                expected: S::TYPE_PARAMS.len(),
                got: type_args.len(),
            });
        }

        let reified_type_args = S::TYPE_PARAMS
            .iter()
            .zip(type_args)
            .map(|(param, arg)| match (param, arg) {
                (TypeParam::Phantom, arg) => Ok(TypeArgument::Phantom(arg.into_phantom())),
                (TypeParam::NonPhantom, TypeArgument::Reified(r)) => Ok(TypeArgument::Reified(r)),
                (TypeParam::NonPhantom, TypeArgument::Phantom(p)) => {
                    Err(ReifiedError::TypeMismatch {
                        expected: format!("a resolved type argument for {}", S::TYPE_NAME),
                        got: format!("phantom {}", p.phantom_type()),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let type_args: Vec<String> = reified_type_args.iter().map(extract_type).collect();
        let fields = S::field_types(&TypeArgs::new(&reified_type_args));

        Ok(Arc::new(Self {
            type_name: S::TYPE_NAME,
            full_type_name: compose_type(S::TYPE_NAME, &type_args),
            type_args,
            reified_type_args,
            fields,
            special: Special::of(S::TYPE_NAME),
        }))
    }

    /// Declared base name, e.g. `0x2::coin::Coin`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Base name with type arguments, e.g. `0x2::coin::Coin<0x2::sui::SUI>`.
    pub fn full_type_name(&self) -> &str {
        &self.full_type_name
    }

    pub fn type_args(&self) -> &[String] {
        &self.type_args
    }

    pub fn reified_type_args(&self) -> &[TypeArgument] {
        &self.reified_type_args
    }

    /// Fields in declaration order, which is also the BCS order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub(crate) fn special(&self) -> Special {
        self.special
    }

    /// Resolved type argument at `index`, if it is non-phantom.
    pub(crate) fn type_arg(&self, index: usize) -> Option<&Reified> {
        self.reified_type_args.get(index)?.as_reified()
    }

    /// Whether `type_str` names this struct (any instantiation for generics).
    pub fn is_type(&self, type_str: &str) -> bool {
        is_struct_type(self.type_name, !self.reified_type_args.is_empty(), type_str)
    }

    /// Whether `value` can fill a field of this struct type.
    pub(crate) fn accepts(&self, value: &FieldValue) -> bool {
        match (self.special, value) {
            (Special::String | Special::Url, FieldValue::String(_)) => true,
            (Special::Id | Special::Uid, FieldValue::Address(_)) => true,
            (Special::Option, FieldValue::Option(None)) => true,
            (Special::Option, FieldValue::Option(Some(inner))) => self
                .type_arg(0)
                .map(|ty| inner.conforms_to(ty))
                .unwrap_or(false),
            (Special::String | Special::Url | Special::Id | Special::Uid | Special::Option, _) => {
                false
            }
            (_, FieldValue::Struct(s)) => self.same_type(s.descriptor()),
            _ => false,
        }
    }

    fn same_type(&self, other: &StructDescriptor) -> bool {
        if self.full_type_name == other.full_type_name {
            return true;
        }
        match (
            compress_type(&self.full_type_name),
            compress_type(&other.full_type_name),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    // ===== Construction =====

    /// Build an instance from a fields bag, validating names and values.
    ///
    /// Fields may be given in any order; the result is in declaration order.
    pub fn construct(self: &Arc<Self>, mut fields: Fields) -> Result<StructValue> {
        let mut ordered = Fields::new();
        for field in &self.fields {
            let value = fields
                .remove(field.name)
                .map_err(|_| self.missing(field.name))?;
            if !value.conforms_to(&field.ty) {
                return Err(ReifiedError::invalid_field(
                    field.ty.full_type_name(),
                    &value.to_json(),
                ));
            }
            ordered.insert(field.name, value);
        }
        if let Some((extra, _)) = fields.iter().next() {
            return Err(ReifiedError::InvalidField {
                expected: format!("a declared field of {}", self.full_type_name),
                got: extra.to_string(),
            });
        }
        Ok(StructValue::new_unchecked(self.clone(), ordered))
    }

    fn missing(&self, field: &str) -> ReifiedError {
        ReifiedError::MissingField {
            struct_type: self.full_type_name.clone(),
            field: field.to_string(),
        }
    }

    /// Decode every declared field out of `bag`, keyed by Move name or,
    /// for the JSON projection, by camelCase key.
    fn decode_each(
        &self,
        bag: &Value,
        json_keys: bool,
        decode: fn(&Reified, &Value) -> Result<FieldValue>,
    ) -> Result<Fields> {
        let map = bag
            .as_object()
            .ok_or_else(|| ReifiedError::invalid_field(self.full_type_name.as_str(), bag))?;
        let mut fields = Fields::new();
        for field in &self.fields {
            let key = if json_keys { field.json_key() } else { field.name };
            let raw = map.get(key).ok_or_else(|| self.missing(key))?;
            fields.insert(field.name, decode(&field.ty, raw)?);
        }
        Ok(fields)
    }

    // ===== Decoding =====

    /// Decode a raw field map (the shape produced by parsing BCS).
    pub fn from_fields(self: &Arc<Self>, fields: &Value) -> Result<StructValue> {
        let fields = self.decode_each(fields, false, decode_from_fields)?;
        Ok(StructValue::new_unchecked(self.clone(), fields))
    }

    /// Decode an RPC query result `{type, fields}` after checking its type.
    pub fn from_fields_with_types(self: &Arc<Self>, item: &Value) -> Result<StructValue> {
        let type_str = item
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing("type"))?;
        ensure_nesting(type_str)?;
        if !self.is_type(type_str) {
            return Err(ReifiedError::TypeMismatch {
                expected: self.full_type_name.clone(),
                got: type_str.to_string(),
            });
        }
        assert_fields_with_types_args_match(item, &self.reified_type_args)?;

        let fields = item.get("fields").ok_or_else(|| self.missing("fields"))?;
        let fields = self.decode_each(fields, false, decode_from_fields_with_types)?;
        Ok(StructValue::new_unchecked(self.clone(), fields))
    }

    /// Decode BCS bytes laid out in field declaration order.
    pub fn from_bcs(self: &Arc<Self>, data: &[u8]) -> Result<StructValue> {
        let raw = super::codec::parse_struct(self, data)?;
        self.from_fields(&raw)
    }

    /// Decode the field map of a JSON projection (no `$type*` keys needed).
    pub fn from_json_field(self: &Arc<Self>, field: &Value) -> Result<StructValue> {
        let fields = self.decode_each(field, true, decode_from_json_field)?;
        Ok(StructValue::new_unchecked(self.clone(), fields))
    }

    /// Decode a top-level JSON projection, checking `$typeName` and `$typeArgs`.
    pub fn from_json(self: &Arc<Self>, json: &Value) -> Result<StructValue> {
        let type_name = json
            .get("$typeName")
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing("$typeName"))?;
        ensure_nesting(type_name)?;
        if !same_compressed(type_name, self.type_name) {
            return Err(ReifiedError::TypeMismatch {
                expected: self.type_name.to_string(),
                got: type_name.to_string(),
            });
        }

        let type_args = match json.get("$typeArgs") {
            None | Some(Value::Null) => vec![],
            Some(Value::Array(items)) => items
                .iter()
                .map(|a| {
                    a.as_str()
                        .map(String::from)
                        .ok_or_else(|| ReifiedError::invalid_field("type argument string", a))
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => return Err(ReifiedError::invalid_field("$typeArgs array", other)),
        };
        for arg in &type_args {
            ensure_nesting(arg)?;
        }
        assert_reified_type_args_match(
            &compose_type(type_name, &type_args),
            &type_args,
            &self.reified_type_args,
        )?;

        self.from_json_field(json)
    }

    /// Decode the `content` of an object response (`dataType: moveObject`).
    pub fn from_sui_parsed_data(self: &Arc<Self>, content: &Value) -> Result<StructValue> {
        if content.get("dataType").and_then(Value::as_str) != Some("moveObject") {
            let id = content
                .pointer("/fields/id/id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            return Err(ReifiedError::NotAnObject {
                id: id.to_string(),
                expected: self.full_type_name.clone(),
            });
        }
        let type_str = content
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        ensure_nesting(type_str)?;
        if !self.is_type(type_str) {
            return Err(ReifiedError::TypeMismatch {
                expected: self.full_type_name.clone(),
                got: type_str.to_string(),
            });
        }
        self.from_fields_with_types(content)
    }

    /// Fetch an object by id and decode its BCS contents.
    pub async fn fetch<C>(self: &Arc<Self>, client: &C, id: &str) -> Result<StructValue>
    where
        C: ObjectSource + ?Sized,
    {
        let bytes = fetch_object_bcs(client, self, id).await?;
        self.from_bcs(&bytes)
    }
}

impl PartialEq for StructDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.full_type_name == other.full_type_name
    }
}

impl Eq for StructDescriptor {}

impl fmt::Debug for StructDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructDescriptor")
            .field("full_type_name", &self.full_type_name)
            .field(
                "fields",
                &self.fields.iter().map(|fd| fd.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn same_compressed(a: &str, b: &str) -> bool {
    match (compress_type(a), compress_type(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Whether `type_str` names the struct `type_name`.
///
/// Generic structs match any instantiation (`Name<...>`), non-generic ones
/// only the bare name.
pub(crate) fn is_struct_type(type_name: &str, generic: bool, type_str: &str) -> bool {
    let (Ok(compressed), Ok(expected)) = (compress_type(type_str), compress_type(type_name))
    else {
        return false;
    };
    if generic {
        compressed
            .strip_prefix(expected.as_str())
            .is_some_and(|rest| rest.starts_with('<'))
    } else {
        compressed == expected
    }
}

/// The contract every generated struct class implements.
///
/// A class declares its on-chain name, its type parameters and how to list
/// its fields for a given instantiation. The decode paths all end in
/// [`StructClass::instantiate`], the only way to obtain an instance.
pub trait StructClass: Sized + Clone + fmt::Debug + PartialEq {
    /// Base name with a compressed address, e.g. `0x2::coin::Coin`.
    const TYPE_NAME: &'static str;
    const TYPE_PARAMS: &'static [TypeParam];

    /// Field list in declaration order for these type arguments.
    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor>;

    /// Build the typed instance from fields that already conform.
    fn instantiate(descriptor: Arc<StructDescriptor>, fields: Fields) -> Result<Self>;

    fn to_fields(&self) -> Fields;

    fn descriptor(&self) -> &Arc<StructDescriptor>;

    fn type_name(&self) -> &str {
        self.descriptor().type_name()
    }

    fn full_type_name(&self) -> &str {
        self.descriptor().full_type_name()
    }

    fn type_args(&self) -> &[String] {
        self.descriptor().type_args()
    }

    fn to_value(&self) -> StructValue {
        StructValue::new_unchecked(self.descriptor().clone(), self.to_fields())
    }

    fn to_json_field(&self) -> Value {
        self.to_value().to_json_field()
    }

    fn to_json(&self) -> Value {
        self.to_value().to_json()
    }

    fn to_bcs(&self) -> Result<Vec<u8>> {
        self.to_value().to_bcs()
    }

    fn is_type(type_str: &str) -> bool {
        is_struct_type(Self::TYPE_NAME, !Self::TYPE_PARAMS.is_empty(), type_str)
    }

    /// Convert an erased value of this class back to its typed form.
    fn from_value(value: StructValue) -> Result<Self> {
        if value.type_name() != Self::TYPE_NAME {
            return Err(ReifiedError::TypeMismatch {
                expected: Self::TYPE_NAME.to_string(),
                got: value.full_type_name().to_string(),
            });
        }
        let (descriptor, fields) = value.into_parts();
        Self::instantiate(descriptor, fields)
    }
}

/// Typed handle on a [`StructDescriptor`] for class `S`.
pub struct StructReified<S> {
    descriptor: Arc<StructDescriptor>,
    _class: PhantomData<fn() -> S>,
}

impl<S: StructClass> StructReified<S> {
    /// Reify `S` with hand-written type arguments.
    ///
    /// # Panics
    ///
    /// When the argument count or a parameter kind does not match the
    /// class declaration. Use [`StructReified::try_new`] for data-driven input.
    pub fn new(type_args: Vec<TypeArgument>) -> Self {
        Self::try_new(type_args).unwrap_or_else(|e| panic!("cannot reify {}: {}", S::TYPE_NAME, e))
    }

    pub fn try_new(type_args: Vec<TypeArgument>) -> Result<Self> {
        Ok(Self::from_descriptor(StructDescriptor::reify::<S>(type_args)?))
    }

    fn from_descriptor(descriptor: Arc<StructDescriptor>) -> Self {
        Self {
            descriptor,
            _class: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }

    pub fn type_name(&self) -> &'static str {
        self.descriptor.type_name()
    }

    pub fn full_type_name(&self) -> &str {
        self.descriptor.full_type_name()
    }

    pub fn type_args(&self) -> &[String] {
        self.descriptor.type_args()
    }

    pub fn reified_type_args(&self) -> &[TypeArgument] {
        self.descriptor.reified_type_args()
    }

    pub fn is_type(&self, type_str: &str) -> bool {
        self.descriptor.is_type(type_str)
    }

    /// This instantiation as a phantom argument.
    pub fn phantom(&self) -> PhantomReified {
        PhantomReified::new(self.full_type_name())
    }

    fn typed(&self, value: StructValue) -> Result<S> {
        let (descriptor, fields) = value.into_parts();
        S::instantiate(descriptor, fields)
    }

    /// Create an instance from a fields bag.
    pub fn construct(&self, fields: Fields) -> Result<S> {
        self.typed(self.descriptor.construct(fields)?)
    }

    pub fn from_fields(&self, fields: &Value) -> Result<S> {
        self.typed(self.descriptor.from_fields(fields)?)
    }

    pub fn from_fields_with_types(&self, item: &Value) -> Result<S> {
        self.typed(self.descriptor.from_fields_with_types(item)?)
    }

    pub fn from_bcs(&self, data: &[u8]) -> Result<S> {
        self.typed(self.descriptor.from_bcs(data)?)
    }

    pub fn from_json_field(&self, field: &Value) -> Result<S> {
        self.typed(self.descriptor.from_json_field(field)?)
    }

    pub fn from_json(&self, json: &Value) -> Result<S> {
        self.typed(self.descriptor.from_json(json)?)
    }

    pub fn from_sui_parsed_data(&self, content: &Value) -> Result<S> {
        self.typed(self.descriptor.from_sui_parsed_data(content)?)
    }

    pub async fn fetch<C>(&self, client: &C, id: &str) -> Result<S>
    where
        C: ObjectSource + ?Sized,
    {
        self.typed(self.descriptor.fetch(client, id).await?)
    }
}

impl<S> Clone for StructReified<S> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            _class: PhantomData,
        }
    }
}

impl<S> fmt::Debug for StructReified<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructReified")
            .field(&self.descriptor.full_type_name)
            .finish()
    }
}

impl<S> From<StructReified<S>> for Reified {
    fn from(r: StructReified<S>) -> Self {
        Reified::Struct(r.descriptor)
    }
}

impl<S> From<&StructReified<S>> for Reified {
    fn from(r: &StructReified<S>) -> Self {
        Reified::Struct(r.descriptor.clone())
    }
}

impl<S> From<StructReified<S>> for TypeArgument {
    fn from(r: StructReified<S>) -> Self {
        TypeArgument::Reified(r.into())
    }
}

impl<S> From<StructReified<S>> for PhantomReified {
    fn from(r: StructReified<S>) -> Self {
        PhantomReified::new(r.descriptor.full_type_name.clone())
    }
}

impl<S> From<&StructReified<S>> for PhantomReified {
    fn from(r: &StructReified<S>) -> Self {
        PhantomReified::new(r.descriptor.full_type_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_struct_type_generic() {
        assert!(is_struct_type(
            "0x2::coin::Coin",
            true,
            "0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x2::sui::SUI>"
        ));
        assert!(!is_struct_type("0x2::coin::Coin", true, "0x2::coin::Coin"));
        assert!(!is_struct_type(
            "0x2::coin::Coin",
            true,
            "0x2::coin::CoinMetadata<0x2::sui::SUI>"
        ));
    }

    #[test]
    fn test_is_struct_type_plain() {
        assert!(is_struct_type("0x2::object::ID", false, "0x02::object::ID"));
        assert!(!is_struct_type("0x2::object::ID", false, "0x2::object::UID"));
        assert!(!is_struct_type("0x2::object::ID", false, "not a type"));
    }

    #[test]
    fn test_special_kinds() {
        assert_eq!(Special::of("0x1::ascii::String"), Special::String);
        assert_eq!(Special::of("0x2::object::UID"), Special::Uid);
        assert_eq!(Special::of("0x2::coin::Coin"), Special::None);
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        assert_eq!(to_camel_case("collection_id"), "collectionId");
        assert_eq!(to_camel_case("dummy_field"), "dummyField");
        assert_eq!(to_camel_case("for"), "for");
        assert_eq!(to_camel_case("field_1"), "field1");
        assert_eq!(to_camel_case("_hidden"), "hidden");
    }
}
