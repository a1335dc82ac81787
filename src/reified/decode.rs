//! Field-level decoders for the three JSON-shaped representations.
//!
//! | type            | raw fields (BCS-shaped)   | fields-with-types (RPC) | JSON projection |
//! |-----------------|---------------------------|-------------------------|-----------------|
//! | `u64` and wider | number or decimal string  | decimal string          | decimal string  |
//! | `address`       | hex, `0x` optional        | `0x` hex                | `0x` hex        |
//! | `String`        | `{bytes: [u8]}`           | string                  | string          |
//! | `Url`           | `{url: {bytes: [u8]}}`    | string                  | string          |
//! | `ID`            | `{bytes: hex}`            | `0x` hex                | `0x` hex        |
//! | `UID`           | `{id: {bytes: hex}}`      | `{id: 0x hex}`          | `0x` hex        |
//! | `Option<T>`     | `{vec: [] or [T]}`        | null or T               | null or T       |
//! | `Balance<T>`    | `{value: u64}`            | decimal string          | `{value: u64}`  |

use move_core_types::account_address::AccountAddress;
use move_core_types::u256::U256;
use ob_types::{compress_type, parse_address, parse_type_name};
use serde_json::{json, Value};
use std::str::FromStr;

use super::descriptor::Special;
use super::value::FieldValue;
use super::{extract_type, Primitive, Reified, TypeArgument};
use crate::error::{ReifiedError, Result};
use crate::loader::ensure_nesting;

// ===== Primitives =====

fn decode_primitive(p: Primitive, v: &Value) -> Result<FieldValue> {
    let value = match p {
        Primitive::Bool => v.as_bool().map(FieldValue::Bool),
        Primitive::U8 => parse_int(v).map(FieldValue::U8),
        Primitive::U16 => parse_int(v).map(FieldValue::U16),
        Primitive::U32 => parse_int(v).map(FieldValue::U32),
        Primitive::U64 => parse_int(v).map(FieldValue::U64),
        Primitive::U128 => parse_int(v).map(FieldValue::U128),
        Primitive::U256 => parse_u256(v).map(FieldValue::U256),
        Primitive::Address => decode_address(v).map(FieldValue::Address),
    };
    value.ok_or_else(|| ReifiedError::invalid_field(p.as_str(), v))
}

fn parse_int<T: FromStr + TryFrom<u64>>(v: &Value) -> Option<T> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| T::try_from(n).ok()),
        Value::String(s) if is_decimal(s) => s.parse().ok(),
        _ => None,
    }
}

fn parse_u256(v: &Value) -> Option<U256> {
    match v {
        Value::Number(n) => n.as_u64().map(U256::from),
        Value::String(s) if is_decimal(s) => U256::from_str_radix(s, 10).ok(),
        _ => None,
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn decode_address(v: &Value) -> Option<AccountAddress> {
    v.as_str().and_then(parse_address)
}

fn address_at(v: &Value, pointer: &str, ty: &str) -> Result<FieldValue> {
    v.pointer(pointer)
        .and_then(decode_address)
        .map(FieldValue::Address)
        .ok_or_else(|| ReifiedError::invalid_field(ty, v))
}

fn string_at(v: &Value, ty: &str) -> Result<FieldValue> {
    v.as_str()
        .map(|s| FieldValue::String(s.to_string()))
        .ok_or_else(|| ReifiedError::invalid_field(ty, v))
}

/// UTF-8 string out of a raw `vector<u8>`.
fn utf8_at(v: &Value, pointer: &str, ty: &str) -> Result<FieldValue> {
    let invalid = || ReifiedError::invalid_field(ty, v);
    let bytes = match v.pointer(pointer).ok_or_else(invalid)? {
        Value::Array(items) => items
            .iter()
            .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(invalid)?,
        Value::String(s) => s.as_bytes().to_vec(),
        _ => return Err(invalid()),
    };
    String::from_utf8(bytes)
        .map(FieldValue::String)
        .map_err(|_| invalid())
}

fn decode_vector(
    elem: &Reified,
    v: &Value,
    decode: fn(&Reified, &Value) -> Result<FieldValue>,
) -> Result<FieldValue> {
    let items = v
        .as_array()
        .ok_or_else(|| ReifiedError::invalid_field(format!("vector<{}>", elem), v))?;
    items
        .iter()
        .map(|item| decode(elem, item))
        .collect::<Result<Vec<_>>>()
        .map(FieldValue::Vector)
}

/// `Option<T>` given as null or the inner value.
fn decode_nullable(
    inner: Option<&Reified>,
    v: &Value,
    decode: fn(&Reified, &Value) -> Result<FieldValue>,
) -> Result<FieldValue> {
    if v.is_null() {
        return Ok(FieldValue::Option(None));
    }
    let inner = inner.ok_or_else(|| ReifiedError::invalid_field("0x1::option::Option", v))?;
    Ok(FieldValue::Option(Some(Box::new(decode(inner, v)?))))
}

// ===== Raw fields =====

/// Decode one field from the raw field map produced by BCS parsing.
pub fn decode_from_fields(ty: &Reified, field: &Value) -> Result<FieldValue> {
    let desc = match ty {
        Reified::Primitive(p) => return decode_primitive(*p, field),
        Reified::Vector(elem) => return decode_vector(elem, field, decode_from_fields),
        Reified::Struct(desc) => desc,
    };
    let name = desc.full_type_name();

    match desc.special() {
        Special::String => utf8_at(field, "/bytes", name),
        Special::Url => utf8_at(field, "/url/bytes", name),
        Special::Id => address_at(field, "/bytes", name),
        Special::Uid => address_at(field, "/id/bytes", name),
        Special::Option => {
            let vec = field
                .get("vec")
                .and_then(Value::as_array)
                .ok_or_else(|| ReifiedError::invalid_field(name, field))?;
            match vec.as_slice() {
                [] => Ok(FieldValue::Option(None)),
                [item] => {
                    let inner = desc
                        .type_arg(0)
                        .ok_or_else(|| ReifiedError::invalid_field(name, field))?;
                    Ok(FieldValue::Option(Some(Box::new(decode_from_fields(
                        inner, item,
                    )?))))
                }
                _ => Err(ReifiedError::invalid_field(name, field)),
            }
        }
        Special::Balance | Special::None => desc.from_fields(field).map(FieldValue::Struct),
    }
}

// ===== Fields with types =====

/// Decode one field from an RPC `{type, fields}` query result.
pub fn decode_from_fields_with_types(ty: &Reified, item: &Value) -> Result<FieldValue> {
    let desc = match ty {
        Reified::Primitive(p) => return decode_primitive(*p, item),
        Reified::Vector(elem) => return decode_vector(elem, item, decode_from_fields_with_types),
        Reified::Struct(desc) => desc,
    };
    let name = desc.full_type_name();

    match desc.special() {
        Special::String | Special::Url => string_at(item, name),
        Special::Id => address_at(item, "", name),
        Special::Uid => address_at(item, "/id", name),
        Special::Option => decode_nullable(desc.type_arg(0), item, decode_from_fields_with_types),
        Special::Balance => desc
            .from_fields(&json!({ "value": item }))
            .map(FieldValue::Struct),
        Special::None => desc.from_fields_with_types(item).map(FieldValue::Struct),
    }
}

// ===== JSON =====

/// Decode one field from the JSON projection.
pub fn decode_from_json_field(ty: &Reified, field: &Value) -> Result<FieldValue> {
    let desc = match ty {
        Reified::Primitive(p) => return decode_primitive(*p, field),
        Reified::Vector(elem) => return decode_vector(elem, field, decode_from_json_field),
        Reified::Struct(desc) => desc,
    };
    let name = desc.full_type_name();

    match desc.special() {
        Special::String | Special::Url => string_at(field, name),
        Special::Id | Special::Uid => address_at(field, "", name),
        Special::Option => decode_nullable(desc.type_arg(0), field, decode_from_json_field),
        Special::Balance | Special::None => desc.from_json_field(field).map(FieldValue::Struct),
    }
}

// ===== Type argument checks =====

/// Check that the type arguments carried by data match the reified ones.
///
/// Comparison is on compressed type strings, so `0x2` and its 64-digit form
/// are equal.
pub fn assert_reified_type_args_match(
    full_type: &str,
    type_args: &[String],
    reified_type_args: &[TypeArgument],
) -> Result<()> {
    let expected: Vec<String> = reified_type_args.iter().map(extract_type).collect();
    let mismatch = || ReifiedError::TypeArgsMismatch {
        type_name: full_type.to_string(),
        expected: expected.clone(),
        got: type_args.to_vec(),
    };

    if type_args.len() != expected.len() {
        return Err(mismatch());
    }
    for (got, want) in type_args.iter().zip(&expected) {
        let got_c = compress_type(got).map_err(|e| ReifiedError::invalid_type_name(got, e))?;
        let want_c = compress_type(want).map_err(|e| ReifiedError::invalid_type_name(want, e))?;
        if got_c != want_c {
            return Err(mismatch());
        }
    }
    Ok(())
}

/// Same as [`assert_reified_type_args_match`] for an RPC `{type, fields}` item.
pub fn assert_fields_with_types_args_match(
    item: &Value,
    reified_type_args: &[TypeArgument],
) -> Result<()> {
    let type_str = item
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ReifiedError::invalid_field("object with a type string", item))?;
    ensure_nesting(type_str)?;
    let parsed =
        parse_type_name(type_str).map_err(|e| ReifiedError::invalid_type_name(type_str, e))?;
    assert_reified_type_args_match(type_str, &parsed.type_args, reified_type_args)
}
