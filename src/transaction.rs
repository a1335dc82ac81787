//! Programmable transaction construction for move calls.
//!
//! [`TransactionBuilder`] collects inputs and commands the way a fullnode
//! expects them. The free functions [`obj`], [`pure`], [`generic`],
//! [`option`] and [`vector`] marshal loosely typed call arguments into
//! builder arguments, choosing between pure inputs, object inputs and
//! `MakeMoveVec` commands from the declared Move parameter type.
//!
//! ```
//! use ob_client::transaction::{pure, TransactionBuilder};
//!
//! let mut tx = TransactionBuilder::new();
//! let max = pure(&mut tx, 100u64, "u64").unwrap();
//! tx.move_call("0x2::example::new", vec![], vec![max]).unwrap();
//! assert_eq!(tx.finish().commands.len(), 1);
//! ```

use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;
use move_core_types::u256::U256;
use ob_types::address::address_to_string;
use ob_types::framework::{
    ASCII_STRING_TYPE, ID_TYPE, OPTION_NONE_TARGET, OPTION_SOME_TARGET, OPTION_TYPE, STRING_TYPE,
};
use ob_types::{compress_type, parse_address, parse_type_name, parse_type_tag, TypeName};
use serde::Serialize;

use crate::error::{ReifiedError, Result};
use crate::reified::codec::to_bcs_bytes;
use crate::reified::FieldValue;

/// Reference to a value in a programmable transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

/// A transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallArg {
    /// BCS-serialized value.
    Pure(Vec<u8>),
    /// Object id in full `0x` + 64 hex form.
    Object(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    /// `package::module::function`.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(MoveCall),
    MakeMoveVec {
        #[serde(rename = "type")]
        type_: Option<String>,
        elements: Vec<Argument>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

/// Builder for a [`ProgrammableTransaction`].
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

fn index(len: usize, what: &str) -> Result<u16> {
    u16::try_from(len)
        .map_err(|_| ReifiedError::InvalidArgument(format!("too many {} in transaction", what)))
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_input(&mut self, input: CallArg) -> Result<Argument> {
        let idx = index(self.inputs.len(), "inputs")?;
        self.inputs.push(input);
        Ok(Argument::Input(idx))
    }

    fn push_command(&mut self, command: Command) -> Result<Argument> {
        let idx = index(self.commands.len(), "commands")?;
        self.commands.push(command);
        Ok(Argument::Result(idx))
    }

    /// Add raw BCS bytes as a pure input.
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> Result<Argument> {
        self.push_input(CallArg::Pure(bytes))
    }

    /// Add an object input. The same object is only added once.
    pub fn object(&mut self, id: &str) -> Result<Argument> {
        let addr = parse_address(id)
            .ok_or_else(|| ReifiedError::InvalidArgument(format!("invalid object id '{}'", id)))?;
        let id = address_to_string(&addr);
        if let Some(pos) = self
            .inputs
            .iter()
            .position(|input| matches!(input, CallArg::Object(existing) if *existing == id))
        {
            return Ok(Argument::Input(index(pos, "inputs")?));
        }
        self.push_input(CallArg::Object(id))
    }

    /// Add a move call to `package::module::function`.
    pub fn move_call(
        &mut self,
        target: &str,
        type_arguments: Vec<String>,
        arguments: Vec<Argument>,
    ) -> Result<Argument> {
        let invalid_target =
            || ReifiedError::InvalidArgument(format!("invalid move call target '{}'", target));
        let mut parts = target.split("::");
        let (Some(package), Some(module), Some(function), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid_target());
        };
        let package = parse_address(package).ok_or_else(invalid_target)?;
        if !Identifier::is_valid(module) || !Identifier::is_valid(function) {
            return Err(invalid_target());
        }
        if let Some(bad) = type_arguments.iter().find(|t| parse_type_tag(t).is_none()) {
            return Err(ReifiedError::InvalidArgument(format!(
                "invalid type argument '{}' for {}",
                bad, target
            )));
        }

        self.push_command(Command::MoveCall(MoveCall {
            package: package.to_hex_literal(),
            module: module.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        }))
    }

    /// Build a vector from `elements`; `type_` is required when it is empty.
    pub fn make_move_vec(
        &mut self,
        type_: Option<String>,
        elements: Vec<Argument>,
    ) -> Result<Argument> {
        if let Some(t) = &type_ {
            if parse_type_tag(t).is_none() {
                return Err(ReifiedError::InvalidArgument(format!(
                    "invalid vector element type '{}'",
                    t
                )));
            }
        } else if elements.is_empty() {
            return Err(ReifiedError::InvalidArgument(
                "an empty MakeMoveVec needs an element type".to_string(),
            ));
        }
        self.push_command(Command::MakeMoveVec { type_, elements })
    }

    pub fn inputs(&self) -> &[CallArg] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn finish(self) -> ProgrammableTransaction {
        ProgrammableTransaction {
            inputs: self.inputs,
            commands: self.commands,
        }
    }
}

// ===== Argument marshaling =====

/// An object given by id or already present in the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectArg {
    Id(String),
    Argument(Argument),
}

impl From<&str> for ObjectArg {
    fn from(id: &str) -> Self {
        ObjectArg::Id(id.to_string())
    }
}

impl From<String> for ObjectArg {
    fn from(id: String) -> Self {
        ObjectArg::Id(id)
    }
}

impl From<AccountAddress> for ObjectArg {
    fn from(id: AccountAddress) -> Self {
        ObjectArg::Id(address_to_string(&id))
    }
}

impl From<Argument> for ObjectArg {
    fn from(arg: Argument) -> Self {
        ObjectArg::Argument(arg)
    }
}

/// A value for a pure parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PureArg {
    Value(FieldValue),
    Argument(Argument),
    /// Transaction results gathered into a vector parameter.
    Arguments(Vec<Argument>),
}

macro_rules! impl_pure_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for PureArg {
                fn from(v: $ty) -> Self {
                    PureArg::Value(v.into())
                }
            }
        )*
    };
}

impl_pure_from!(bool, u8, u16, u32, u64, u128, U256, AccountAddress, String, &str, FieldValue);

impl<T: Into<FieldValue>> From<Option<T>> for PureArg {
    fn from(v: Option<T>) -> Self {
        PureArg::Value(v.into())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for PureArg {
    fn from(v: Vec<T>) -> Self {
        PureArg::Value(v.into())
    }
}

impl From<Argument> for PureArg {
    fn from(arg: Argument) -> Self {
        PureArg::Argument(arg)
    }
}

/// An argument for a parameter whose kind depends on a type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericArg {
    Object(ObjectArg),
    Pure(PureArg),
    Vector(Vec<GenericArg>),
}

impl GenericArg {
    /// Null for an optional parameter.
    pub fn none() -> Self {
        GenericArg::Pure(PureArg::Value(FieldValue::Option(None)))
    }

    fn is_none(&self) -> bool {
        matches!(self, GenericArg::Pure(PureArg::Value(FieldValue::Option(None))))
    }

    fn as_argument(&self) -> Option<Argument> {
        match self {
            GenericArg::Object(ObjectArg::Argument(a)) | GenericArg::Pure(PureArg::Argument(a)) => {
                Some(*a)
            }
            _ => None,
        }
    }
}

impl From<ObjectArg> for GenericArg {
    fn from(arg: ObjectArg) -> Self {
        GenericArg::Object(arg)
    }
}

impl From<PureArg> for GenericArg {
    fn from(arg: PureArg) -> Self {
        GenericArg::Pure(arg)
    }
}

impl From<Argument> for GenericArg {
    fn from(arg: Argument) -> Self {
        GenericArg::Object(ObjectArg::Argument(arg))
    }
}

impl From<&str> for GenericArg {
    fn from(id: &str) -> Self {
        GenericArg::Object(id.into())
    }
}

impl From<FieldValue> for GenericArg {
    fn from(v: FieldValue) -> Self {
        GenericArg::Pure(PureArg::Value(v))
    }
}

impl From<Vec<GenericArg>> for GenericArg {
    fn from(items: Vec<GenericArg>) -> Self {
        GenericArg::Vector(items)
    }
}

fn invalid(msg: impl Into<String>) -> ReifiedError {
    ReifiedError::InvalidArgument(msg.into())
}

fn parse_compressed(type_str: &str) -> Result<TypeName> {
    let compressed =
        compress_type(type_str).map_err(|e| ReifiedError::invalid_type_name(type_str, e))?;
    parse_type_name(&compressed).map_err(|e| ReifiedError::invalid_type_name(type_str, e))
}

fn first_arg(parsed: &TypeName) -> Result<&str> {
    parsed
        .type_args
        .first()
        .map(String::as_str)
        .ok_or_else(|| invalid(format!("{} needs a type argument", parsed.name)))
}

/// Whether values of `type_str` are passed as pure inputs.
pub fn type_arg_is_pure(type_str: &str) -> bool {
    let Ok(parsed) = parse_compressed(type_str) else {
        return false;
    };
    match parsed.name.as_str() {
        "bool" | "u8" | "u16" | "u32" | "u64" | "u128" | "u256" | "address" | "signer" => true,
        STRING_TYPE | ASCII_STRING_TYPE | ID_TYPE => true,
        "vector" | OPTION_TYPE => first_arg(&parsed).is_ok_and(type_arg_is_pure),
        _ => false,
    }
}

/// Pass an object, adding it as an input when given by id.
pub fn obj(tx: &mut TransactionBuilder, arg: impl Into<ObjectArg>) -> Result<Argument> {
    match arg.into() {
        ObjectArg::Argument(a) => Ok(a),
        ObjectArg::Id(id) => tx.object(&id),
    }
}

/// Serialize `arg` as a pure input of type `type_str`.
pub fn pure(
    tx: &mut TransactionBuilder,
    arg: impl Into<PureArg>,
    type_str: &str,
) -> Result<Argument> {
    let parsed = parse_compressed(type_str)?;
    match arg.into() {
        PureArg::Argument(a) => Ok(a),
        PureArg::Arguments(items) => {
            if parsed.name != "vector" {
                return Err(invalid(format!(
                    "transaction arguments can only fill a vector, not {}",
                    type_str
                )));
            }
            let elem = first_arg(&parsed)?.to_string();
            tx.make_move_vec(Some(elem), items)
        }
        // Empty containers need no element codec.
        PureArg::Value(FieldValue::Option(None)) if parsed.name == OPTION_TYPE => {
            tx.pure_bytes(vec![0])
        }
        PureArg::Value(FieldValue::Vector(items)) if parsed.name == "vector" && items.is_empty() => {
            tx.pure_bytes(vec![0])
        }
        PureArg::Value(value) => {
            let value = coerce_pure(value, type_str)?;
            tx.pure_bytes(to_bcs_bytes(&value)?)
        }
    }
}

/// Convert `value` to the exact shape of pure type `type_str`.
fn coerce_pure(value: FieldValue, type_str: &str) -> Result<FieldValue> {
    let parsed = parse_compressed(type_str)?;
    let mismatch = |v: &FieldValue| invalid(format!("expected {}, got {}", type_str, v.kind()));

    macro_rules! int {
        ($variant:ident, $ty:ty) => {
            as_u128(&value)
                .and_then(|n| <$ty>::try_from(n).ok())
                .map(FieldValue::$variant)
                .ok_or_else(|| mismatch(&value))
        };
    }

    match parsed.name.as_str() {
        "bool" => match value {
            FieldValue::Bool(_) => Ok(value),
            other => Err(mismatch(&other)),
        },
        "u8" => int!(U8, u8),
        "u16" => int!(U16, u16),
        "u32" => int!(U32, u32),
        "u64" => int!(U64, u64),
        "u128" => int!(U128, u128),
        "u256" => match value {
            FieldValue::U256(_) => Ok(value),
            FieldValue::String(s) => U256::from_str_radix(&s, 10)
                .map(FieldValue::U256)
                .map_err(|_| invalid(format!("expected u256, got '{}'", s))),
            other => as_u128(&other)
                .map(|n| FieldValue::U256(U256::from(n)))
                .ok_or_else(|| mismatch(&other)),
        },
        "address" | ID_TYPE => match value {
            FieldValue::Address(_) => Ok(value),
            FieldValue::String(s) => parse_address(&s)
                .map(FieldValue::Address)
                .ok_or_else(|| invalid(format!("invalid address '{}'", s))),
            other => Err(mismatch(&other)),
        },
        STRING_TYPE => match value {
            FieldValue::String(_) => Ok(value),
            other => Err(mismatch(&other)),
        },
        ASCII_STRING_TYPE => match value {
            FieldValue::String(s) if s.is_ascii() => Ok(FieldValue::String(s)),
            other => Err(mismatch(&other)),
        },
        OPTION_TYPE => {
            let inner = first_arg(&parsed)?;
            match value {
                FieldValue::Option(None) => Ok(FieldValue::Option(None)),
                FieldValue::Option(Some(v)) => Ok(FieldValue::Option(Some(Box::new(
                    coerce_pure(*v, inner)?,
                )))),
                v => Ok(FieldValue::Option(Some(Box::new(coerce_pure(v, inner)?)))),
            }
        }
        "vector" => {
            let elem = first_arg(&parsed)?;
            match value {
                FieldValue::Vector(items) => items
                    .into_iter()
                    .map(|item| coerce_pure(item, elem))
                    .collect::<Result<Vec<_>>>()
                    .map(FieldValue::Vector),
                other => Err(invalid(format!(
                    "expected an array for {}, got {}",
                    type_str,
                    other.kind()
                ))),
            }
        }
        _ => Err(invalid(format!("invalid pure type {}", type_str))),
    }
}

fn as_u128(value: &FieldValue) -> Option<u128> {
    match value {
        FieldValue::U8(n) => Some(u128::from(*n)),
        FieldValue::U16(n) => Some(u128::from(*n)),
        FieldValue::U32(n) => Some(u128::from(*n)),
        FieldValue::U64(n) => Some(u128::from(*n)),
        FieldValue::U128(n) => Some(*n),
        FieldValue::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}

fn into_pure(arg: GenericArg) -> Result<PureArg> {
    match arg {
        GenericArg::Pure(p) => Ok(p),
        GenericArg::Object(ObjectArg::Argument(a)) => Ok(PureArg::Argument(a)),
        GenericArg::Object(ObjectArg::Id(s)) => Ok(PureArg::Value(FieldValue::String(s))),
        GenericArg::Vector(items) => {
            if !items.is_empty() && items.iter().all(|i| i.as_argument().is_some()) {
                return Ok(PureArg::Arguments(
                    items.iter().filter_map(GenericArg::as_argument).collect(),
                ));
            }
            let values = items
                .into_iter()
                .map(|item| match into_pure(item)? {
                    PureArg::Value(v) => Ok(v),
                    _ => Err(invalid(
                        "mixing transaction arguments with values is not supported",
                    )),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(PureArg::Value(FieldValue::Vector(values)))
        }
    }
}

fn into_object(arg: GenericArg) -> Result<ObjectArg> {
    match arg {
        GenericArg::Object(o) => Ok(o),
        GenericArg::Pure(PureArg::Argument(a)) => Ok(ObjectArg::Argument(a)),
        GenericArg::Pure(PureArg::Value(FieldValue::String(id))) => Ok(ObjectArg::Id(id)),
        GenericArg::Pure(PureArg::Value(FieldValue::Address(id))) => Ok(id.into()),
        other => Err(invalid(format!("expected an object argument, got {:?}", other))),
    }
}

/// Pass `arg` for a parameter of type `type_str`: pure for pure types, a
/// `MakeMoveVec` for vectors of objects, an object otherwise.
pub fn generic(
    tx: &mut TransactionBuilder,
    type_str: &str,
    arg: impl Into<GenericArg>,
) -> Result<Argument> {
    let arg = arg.into();
    if type_arg_is_pure(type_str) {
        return pure(tx, into_pure(arg)?, type_str);
    }
    let parsed = parse_compressed(type_str)?;
    match arg {
        GenericArg::Vector(items) if parsed.name == "vector" => {
            let elements = items
                .into_iter()
                .map(|item| obj(tx, into_object(item)?))
                .collect::<Result<Vec<_>>>()?;
            tx.make_move_vec(Some(first_arg(&parsed)?.to_string()), elements)
        }
        other => obj(tx, into_object(other)?),
    }
}

/// Pass an optional value of type `type_str`.
///
/// Pure types become a pure `Option`; other types are wrapped on chain with
/// `option::none` or `option::some`.
pub fn option(
    tx: &mut TransactionBuilder,
    type_str: &str,
    arg: Option<GenericArg>,
) -> Result<Argument> {
    if let Some(a) = arg.as_ref().and_then(GenericArg::as_argument) {
        return Ok(a);
    }
    let arg = arg.filter(|a| !a.is_none());
    if type_arg_is_pure(type_str) {
        let value = match arg {
            Some(a) => into_pure(a)?,
            None => PureArg::Value(FieldValue::Option(None)),
        };
        return pure(tx, value, &format!("{}<{}>", OPTION_TYPE, type_str));
    }
    match arg {
        None => tx.move_call(OPTION_NONE_TARGET, vec![type_str.to_string()], vec![]),
        Some(a) => {
            let value = generic(tx, type_str, a)?;
            tx.move_call(OPTION_SOME_TARGET, vec![type_str.to_string()], vec![value])
        }
    }
}

/// Pass a vector of `item_type`.
pub fn vector(
    tx: &mut TransactionBuilder,
    item_type: &str,
    items: Vec<GenericArg>,
) -> Result<Argument> {
    if type_arg_is_pure(item_type) {
        let value = into_pure(GenericArg::Vector(items))?;
        return pure(tx, value, &format!("vector<{}>", item_type));
    }
    let parsed = parse_compressed(item_type)?;
    let elements = if parsed.name == OPTION_TYPE {
        let inner = first_arg(&parsed)?.to_string();
        items
            .into_iter()
            .map(|item| option(tx, &inner, Some(item)))
            .collect::<Result<Vec<_>>>()?
    } else {
        items
            .into_iter()
            .map(|item| obj(tx, into_object(item)?))
            .collect::<Result<Vec<_>>>()?
    };
    tx.make_move_vec(Some(item_type.to_string()), elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_arg_is_pure() {
        assert!(type_arg_is_pure("u64"));
        assert!(type_arg_is_pure("vector<0x1::string::String>"));
        assert!(type_arg_is_pure(
            "0x1::option::Option<0x0000000000000000000000000000000000000000000000000000000000000002::object::ID>"
        ));
        assert!(!type_arg_is_pure("0x2::coin::Coin<0x2::sui::SUI>"));
        assert!(!type_arg_is_pure("vector<0x2::coin::Coin<0x2::sui::SUI>>"));
        assert!(!type_arg_is_pure("not a type"));
    }

    #[test]
    fn test_object_inputs_are_deduplicated() {
        let mut tx = TransactionBuilder::new();
        let a = tx.object("0x5").unwrap();
        let b = tx
            .object("0x0000000000000000000000000000000000000000000000000000000000000005")
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(tx.inputs().len(), 1);
        assert!(tx.object("0xzz").is_err());
    }

    #[test]
    fn test_move_call_validates_target() {
        let mut tx = TransactionBuilder::new();
        assert!(tx.move_call("0x2::coin", vec![], vec![]).is_err());
        assert!(tx.move_call("0x2::coin::value::x", vec![], vec![]).is_err());
        assert!(tx.move_call("0x2::1coin::value", vec![], vec![]).is_err());
        assert!(tx
            .move_call("0x2::coin::value", vec!["not a type".into()], vec![])
            .is_err());
        assert_eq!(
            tx.move_call("0x2::coin::value", vec!["0x2::sui::SUI".into()], vec![])
                .unwrap(),
            Argument::Result(0)
        );
    }

    #[test]
    fn test_pure_coerces_integer_width() {
        let mut tx = TransactionBuilder::new();
        pure(&mut tx, 7u64, "u8").unwrap();
        assert_eq!(tx.inputs()[0], CallArg::Pure(vec![7]));
        assert!(pure(&mut tx, 300u64, "u8").is_err());
        pure(&mut tx, "18446744073709551615", "u64").unwrap();
        assert_eq!(tx.inputs()[1], CallArg::Pure(vec![0xff; 8]));
    }

    #[test]
    fn test_pure_empty_containers() {
        let mut tx = TransactionBuilder::new();
        pure(&mut tx, None::<u64>, "0x1::option::Option<u64>").unwrap();
        pure(&mut tx, Vec::<u8>::new(), "vector<0x2::coin::Coin<0x2::sui::SUI>>").unwrap();
        assert_eq!(
            tx.inputs(),
            &[CallArg::Pure(vec![0]), CallArg::Pure(vec![0])]
        );
    }

    #[test]
    fn test_pure_rejects_struct_types() {
        let mut tx = TransactionBuilder::new();
        let err = pure(&mut tx, 1u64, "0x2::coin::Coin<0x2::sui::SUI>").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
    }
}
