//! Runtime type descriptors for Move values.
//!
//! Move generics are nominal and may carry phantom parameters, so a value of
//! `Coin<T>` cannot be decoded until `T` is known. A [`Reified`] is an explicit
//! type witness: it names the fully instantiated type and knows how to decode
//! and encode values of it. Struct descriptors are built once per
//! instantiation and shared behind an `Arc`.
//!
//! ```
//! use ob_client::framework::coin::Coin;
//! use ob_client::reified::phantom;
//!
//! let coin = Coin::reified(phantom("0x2::sui::SUI"));
//! assert_eq!(coin.full_type_name(), "0x2::coin::Coin<0x2::sui::SUI>");
//! ```

pub mod codec;
pub mod decode;
mod descriptor;
mod value;

use std::fmt;
use std::sync::Arc;

pub use decode::{assert_fields_with_types_args_match, assert_reified_type_args_match};
pub use descriptor::{FieldDescriptor, StructClass, StructDescriptor, StructReified};
pub use value::{FieldValue, Fields, FromFieldValue, StructValue};

/// Move primitive types that have a value representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Bool,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::U128,
        Primitive::U256,
        Primitive::Address,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::U256 => "u256",
            Primitive::Address => "address",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved Move type.
#[derive(Debug, Clone)]
pub enum Reified {
    Primitive(Primitive),
    Vector(Box<Reified>),
    Struct(Arc<StructDescriptor>),
}

impl Reified {
    /// Canonical name, e.g. `vector<0x2::coin::Coin<0x2::sui::SUI>>`.
    pub fn full_type_name(&self) -> String {
        match self {
            Reified::Primitive(p) => p.as_str().to_string(),
            Reified::Vector(elem) => format!("vector<{}>", elem.full_type_name()),
            Reified::Struct(desc) => desc.full_type_name().to_string(),
        }
    }

    pub fn as_struct(&self) -> Option<&Arc<StructDescriptor>> {
        match self {
            Reified::Struct(desc) => Some(desc),
            _ => None,
        }
    }
}

impl PartialEq for Reified {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Reified::Primitive(a), Reified::Primitive(b)) => a == b,
            (Reified::Vector(a), Reified::Vector(b)) => a == b,
            (Reified::Struct(a), Reified::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Reified {}

impl fmt::Display for Reified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_type_name())
    }
}

impl From<Primitive> for Reified {
    fn from(p: Primitive) -> Self {
        Reified::Primitive(p)
    }
}

impl From<Arc<StructDescriptor>> for Reified {
    fn from(desc: Arc<StructDescriptor>) -> Self {
        Reified::Struct(desc)
    }
}

/// `vector<T>` over any resolved element type.
pub fn vector(element: impl Into<Reified>) -> Reified {
    Reified::Vector(Box::new(element.into()))
}

/// A phantom type argument: only its name matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhantomReified {
    phantom_type: String,
}

impl PhantomReified {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            phantom_type: type_name.into(),
        }
    }

    pub fn phantom_type(&self) -> &str {
        &self.phantom_type
    }
}

impl From<&str> for PhantomReified {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PhantomReified {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Reified> for PhantomReified {
    fn from(r: &Reified) -> Self {
        Self::new(r.full_type_name())
    }
}

impl From<Reified> for PhantomReified {
    fn from(r: Reified) -> Self {
        Self::from(&r)
    }
}

impl From<Primitive> for PhantomReified {
    fn from(p: Primitive) -> Self {
        Self::new(p.as_str())
    }
}

/// Build a phantom argument from a type string or any resolved type.
pub fn phantom(type_arg: impl Into<PhantomReified>) -> PhantomReified {
    type_arg.into()
}

/// Whether a declared type parameter is phantom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeParam {
    Phantom,
    NonPhantom,
}

/// A type argument supplied when reifying a generic struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    Reified(Reified),
    Phantom(PhantomReified),
}

impl TypeArgument {
    pub fn type_name(&self) -> String {
        extract_type(self)
    }

    pub fn as_reified(&self) -> Option<&Reified> {
        match self {
            TypeArgument::Reified(r) => Some(r),
            TypeArgument::Phantom(_) => None,
        }
    }

    pub fn is_phantom(&self) -> bool {
        matches!(self, TypeArgument::Phantom(_))
    }

    pub(crate) fn into_phantom(self) -> PhantomReified {
        match self {
            TypeArgument::Reified(r) => PhantomReified::from(&r),
            TypeArgument::Phantom(p) => p,
        }
    }
}

impl From<Reified> for TypeArgument {
    fn from(r: Reified) -> Self {
        TypeArgument::Reified(r)
    }
}

impl From<Primitive> for TypeArgument {
    fn from(p: Primitive) -> Self {
        TypeArgument::Reified(p.into())
    }
}

impl From<PhantomReified> for TypeArgument {
    fn from(p: PhantomReified) -> Self {
        TypeArgument::Phantom(p)
    }
}

/// The type string of a type argument, resolved or phantom.
pub fn extract_type(arg: &TypeArgument) -> String {
    match arg {
        TypeArgument::Reified(r) => r.full_type_name(),
        TypeArgument::Phantom(p) => p.phantom_type().to_string(),
    }
}

/// Type arguments of a struct being reified, as seen by its field list.
///
/// Arity and kinds are checked before a class sees them, so the accessors
/// only panic when a class asks for a slot it did not declare.
#[derive(Debug, Clone, Copy)]
pub struct TypeArgs<'a>(&'a [TypeArgument]);

impl<'a> TypeArgs<'a> {
    pub(crate) fn new(args: &'a [TypeArgument]) -> Self {
        Self(args)
    }

    /// Resolved type of a non-phantom parameter.
    pub fn reified(&self, index: usize) -> Reified {
        match self.0.get(index) {
            Some(TypeArgument::Reified(r)) => r.clone(),
            other => panic!(
                "type parameter {} is not a resolved argument: {:?}",
                index, other
            ),
        }
    }

    /// Name of any parameter as a phantom argument.
    pub fn phantom(&self, index: usize) -> PhantomReified {
        match self.0.get(index) {
            Some(arg) => arg.clone().into_phantom(),
            None => panic!("type parameter {} was not declared", index),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
