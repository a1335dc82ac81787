//! OriginByte client
//!
//! Typed access to the OriginByte NFT protocol on Sui:
//!
//! - **Reified types**: runtime descriptors for Move primitives, vectors and
//!   generic structs, see [`reified`]
//! - **Decoding**: struct instances from RPC fields, typed fields, BCS and JSON
//! - **Loading**: resolve arbitrary type strings with [`loader::default_loader`]
//! - **Transactions**: move-call builders over a programmable transaction, see
//!   [`transaction`] and the per-package `functions` modules
//!
//! Struct classes for the Move stdlib and Sui framework live in [`framework`];
//! the protocol packages live in [`packages`].

#![allow(clippy::result_large_err)]

pub mod error;
pub mod fetch;
pub mod framework;
pub mod loader;
pub mod packages;
pub mod reified;
pub mod transaction;

pub use error::{ErrorKind, ReifiedError, Result};
pub use fetch::ObjectSource;
pub use loader::{default_loader, StructClassLoader, MAX_TYPE_NESTING};
pub use reified::{
    phantom, vector, FieldValue, Fields, PhantomReified, Primitive, Reified, StructClass,
    StructDescriptor, StructReified, StructValue, TypeArgument,
};
pub use transaction::{ProgrammableTransaction, TransactionBuilder};

pub use ob_transport::{JsonRpcClient, Network};
