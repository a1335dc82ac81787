//! Shared types for the ob-client workspace.
//!
//! This crate holds the string-level plumbing every other crate needs:
//! address normalization, Move type-name parsing and canonicalization,
//! encoding helpers and environment-variable parsing.

pub mod address;
pub mod encoding;
pub mod env_utils;
pub mod framework;
pub mod type_parsing;

pub use address::{compress_address, parse_address};
pub use type_parsing::{
    compose_type, compress_type, parse_type_name, parse_type_tag, split_type_params,
    type_nesting_depth, TypeName, MAX_TYPE_NESTING,
};
