//! Error types for the reification engine.
//!
//! Every decode entry point either yields a fully valid value or one of these
//! errors. Nothing is retried or downgraded to a default.

/// Broad category of a [`ReifiedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reported type or type arguments disagree with the expected ones.
    TypeMismatch,
    /// Bytes, field maps or JSON do not fit the expected shape.
    MalformedInput,
    /// The ledger query failed or returned something that is not the object.
    UpstreamFetch,
    /// A move-call argument could not be marshaled.
    InvalidArgument,
}

/// Structured errors raised while decoding, encoding or resolving Move types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReifiedError {
    /// The reported type is not the expected struct.
    TypeMismatch {
        /// Expected type (base name or full name)
        expected: String,
        /// Type found in the input
        got: String,
    },

    /// Type argument lists disagree.
    TypeArgsMismatch {
        /// Full type name of the data being decoded
        type_name: String,
        /// Type arguments the descriptor was reified with
        expected: Vec<String>,
        /// Type arguments reported by the data
        got: Vec<String>,
    },

    /// A type string could not be parsed.
    InvalidTypeName { type_name: String, reason: String },

    /// The loader has no class registered under this name.
    UnknownType(String),

    /// The loader was asked for a type with the wrong number of arguments.
    TypeArityMismatch {
        type_name: String,
        expected: usize,
        got: usize,
    },

    /// A type string nests generics deeper than the loader accepts.
    TypeNestingTooDeep { type_name: String, limit: usize },

    /// A declared field is absent from the fields bag.
    MissingField { struct_type: String, field: String },

    /// A field value does not fit its declared type.
    InvalidField {
        /// Declared Move type of the field
        expected: String,
        /// Short description of what was found
        got: String,
    },

    /// The BCS buffer does not parse under the expected layout.
    MalformedBcs { type_name: String, reason: String },

    /// The fetched object is missing or not a Move object of the expected type.
    NotAnObject { id: String, expected: String },

    /// The ledger query reported an error.
    Fetch { id: String, reason: String },

    /// A move-call argument could not be encoded.
    InvalidArgument(String),
}

impl ReifiedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReifiedError::TypeMismatch { .. } | ReifiedError::TypeArgsMismatch { .. } => {
                ErrorKind::TypeMismatch
            }
            ReifiedError::InvalidTypeName { .. }
            | ReifiedError::UnknownType(_)
            | ReifiedError::TypeArityMismatch { .. }
            | ReifiedError::TypeNestingTooDeep { .. }
            | ReifiedError::MissingField { .. }
            | ReifiedError::InvalidField { .. }
            | ReifiedError::MalformedBcs { .. } => ErrorKind::MalformedInput,
            ReifiedError::NotAnObject { .. } | ReifiedError::Fetch { .. } => {
                ErrorKind::UpstreamFetch
            }
            ReifiedError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn invalid_field(expected: impl Into<String>, got: &serde_json::Value) -> Self {
        let mut got = got.to_string();
        if got.chars().count() > 80 {
            got = got.chars().take(77).collect();
            got.push_str("...");
        }
        ReifiedError::InvalidField {
            expected: expected.into(),
            got,
        }
    }

    pub(crate) fn invalid_type_name(type_name: &str, err: anyhow::Error) -> Self {
        ReifiedError::InvalidTypeName {
            type_name: type_name.to_string(),
            reason: err.to_string(),
        }
    }
}

impl std::fmt::Display for ReifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReifiedError::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {}", expected, got)
            }
            ReifiedError::TypeArgsMismatch {
                type_name,
                expected,
                got,
            } => {
                if expected.len() != got.len() {
                    write!(
                        f,
                        "provided item has mismatching number of type arguments: {} (expected {}, got {})",
                        type_name,
                        expected.len(),
                        got.len()
                    )
                } else {
                    write!(
                        f,
                        "provided item has mismatching type arguments: {} (expected [{}], got [{}])",
                        type_name,
                        expected.join(", "),
                        got.join(", ")
                    )
                }
            }
            ReifiedError::InvalidTypeName { type_name, reason } => {
                write!(f, "invalid type name '{}': {}", type_name, reason)
            }
            ReifiedError::UnknownType(name) => write!(f, "Unknown type {}", name),
            ReifiedError::TypeArityMismatch {
                type_name,
                expected,
                got,
            } => write!(
                f,
                "Type {} expects {} type arguments, but got {}",
                type_name, expected, got
            ),
            ReifiedError::TypeNestingTooDeep { type_name, limit } => write!(
                f,
                "type {} nests more than {} levels of type arguments",
                type_name, limit
            ),
            ReifiedError::MissingField { struct_type, field } => {
                write!(f, "missing field '{}' for {}", field, struct_type)
            }
            ReifiedError::InvalidField { expected, got } => {
                write!(f, "invalid value for {}: {}", expected, got)
            }
            ReifiedError::MalformedBcs { type_name, reason } => {
                write!(f, "malformed BCS for {}: {}", type_name, reason)
            }
            ReifiedError::NotAnObject { id, expected } => {
                write!(f, "object at id {} is not a {} object", id, expected)
            }
            ReifiedError::Fetch { id, reason } => {
                write!(f, "error fetching object at id {}: {}", id, reason)
            }
            ReifiedError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for ReifiedError {}

pub type Result<T, E = ReifiedError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kinds() {
        let mismatch = ReifiedError::TypeMismatch {
            expected: "0x2::coin::Coin".into(),
            got: "0x2::balance::Balance".into(),
        };
        assert_eq!(mismatch.kind(), ErrorKind::TypeMismatch);

        let missing = ReifiedError::MissingField {
            struct_type: "0x2::coin::Coin<0x2::sui::SUI>".into(),
            field: "balance".into(),
        };
        assert_eq!(missing.kind(), ErrorKind::MalformedInput);

        let fetch = ReifiedError::Fetch {
            id: "0x5".into(),
            reason: "notExists".into(),
        };
        assert_eq!(fetch.kind(), ErrorKind::UpstreamFetch);
    }

    #[test]
    fn test_type_args_mismatch_messages() {
        let count = ReifiedError::TypeArgsMismatch {
            type_name: "0x2::coin::Coin<u8>".into(),
            expected: vec![],
            got: vec!["u8".into()],
        };
        assert!(count.to_string().contains("mismatching number of type arguments"));

        let args = ReifiedError::TypeArgsMismatch {
            type_name: "0x2::coin::Coin<u8>".into(),
            expected: vec!["u16".into()],
            got: vec!["u8".into()],
        };
        assert!(args.to_string().contains("mismatching type arguments"));
    }

    #[test]
    fn test_invalid_field_truncates_long_values() {
        let long = json!("x".repeat(500));
        let ReifiedError::InvalidField { got, .. } = ReifiedError::invalid_field("u64", &long)
        else {
            panic!("expected InvalidField");
        };
        assert!(got.len() <= 80);
        assert!(got.ends_with("..."));
    }
}
