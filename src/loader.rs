//! Resolve type strings to descriptors at runtime.
//!
//! Struct classes are registered under their compressed base name. A type
//! string such as `0x2::coin::Coin<0x2::sui::SUI>` is compressed, split into
//! its base name and arguments, and rebuilt bottom-up.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use ob_types::{compose_type, compress_type, parse_type_name, type_nesting_depth, TypeName};
use tracing::{debug, warn};

use crate::error::{ReifiedError, Result};
use crate::reified::{
    vector, PhantomReified, Primitive, Reified, StructClass, StructDescriptor, TypeArgument,
    TypeParam,
};

pub use ob_types::MAX_TYPE_NESTING;

type ReifyFn = fn(Vec<TypeArgument>) -> Result<Arc<StructDescriptor>>;

struct ClassEntry {
    type_params: &'static [TypeParam],
    reify: ReifyFn,
}

/// Registry of struct classes keyed by base type name.
#[derive(Default)]
pub struct StructClassLoader {
    classes: HashMap<String, ClassEntry>,
}

impl StructClassLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: StructClass>(&mut self) {
        let key = compress_type(S::TYPE_NAME).unwrap_or_else(|_| S::TYPE_NAME.to_string());
        debug!(type_name = %key, "registering struct class");
        self.classes.insert(
            key,
            ClassEntry {
                type_params: S::TYPE_PARAMS,
                reify: StructDescriptor::reify::<S>,
            },
        );
    }

    pub fn contains(&self, type_name: &str) -> bool {
        compress_type(type_name).is_ok_and(|key| self.classes.contains_key(&key))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve a type string to a descriptor.
    ///
    /// Phantom arguments are not resolved; they only need a canonical name
    /// and may name types this loader has never seen.
    pub fn reified(&self, type_str: &str) -> Result<Reified> {
        ensure_nesting(type_str)?;
        let compressed =
            compress_type(type_str).map_err(|e| ReifiedError::invalid_type_name(type_str, e))?;
        self.resolve(&compressed).inspect_err(|e| {
            warn!(type_str, error = %e, "type resolution failed");
        })
    }

    fn resolve(&self, type_str: &str) -> Result<Reified> {
        let TypeName { name, type_args } =
            parse_type_name(type_str).map_err(|e| ReifiedError::invalid_type_name(type_str, e))?;

        if let Some(p) = Primitive::from_name(&name) {
            return Ok(p.into());
        }
        if name == "vector" {
            let [elem] = type_args.as_slice() else {
                return Err(ReifiedError::TypeArityMismatch {
                    type_name: name,
                    expected: 1,
                    got: type_args.len(),
                });
            };
            return Ok(vector(self.resolve(elem)?));
        }

        let entry = self
            .classes
            .get(&name)
            .ok_or_else(|| ReifiedError::UnknownType(name.clone()))?;
        if entry.type_params.len() != type_args.len() {
            return Err(ReifiedError::TypeArityMismatch {
                type_name: name,
                expected: entry.type_params.len(),
                got: type_args.len(),
            });
        }

        let args = entry
            .type_params
            .iter()
            .zip(&type_args)
            .map(|(param, arg)| match param {
                TypeParam::Phantom => canonical_name(arg).map(|n| PhantomReified::new(n).into()),
                TypeParam::NonPhantom => self.resolve(arg).map(TypeArgument::Reified),
            })
            .collect::<Result<Vec<_>>>()?;
        (entry.reify)(args).map(Reified::Struct)
    }
}

/// Rejoin a compressed type string with `, ` separators.
fn canonical_name(type_str: &str) -> Result<String> {
    let TypeName { name, type_args } =
        parse_type_name(type_str).map_err(|e| ReifiedError::invalid_type_name(type_str, e))?;
    let args = type_args
        .iter()
        .map(|a| canonical_name(a))
        .collect::<Result<Vec<_>>>()?;
    Ok(compose_type(&name, &args))
}

/// Reject a data-provided type string nested deeper than [`MAX_TYPE_NESTING`].
pub(crate) fn ensure_nesting(type_str: &str) -> Result<()> {
    if type_nesting_depth(type_str) > MAX_TYPE_NESTING {
        return Err(ReifiedError::TypeNestingTooDeep {
            type_name: type_str.to_string(),
            limit: MAX_TYPE_NESTING,
        });
    }
    Ok(())
}

/// Loader with every struct class shipped by this crate.
pub fn default_loader() -> &'static StructClassLoader {
    static LOADER: OnceLock<StructClassLoader> = OnceLock::new();
    LOADER.get_or_init(|| {
        let mut loader = StructClassLoader::new();
        crate::framework::register_classes(&mut loader);
        crate::packages::register_classes(&mut loader);
        debug!(classes = loader.len(), "default struct class loader ready");
        loader
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_primitives_and_vectors() {
        let loader = StructClassLoader::new();
        assert_eq!(loader.reified("u64").unwrap(), Reified::from(Primitive::U64));
        assert_eq!(
            loader.reified("vector<vector<u8>>").unwrap().full_type_name(),
            "vector<vector<u8>>"
        );
    }

    #[test]
    fn test_unknown_type() {
        let err = StructClassLoader::new()
            .reified("0x2::coin::Coin<0x2::sui::SUI>")
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown type 0x2::coin::Coin");
    }

    #[test]
    fn test_arity_mismatch_message() {
        let err = default_loader()
            .reified("0x2::coin::Coin<0x2::sui::SUI, u8>")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type 0x2::coin::Coin expects 1 type arguments, but got 2"
        );
    }

    #[test]
    fn test_padded_addresses_resolve_to_canonical_names() {
        let reified = default_loader()
            .reified("0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x02::sui::SUI>")
            .unwrap();
        assert_eq!(reified.full_type_name(), "0x2::coin::Coin<0x2::sui::SUI>");
    }

    #[test]
    fn test_phantom_args_keep_spacing() {
        let reified = default_loader()
            .reified("0x2::table::Table<0x2::vec_map::VecMap<u8,u8>, u64>")
            .unwrap();
        assert_eq!(
            reified.full_type_name(),
            "0x2::table::Table<0x2::vec_map::VecMap<u8, u8>, u64>"
        );
    }

    #[test]
    fn test_nesting_cap() {
        let deep = format!("{}u8{}", "vector<".repeat(65), ">".repeat(65));
        assert!(matches!(
            StructClassLoader::new().reified(&deep),
            Err(ReifiedError::TypeNestingTooDeep { limit: 64, .. })
        ));
        let ok = format!("{}u8{}", "vector<".repeat(64), ">".repeat(64));
        assert!(StructClassLoader::new().reified(&ok).is_ok());
    }
}
