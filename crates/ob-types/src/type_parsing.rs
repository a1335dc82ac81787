//! Type string parsing utilities.
//!
//! Move type strings come in from three places: hand-written type arguments,
//! the `type` field of RPC query results, and the `$typeName`/`$typeArgs`
//! members of the JSON projection. Identity checks compare the *compressed*
//! form (leading address zeros stripped, no spaces between arguments), while
//! names handed back to callers use the *composed* form (`Name<A, B>`).

use anyhow::{anyhow, bail, Result};
use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::{StructTag, TypeTag};

use crate::address::compress_address;

/// Primitive Move type tokens.
pub const PRIMITIVE_TYPES: [&str; 9] = [
    "bool", "u8", "u16", "u32", "u64", "u128", "u256", "address", "signer",
];

/// Deepest generic nesting [`parse_type_name`] accepts.
///
/// Type strings arrive from RPC responses, so every recursive walk over them
/// (compression, resolution) is bounded by this.
pub const MAX_TYPE_NESTING: usize = 64;

/// A type string split into its base name and top-level type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// `u64`, `vector`, or `0x2::coin::Coin`.
    pub name: String,
    /// Top-level arguments, each still in string form.
    pub type_args: Vec<String>,
}

/// Split a type string into its base name and top-level type arguments.
///
/// # Examples
///
/// ```
/// use ob_types::parse_type_name;
///
/// let parsed = parse_type_name("0x2::vec_map::VecMap<u64, vector<0x2::sui::SUI>>").unwrap();
/// assert_eq!(parsed.name, "0x2::vec_map::VecMap");
/// assert_eq!(parsed.type_args, vec!["u64", "vector<0x2::sui::SUI>"]);
/// ```
pub fn parse_type_name(type_str: &str) -> Result<TypeName> {
    let type_str = type_str.trim();
    let depth = type_nesting_depth(type_str);
    if depth > MAX_TYPE_NESTING {
        bail!(
            "type nests {} levels deep, limit is {}",
            depth,
            MAX_TYPE_NESTING
        );
    }
    let Some(open) = type_str.find('<') else {
        if type_str.is_empty() || type_str.contains('>') || type_str.contains(',') {
            bail!("malformed type name '{}'", type_str);
        }
        return Ok(TypeName {
            name: type_str.to_string(),
            type_args: vec![],
        });
    };

    let name = type_str[..open].trim();
    let inner = type_str[open + 1..]
        .strip_suffix('>')
        .ok_or_else(|| anyhow!("unterminated type arguments in '{}'", type_str))?;
    if name.is_empty() {
        bail!("missing base name in '{}'", type_str);
    }

    let type_args = split_checked(inner)
        .ok_or_else(|| anyhow!("unbalanced type arguments in '{}'", type_str))?;
    if type_args.iter().any(|a| a.is_empty()) {
        bail!("empty type argument in '{}'", type_str);
    }

    Ok(TypeName {
        name: name.to_string(),
        type_args: type_args.into_iter().map(String::from).collect(),
    })
}

/// Recursively strip leading address zeros and argument spacing from a type.
///
/// `0x00000002::module::Name<0x00001::a::C, u64>` becomes
/// `0x2::module::Name<0x1::a::C,u64>`.
///
/// # Examples
///
/// ```
/// use ob_types::compress_type;
///
/// assert_eq!(
///     compress_type("0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x2::sui::SUI>").unwrap(),
///     "0x2::coin::Coin<0x2::sui::SUI>"
/// );
/// ```
pub fn compress_type(type_str: &str) -> Result<String> {
    let TypeName { name, type_args } = parse_type_name(type_str)?;

    if PRIMITIVE_TYPES.contains(&name.as_str()) {
        if !type_args.is_empty() {
            bail!("primitive '{}' takes no type arguments", name);
        }
        return Ok(name);
    }

    if name == "vector" {
        let [elem] = type_args.as_slice() else {
            bail!("vector expects 1 type argument, got {}", type_args.len());
        };
        return Ok(format!("vector<{}>", compress_type(elem)?));
    }

    let mut parts = name.splitn(3, "::");
    let (Some(addr), Some(module), Some(item)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected address::module::name, got '{}'", name);
    };
    let base = format!("{}::{}::{}", compress_address(addr), module, item);
    if type_args.is_empty() {
        return Ok(base);
    }

    let args = type_args
        .iter()
        .map(|a| compress_type(a))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{}<{}>", base, args.join(",")))
}

/// Compose a full type name from a base name and argument names.
///
/// # Examples
///
/// ```
/// use ob_types::compose_type;
///
/// assert_eq!(compose_type("0x2::table::Table", &["u64", "bool"]), "0x2::table::Table<u64, bool>");
/// assert_eq!(compose_type::<&str>("0x1::string::String", &[]), "0x1::string::String");
/// ```
pub fn compose_type<S: AsRef<str>>(name: &str, type_args: &[S]) -> String {
    if type_args.is_empty() {
        return name.to_string();
    }
    let args: Vec<&str> = type_args.iter().map(|a| a.as_ref()).collect();
    format!("{}<{}>", name, args.join(", "))
}

/// Parse a Move type string into a TypeTag.
///
/// Supports primitives, `vector<T>` and `0x2::module::Struct<T1, T2>`.
///
/// # Examples
///
/// ```
/// use ob_types::parse_type_tag;
///
/// let tag = parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
/// assert!(matches!(tag, move_core_types::language_storage::TypeTag::Struct(_)));
/// ```
pub fn parse_type_tag(type_str: &str) -> Option<TypeTag> {
    let TypeName { name, type_args } = parse_type_name(type_str).ok()?;

    let primitive = match name.as_str() {
        "bool" => Some(TypeTag::Bool),
        "u8" => Some(TypeTag::U8),
        "u16" => Some(TypeTag::U16),
        "u32" => Some(TypeTag::U32),
        "u64" => Some(TypeTag::U64),
        "u128" => Some(TypeTag::U128),
        "u256" => Some(TypeTag::U256),
        "address" => Some(TypeTag::Address),
        "signer" => Some(TypeTag::Signer),
        _ => None,
    };
    if let Some(tag) = primitive {
        return type_args.is_empty().then_some(tag);
    }

    if name == "vector" {
        let [elem] = type_args.as_slice() else {
            return None;
        };
        return Some(TypeTag::Vector(Box::new(parse_type_tag(elem)?)));
    }

    let parts: Vec<&str> = name.split("::").collect();
    let [address, module, struct_name] = parts.as_slice() else {
        return None;
    };

    let address = AccountAddress::from_hex_literal(address).ok()?;
    let module = Identifier::new(*module).ok()?;
    let name = Identifier::new(*struct_name).ok()?;
    let type_params = type_args
        .iter()
        .map(|a| parse_type_tag(a))
        .collect::<Option<Vec<_>>>()?;

    Some(TypeTag::Struct(Box::new(StructTag {
        address,
        module,
        name,
        type_params,
    })))
}

/// Deepest `<` nesting in a type string, without parsing it.
///
/// ```
/// use ob_types::type_parsing::type_nesting_depth;
///
/// assert_eq!(type_nesting_depth("u8"), 0);
/// assert_eq!(type_nesting_depth("0x2::table::Table<u8, vector<u8>>"), 2);
/// ```
pub fn type_nesting_depth(type_str: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in type_str.chars() {
        match c {
            '<' => {
                depth += 1;
                max = max.max(depth);
            }
            '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Split type parameters respecting nested angle brackets.
///
/// Given "A, B<C, D>, E", returns ["A", "B<C, D>", "E"] by tracking bracket depth.
pub fn split_type_params(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        result.push(s[start..].trim());
    }

    result
}

/// Like [`split_type_params`] but rejects unbalanced brackets.
fn split_checked(s: &str) -> Option<Vec<&str>> {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    if s.trim().is_empty() {
        return Some(vec![""]);
    }
    let mut parts = split_type_params(s);
    // A trailing comma leaves an empty last segment that split_type_params drops.
    if s.trim_end().ends_with(',') {
        parts.push("");
    }
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_name_nested() {
        let parsed =
            parse_type_name("0x2::table::Table<0x1::option::Option<vector<u8>>, u64>").unwrap();
        assert_eq!(parsed.name, "0x2::table::Table");
        assert_eq!(
            parsed.type_args,
            vec!["0x1::option::Option<vector<u8>>", "u64"]
        );
    }

    #[test]
    fn test_parse_type_name_rejects_malformed() {
        assert!(parse_type_name("").is_err());
        assert!(parse_type_name("0x2::coin::Coin<u64").is_err());
        assert!(parse_type_name("0x2::coin::Coin<u64>>").is_err());
        assert!(parse_type_name("0x2::coin::Coin<>").is_err());
        assert!(parse_type_name("0x2::coin::Coin<u64,>").is_err());
        assert!(parse_type_name("<u64>").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected_before_recursing() {
        let deep = format!("{}u8{}", "vector<".repeat(20_000), ">".repeat(20_000));
        assert!(parse_type_name(&deep).is_err());
        assert!(compress_type(&deep).is_err());

        let limit = format!(
            "{}u8{}",
            "vector<".repeat(MAX_TYPE_NESTING),
            ">".repeat(MAX_TYPE_NESTING)
        );
        assert_eq!(compress_type(&limit).unwrap(), limit);
    }

    #[test]
    fn test_compress_type() {
        let long = "0x0000000000000000000000000000000000000000000000000000000000000002::vec_map::VecMap<0x0000000000000000000000000000000000000000000000000000000000000001::string::String, vector<u64>>";
        assert_eq!(
            compress_type(long).unwrap(),
            "0x2::vec_map::VecMap<0x1::string::String,vector<u64>>"
        );
        assert_eq!(compress_type("u256").unwrap(), "u256");
        assert!(compress_type("vector<u8, u8>").is_err());
        assert!(compress_type("coin::Coin").is_err());
    }

    #[test]
    fn test_compose_type() {
        assert_eq!(
            compose_type("0x2::coin::Coin", &["0x2::sui::SUI"]),
            "0x2::coin::Coin<0x2::sui::SUI>"
        );
        assert_eq!(
            compose_type("0x2::vec_map::VecMap", &["u8".to_string(), "bool".to_string()]),
            "0x2::vec_map::VecMap<u8, bool>"
        );
    }

    #[test]
    fn test_parse_primitives() {
        assert!(matches!(parse_type_tag("bool"), Some(TypeTag::Bool)));
        assert!(matches!(parse_type_tag("u64"), Some(TypeTag::U64)));
        assert!(matches!(parse_type_tag("address"), Some(TypeTag::Address)));
        assert!(parse_type_tag("u64<u8>").is_none());
    }

    #[test]
    fn test_parse_struct() {
        let tag = parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
        if let TypeTag::Struct(s) = tag {
            assert_eq!(s.module.as_str(), "coin");
            assert_eq!(s.name.as_str(), "Coin");
            assert_eq!(s.type_params.len(), 1);
        } else {
            panic!("Expected struct type");
        }
        assert!(parse_type_tag("0x2::coin").is_none());
        assert!(parse_type_tag("0x2::coin::9Coin").is_none());
    }

    #[test]
    fn test_split_type_params() {
        let params = split_type_params("u64, 0x2::coin::Coin<0x2::sui::SUI>, bool");
        assert_eq!(params, vec!["u64", "0x2::coin::Coin<0x2::sui::SUI>", "bool"]);
    }
}
