//! Sui framework constants and well-known type names.
//!
//! The decoders special-case a handful of framework types whose on-chain
//! representation differs between the raw field map, the RPC query shape and
//! the JSON projection. Their canonical (compressed) names live here.

pub const STRING_TYPE: &str = "0x1::string::String";
pub const ASCII_STRING_TYPE: &str = "0x1::ascii::String";
pub const OPTION_TYPE: &str = "0x1::option::Option";
pub const URL_TYPE: &str = "0x2::url::Url";
pub const ID_TYPE: &str = "0x2::object::ID";
pub const UID_TYPE: &str = "0x2::object::UID";
pub const BALANCE_TYPE: &str = "0x2::balance::Balance";

/// Move call targets used when wrapping non-pure optional arguments.
pub const OPTION_NONE_TARGET: &str = "0x1::option::none";
pub const OPTION_SOME_TARGET: &str = "0x1::option::some";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_are_compressed() {
        for name in [
            STRING_TYPE,
            ASCII_STRING_TYPE,
            OPTION_TYPE,
            URL_TYPE,
            ID_TYPE,
            UID_TYPE,
            BALANCE_TYPE,
        ] {
            assert_eq!(crate::compress_type(name).unwrap(), name);
        }
    }
}
