//! Environment variable parsing utilities.
//!
//! ```
//! use ob_types::env_utils::{env_var, env_var_or};
//!
//! let timeout: u64 = env_var_or("OB_TEST_TIMEOUT_SECS", 30);
//! let custom: Option<u64> = env_var("OB_TEST_CUSTOM_VALUE");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Get a non-empty environment variable as a string.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("OB_TYPES_TEST_U64", " 42 ");
        assert_eq!(env_var::<u64>("OB_TYPES_TEST_U64"), Some(42));
        std::env::set_var("OB_TYPES_TEST_BAD", "forty");
        assert_eq!(env_var_or::<u64>("OB_TYPES_TEST_BAD", 7), 7);
        assert_eq!(env_var::<u64>("OB_TYPES_TEST_UNSET"), None);
    }

    #[test]
    fn test_env_string_skips_blank() {
        std::env::set_var("OB_TYPES_TEST_EMPTY", "  ");
        assert_eq!(env_string("OB_TYPES_TEST_EMPTY"), None);
        std::env::set_var("OB_TYPES_TEST_URL", "http://localhost:9000");
        assert_eq!(
            env_string("OB_TYPES_TEST_URL").as_deref(),
            Some("http://localhost:9000")
        );
    }
}
