//! Address normalization utilities.
//!
//! Sui addresses are 32-byte values, but they show up in several textual forms:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix (raw BCS field maps): "2"
//!
//! On-chain type identity checks compare type strings, so every comparison goes
//! through one of the normal forms produced here.

use move_core_types::account_address::AccountAddress;

/// Strip leading zeros from an address ("0x0" when nothing is left).
///
/// This is the form used inside compressed type strings.
///
/// # Examples
///
/// ```
/// use ob_types::address::compress_address;
///
/// assert_eq!(
///     compress_address("0x0000000000000000000000000000000000000000000000000000000000000002"),
///     "0x2"
/// );
/// assert_eq!(compress_address("0x00abc"), "0xabc");
/// assert_eq!(compress_address("0x000"), "0x0");
/// ```
pub fn compress_address(addr: &str) -> String {
    let hex = strip_hex_prefix(addr.trim());
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed.to_lowercase())
    }
}

/// Parse a string address into an AccountAddress.
///
/// Accepts short and full forms, with or without the `0x` prefix. Returns
/// `None` for non-hex input or more than 32 bytes.
///
/// # Examples
///
/// ```
/// use ob_types::address::parse_address;
///
/// let addr = parse_address("0x2").unwrap();
/// assert_eq!(addr.to_hex_literal(), "0x2");
/// assert!(parse_address("not-hex").is_none());
/// ```
pub fn parse_address(addr: &str) -> Option<AccountAddress> {
    let hex = strip_hex_prefix(addr.trim());
    if hex.is_empty() || hex.len() > 64 {
        return None;
    }
    AccountAddress::from_hex_literal(&format!("0x{}", hex)).ok()
}

/// Convert an AccountAddress to its normalized full-form string.
pub fn address_to_string(addr: &AccountAddress) -> String {
    format!("0x{}", hex::encode(addr.as_ref()))
}

fn strip_hex_prefix(addr: &str) -> &str {
    addr.strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
}
