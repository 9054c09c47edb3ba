//! Key and index names.

use dialecta_core::common::KEY_NAME_REGEX;
use dialecta_core::config::KEY_DIGEST_LENGTH;
use lazy_static::lazy_static;
use regex::Regex;
use sha1::{Digest, Sha1};

lazy_static! {
    /// `name(10)`: an index name carrying a column prefix length.
    static ref INDEX_PREFIX_REGEX: Regex = Regex::new(r"^(.+)\(([0-9]+)\)$").unwrap();
}

/// Bounds a generated key name to `max_len` characters.
///
/// Longer names become up to `prefix_len` sanitized characters of the first
/// field followed by the SHA-1 hex digest of the full name. The prefix is cut
/// further when it would push the result past `max_len`.
pub fn shorten_key_name(
    key_name: String,
    fields: &[&str],
    max_len: usize,
    prefix_len: usize,
) -> String {
    if key_name.chars().count() <= max_len {
        return key_name;
    }

    let digest = Sha1::digest(key_name.as_bytes());
    let first_field = fields.first().copied().unwrap_or_default();
    let prefix: String = KEY_NAME_REGEX
        .replace_all(first_field, "_")
        .chars()
        .take(prefix_len.min(max_len.saturating_sub(KEY_DIGEST_LENGTH)))
        .collect();

    format!("{prefix}{digest:x}")
}

/// Splits `name(10)` into `name` and `column(10)`.
pub fn normalize_index_and_column(index: &str, column: &str) -> (String, String) {
    INDEX_PREFIX_REGEX.captures(index).map_or_else(
        || (index.to_string(), column.to_string()),
        |caps| (caps[1].to_string(), format!("{column}({})", &caps[2])),
    )
}
