//! LIMIT and OFFSET values.
//!
//! Callers hand paging values over either as integers or as text taken from
//! a request. Text is parsed with [`parse_int`].

use std::fmt;

use crate::error::{DialectError, Result};

/// A LIMIT or OFFSET value before it is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingValue {
    /// Integer value.
    Int(i64),
    /// Text that should hold an integer.
    Text(String),
}

impl fmt::Display for PagingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PagingValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PagingValue {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(v) => Self::Int(v),
                        Err(_) => Self::Text(value.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<&str> for PagingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PagingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Reads a paging value as an integer.
///
/// Text accepts an optional sign, the `0x`, `0o` and `0b` prefixes, a
/// leading `0` for octal and `_` between digits.
///
/// # Errors
///
/// Returns `DialectError::InvalidInteger` for text that does not parse.
pub fn parse_int(value: &PagingValue) -> Result<i64> {
    match value {
        PagingValue::Int(v) => Ok(*v),
        PagingValue::Text(s) => parse_prefixed(s).ok_or_else(|| DialectError::InvalidInteger {
            value: s.clone(),
        }),
    }
}

fn parse_prefixed(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits, prefixed) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest, true)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest, true)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest, true)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..], true)
    } else {
        (10, lower.as_str(), false)
    };

    if !valid_underscores(digits, prefixed) {
        return None;
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || cleaned.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = i128::from(u64::from_str_radix(&cleaned, radix).ok()?);
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).ok()
}

/// `_` may only separate digits, or follow a base prefix.
fn valid_underscores(digits: &str, prefixed: bool) -> bool {
    if !digits.contains('_') {
        return true;
    }
    let bytes = digits.as_bytes();
    if bytes.last() == Some(&b'_') || digits.contains("__") {
        return false;
    }
    prefixed || bytes.first() != Some(&b'_')
}
