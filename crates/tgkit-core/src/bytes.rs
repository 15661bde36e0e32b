//! Human-readable byte sizes.
//!
//! [`format_byte`] walks a 1024-based unit ladder from bytes up to `CB`
//! (1024^12); [`bytes_from_str`] reads a leading `<digits><unit>` token back,
//! but only understands `B` through `TB`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ByteSizeError;

/// Default number of decimals kept by [`format_byte`].
pub const DEFAULT_PRECISION: u32 = 2;

/// Regex for a leading size token.
static SIZE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(B|KB|MB|GB|TB)").expect("Invalid size regex"));

/// Unit suffix used for sizes below one byte (eighths of a byte).
const SUB_BYTE_SUFFIX: &str = "b";

/// A step on the binary size ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ByteUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
    EB,
    ZB,
    YB,
    BB,
    NB,
    DB,
    CB,
}

impl ByteUnit {
    /// Every unit, smallest first.
    pub const ALL: [ByteUnit; 13] = [
        Self::B,
        Self::KB,
        Self::MB,
        Self::GB,
        Self::TB,
        Self::PB,
        Self::EB,
        Self::ZB,
        Self::YB,
        Self::BB,
        Self::NB,
        Self::DB,
        Self::CB,
    ];

    /// Returns the unit suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B => "B",
            Self::KB => "KB",
            Self::MB => "MB",
            Self::GB => "GB",
            Self::TB => "TB",
            Self::PB => "PB",
            Self::EB => "EB",
            Self::ZB => "ZB",
            Self::YB => "YB",
            Self::BB => "BB",
            Self::NB => "NB",
            Self::DB => "DB",
            Self::CB => "CB",
        }
    }

    /// Returns the power of 1024 this unit stands for.
    pub fn exponent(&self) -> i32 {
        *self as i32
    }

    /// Returns the number of bytes in one of this unit.
    pub fn factor(&self) -> f64 {
        1024f64.powi(self.exponent())
    }

    /// Parses a unit suffix accepted by [`bytes_from_str`] (`B` to `TB`).
    pub fn from_parseable(s: &str) -> Option<Self> {
        match s {
            "B" => Some(Self::B),
            "KB" => Some(Self::KB),
            "MB" => Some(Self::MB),
            "GB" => Some(Self::GB),
            "TB" => Some(Self::TB),
            _ => None,
        }
    }

    /// Picks the largest unit not exceeding `size` (which must be >= 1).
    fn for_size(size: f64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|unit| size >= unit.factor())
            .unwrap_or(Self::B)
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a byte count for display.
///
/// Sizes below one byte are shown in eighths of a byte (`b`). The scaled
/// value is rounded to `precision` decimals; whole values print without a
/// fractional part.
///
/// # Errors
///
/// Returns [`ByteSizeError::Negative`] if `size` is negative or NaN.
///
/// # Example
///
/// ```
/// use tgkit_core::bytes::format_byte;
///
/// assert_eq!(format_byte(1536.0, 2).unwrap(), "1.5KB");
/// assert_eq!(format_byte(0.5, 2).unwrap(), "4b");
/// ```
pub fn format_byte(size: f64, precision: u32) -> Result<String, ByteSizeError> {
    if size.is_nan() || size < 0.0 {
        return Err(ByteSizeError::Negative(size));
    }

    if size < 1.0 {
        let eighths = round_to(size / 0.125, precision);
        return Ok(format!("{}{}", eighths, SUB_BYTE_SUFFIX));
    }

    let unit = ByteUnit::for_size(size);
    let scaled = round_to(size / unit.factor(), precision);
    Ok(format!("{}{}", scaled, unit))
}

/// Reads a leading `<digits><unit>` token as a byte count.
///
/// Returns `None` if the text does not start with such a token or the
/// count does not fit in a `u64`.
///
/// # Example
///
/// ```
/// use tgkit_core::bytes::bytes_from_str;
///
/// assert_eq!(bytes_from_str("10KB left"), Some(10 * 1024));
/// assert_eq!(bytes_from_str("about 10KB"), None);
/// ```
pub fn bytes_from_str(text: &str) -> Option<u64> {
    let caps = SIZE_REGEX.captures(text)?;
    let count: u64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = ByteUnit::from_parseable(caps.get(2)?.as_str())?;
    let multiplier = 1024u64.checked_pow(unit.exponent() as u32)?;
    count.checked_mul(multiplier)
}

fn round_to(value: f64, precision: u32) -> f64 {
    let Ok(exp) = i32::try_from(precision) else {
        return value;
    };
    let factor = 10f64.powi(exp);
    if !factor.is_finite() {
        return value;
    }
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}
