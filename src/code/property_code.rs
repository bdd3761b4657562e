//! The `LOC-T-###` property code value type.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::CodeError;

/// Minimum rendered width of the sequence component.
pub const SEQUENCE_MIN_WIDTH: usize = 3;

#[allow(clippy::expect_used)]
pub static PROPERTY_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,4})-([A-Z])-(\d{3,})$").expect("property code regex is valid")
});

/// Whether `code` is 2 to 4 uppercase ASCII letters.
#[must_use]
pub fn is_location_code(code: &str) -> bool {
    (2..=4).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Whether `code` is exactly one uppercase ASCII letter.
#[must_use]
pub fn is_type_code(code: &str) -> bool {
    code.len() == 1 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Whether `code` matches `^[A-Z]{2,4}-[A-Z]-\d{3,}$`.
#[must_use]
pub fn is_valid_property_code(code: &str) -> bool {
    PROPERTY_CODE_REGEX.is_match(code)
}

/// Render a sequence zero-padded to at least three digits. Wider values are
/// never truncated.
#[must_use]
pub fn format_sequence(sequence: u64) -> String {
    format!("{sequence:0width$}", width = SEQUENCE_MIN_WIDTH)
}

/// Join a location code and a type code into the counter key.
#[must_use]
pub fn prefix_for(location_code: &str, type_code: &str) -> String {
    format!("{location_code}-{type_code}")
}

/// A formatted, validated property code such as `BLR-O-042`.
///
/// Property codes are immutable once assigned to a listing and are never
/// reissued, so the type exposes no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyCode {
    location_code: String,
    type_code: String,
    sequence: u64,
}

impl PropertyCode {
    /// Assemble a code from its parts, checking the full pattern.
    pub fn new(
        location_code: impl Into<String>,
        type_code: impl Into<String>,
        sequence: u64,
    ) -> Result<Self, CodeError> {
        let code = Self {
            location_code: location_code.into(),
            type_code: type_code.into(),
            sequence,
        };
        let rendered = code.to_string();
        if is_valid_property_code(&rendered) {
            Ok(code)
        } else {
            Err(CodeError::InvalidPropertyCode(rendered))
        }
    }

    #[must_use]
    pub fn location_code(&self) -> &str {
        &self.location_code
    }

    #[must_use]
    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The `{location}-{type}` counter key this code was drawn from.
    #[must_use]
    pub fn prefix(&self) -> String {
        prefix_for(&self.location_code, &self.type_code)
    }
}

impl fmt::Display for PropertyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.location_code,
            self.type_code,
            format_sequence(self.sequence)
        )
    }
}

impl FromStr for PropertyCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodeError::InvalidPropertyCode(s.to_string());
        let caps = PROPERTY_CODE_REGEX.captures(s).ok_or_else(invalid)?;
        let location_code = caps.get(1).ok_or_else(invalid)?.as_str();
        let type_code = caps.get(2).ok_or_else(invalid)?.as_str();
        let digits = caps.get(3).ok_or_else(invalid)?.as_str();
        let sequence = digits.parse::<u64>().map_err(|_| invalid())?;

        // Reject redundant padding such as "BLR-O-0007" so parsing and
        // rendering stay a bijection.
        if format_sequence(sequence) != digits {
            return Err(invalid());
        }

        Ok(Self {
            location_code: location_code.to_string(),
            type_code: type_code.to_string(),
            sequence,
        })
    }
}

impl Serialize for PropertyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
