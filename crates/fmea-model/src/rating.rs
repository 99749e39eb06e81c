//! Ordinal S/O/D ratings and the categorical Action Priority.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A Severity, Occurrence or Detection rating on the 1-10 scale.
///
/// The only way to obtain a `Rating` is through validation, so a value of
/// this type is always within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a rating, rejecting values outside 1-10.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::RatingOutOfRange {
                value: i64::from(value),
            })
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterates every valid rating in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<u8> for Rating {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map_err(|_| ModelError::RatingOutOfRange { value })
            .and_then(Self::new)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// AIAG-VDA Action Priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionPriority {
    #[serde(rename = "H")]
    High,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Low,
}

impl ActionPriority {
    pub const ALL: [ActionPriority; 3] = [Self::High, Self::Medium, Self::Low];

    /// Single-letter code used in worksheets and serialized records.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::High => "H",
            Self::Medium => "M",
            Self::Low => "L",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Recognizes the spellings found in filled-in worksheets.
    ///
    /// Accepts the letter codes, the English words (any case) and the
    /// Chinese single-character forms used by bilingual templates.
    pub fn from_label(raw: &str) -> Option<Self> {
        let value = raw.trim();
        match value.to_ascii_uppercase().as_str() {
            "H" | "HIGH" => Some(Self::High),
            "M" | "MEDIUM" | "MED" => Some(Self::Medium),
            "L" | "LOW" => Some(Self::Low),
            _ => match value {
                "高" => Some(Self::High),
                "中" => Some(Self::Medium),
                "低" => Some(Self::Low),
                _ => None,
            },
        }
    }
}

impl FromStr for ActionPriority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| ModelError::InvalidPriority(s.to_string()))
    }
}

impl fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
