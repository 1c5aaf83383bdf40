use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BeltError {
    #[error("unknown belt rank: {0}")]
    Unknown(String),
}

/// Karate belt ranks, ordered from beginner to master.
///
/// The serialized form is the human label (`"Yellow 2"`, `"Brown 1"`, ...),
/// which is also what gets substituted into the quiz prompt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum BeltRank {
    #[default]
    White,
    Yellow,
    #[serde(rename = "Yellow 2")]
    Yellow2,
    Blue,
    Green,
    Purple,
    Brown,
    #[serde(rename = "Brown 1")]
    Brown1,
    #[serde(rename = "Brown 2")]
    Brown2,
    Black,
}

impl BeltRank {
    /// All ranks in ascending order.
    pub const ALL: [BeltRank; 10] = [
        BeltRank::White,
        BeltRank::Yellow,
        BeltRank::Yellow2,
        BeltRank::Blue,
        BeltRank::Green,
        BeltRank::Purple,
        BeltRank::Brown,
        BeltRank::Brown1,
        BeltRank::Brown2,
        BeltRank::Black,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BeltRank::White => "White",
            BeltRank::Yellow => "Yellow",
            BeltRank::Yellow2 => "Yellow 2",
            BeltRank::Blue => "Blue",
            BeltRank::Green => "Green",
            BeltRank::Purple => "Purple",
            BeltRank::Brown => "Brown",
            BeltRank::Brown1 => "Brown 1",
            BeltRank::Brown2 => "Brown 2",
            BeltRank::Black => "Black",
        }
    }

    /// Zero-based position in the ladder (White = 0, Black = 9).
    #[must_use]
    pub fn level(self) -> u8 {
        // ALL has ten entries, so the position always fits.
        BeltRank::ALL
            .iter()
            .position(|belt| *belt == self)
            .and_then(|pos| u8::try_from(pos).ok())
            .unwrap_or(0)
    }

    /// First letter of the label, used as a badge.
    #[must_use]
    pub fn initial(self) -> char {
        self.label().chars().next().unwrap_or('?')
    }
}

impl fmt::Display for BeltRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BeltRank {
    type Err = BeltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BeltRank::ALL
            .into_iter()
            .find(|belt| belt.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BeltError::Unknown(wanted.to_string()))
    }
}
