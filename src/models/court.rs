//! Court positions and game halves.

use crate::models::session::SessionError;
use serde::{Deserialize, Serialize};

/// One of the five on-court slots, in lineup order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// All positions in the order starting players are assigned to them.
    pub const ALL: [Position; 5] = [
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
        Position::C,
    ];

    /// Number of on-court slots.
    pub const COUNT: usize = Self::ALL.len();

    pub fn as_str(self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game half. Serialized as the number 1 or 2.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Half {
    #[default]
    First,
    Second,
}

impl Half {
    pub const ALL: [Half; 2] = [Half::First, Half::Second];

    pub fn number(self) -> u8 {
        match self {
            Half::First => 1,
            Half::Second => 2,
        }
    }
}

impl TryFrom<u8> for Half {
    type Error = SessionError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Half::First),
            2 => Ok(Half::Second),
            other => Err(SessionError::InvalidHalf(other)),
        }
    }
}

impl From<Half> for u8 {
    fn from(half: Half) -> u8 {
        half.number()
    }
}
