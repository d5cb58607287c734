//! The 16 compass direction labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 16 compass sectors, ordered clockwise starting at North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DirectionLabel {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

/// Text shown when no direction can be computed (North not placed yet).
pub const UNKNOWN_DIRECTION: &str = "-";

impl DirectionLabel {
    /// All labels in clockwise order from North.
    pub const ALL: [DirectionLabel; 16] = [
        DirectionLabel::N,
        DirectionLabel::Nne,
        DirectionLabel::Ne,
        DirectionLabel::Ene,
        DirectionLabel::E,
        DirectionLabel::Ese,
        DirectionLabel::Se,
        DirectionLabel::Sse,
        DirectionLabel::S,
        DirectionLabel::Ssw,
        DirectionLabel::Sw,
        DirectionLabel::Wsw,
        DirectionLabel::W,
        DirectionLabel::Wnw,
        DirectionLabel::Nw,
        DirectionLabel::Nnw,
    ];

    /// Sector index, 0 for North, increasing clockwise.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label for a sector index; wraps modulo 16.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Canonical abbreviation (`"N"`, `"NNE"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionLabel::N => "N",
            DirectionLabel::Nne => "NNE",
            DirectionLabel::Ne => "NE",
            DirectionLabel::Ene => "ENE",
            DirectionLabel::E => "E",
            DirectionLabel::Ese => "ESE",
            DirectionLabel::Se => "SE",
            DirectionLabel::Sse => "SSE",
            DirectionLabel::S => "S",
            DirectionLabel::Ssw => "SSW",
            DirectionLabel::Sw => "SW",
            DirectionLabel::Wsw => "WSW",
            DirectionLabel::W => "W",
            DirectionLabel::Wnw => "WNW",
            DirectionLabel::Nw => "NW",
            DirectionLabel::Nnw => "NNW",
        }
    }

    /// Full English name, hyphenated for the half-winds.
    pub fn name(self) -> &'static str {
        match self {
            DirectionLabel::N => "North",
            DirectionLabel::Nne => "North-Northeast",
            DirectionLabel::Ne => "Northeast",
            DirectionLabel::Ene => "East-Northeast",
            DirectionLabel::E => "East",
            DirectionLabel::Ese => "East-Southeast",
            DirectionLabel::Se => "Southeast",
            DirectionLabel::Sse => "South-Southeast",
            DirectionLabel::S => "South",
            DirectionLabel::Ssw => "South-Southwest",
            DirectionLabel::Sw => "Southwest",
            DirectionLabel::Wsw => "West-Southwest",
            DirectionLabel::W => "West",
            DirectionLabel::Wnw => "West-Northwest",
            DirectionLabel::Nw => "Northwest",
            DirectionLabel::Nnw => "North-Northwest",
        }
    }

    /// N, E, S and W.
    pub fn is_cardinal(self) -> bool {
        self.index() % 4 == 0
    }

    /// Render an optional label, using `-` for "no North yet".
    pub fn display_or_unknown(label: Option<Self>) -> &'static str {
        label.map_or(UNKNOWN_DIRECTION, Self::as_str)
    }
}

impl fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the 16 canonical abbreviations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown direction label: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for DirectionLabel {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}
