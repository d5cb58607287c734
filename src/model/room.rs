//! Room types, scoring categories and the user-placed room rectangles.

use super::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Room types that can be placed as rectangles on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    Hall,
    Entrance,
    Balcony,
    Study,
    Puja,
    Toilet,
}

impl RoomType {
    /// Get all room types in toolbar order.
    pub fn all() -> &'static [RoomType] {
        &[
            RoomType::Bedroom,
            RoomType::Bathroom,
            RoomType::Kitchen,
            RoomType::Hall,
            RoomType::Entrance,
            RoomType::Balcony,
            RoomType::Study,
            RoomType::Puja,
            RoomType::Toilet,
        ]
    }

    /// Get the display name for this room type.
    pub fn name(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Hall => "Hall",
            RoomType::Entrance => "Entrance",
            RoomType::Balcony => "Balcony",
            RoomType::Study => "Study",
            RoomType::Puja => "Puja",
            RoomType::Toilet => "Toilet",
        }
    }

    /// Two-letter prefix used in area labels (`BR1`, `KT2`, ...).
    pub fn prefix(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "BR",
            RoomType::Bathroom => "BA",
            RoomType::Kitchen => "KT",
            RoomType::Hall => "HL",
            RoomType::Entrance => "EN",
            RoomType::Balcony => "BL",
            RoomType::Study => "ST",
            RoomType::Puja => "PJ",
            RoomType::Toilet => "TL",
        }
    }

    /// Translucent fill colour (RGBA) for this room type.
    pub fn color(&self) -> [u8; 4] {
        match self {
            RoomType::Bedroom => [99, 102, 241, 64],
            RoomType::Bathroom => [16, 185, 129, 64],
            RoomType::Kitchen => [14, 165, 233, 64],
            RoomType::Hall => [234, 179, 8, 64],
            RoomType::Entrance => [34, 197, 94, 64],
            RoomType::Balcony => [107, 114, 128, 51],
            RoomType::Study => [59, 130, 246, 64],
            RoomType::Puja => [236, 72, 153, 64],
            RoomType::Toilet => [239, 68, 68, 64],
        }
    }

    /// Marker colour for a free-text room label; unknown labels get [`DEFAULT_ROOM_COLOR`].
    pub fn color_for_label(label: &str) -> [u8; 4] {
        Self::from_name(label).map_or(DEFAULT_ROOM_COLOR, |t| t.color())
    }

    /// Look up a room type by its display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fill colour for room labels that are not one of the known types.
pub const DEFAULT_ROOM_COLOR: [u8; 4] = [148, 163, 184, 51];

/// Guidance category a free-text room type is scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    Bedroom,
    Kitchen,
    Dining,
    Toilet,
    #[serde(rename = "Living Room")]
    LivingRoom,
}

impl RoomCategory {
    /// Get all categories.
    pub fn all() -> &'static [RoomCategory] {
        &[
            RoomCategory::Bedroom,
            RoomCategory::Kitchen,
            RoomCategory::Dining,
            RoomCategory::Toilet,
            RoomCategory::LivingRoom,
        ]
    }

    /// Name of the guidance set holding this category's data.
    pub fn name(&self) -> &'static str {
        match self {
            RoomCategory::Bedroom => "Bedroom",
            RoomCategory::Kitchen => "Kitchen",
            RoomCategory::Dining => "Dining",
            RoomCategory::Toilet => "Toilet",
            RoomCategory::LivingRoom => "Living Room",
        }
    }

    /// Map a free-text room type onto a category.
    ///
    /// Substring rules are checked in order and the first match wins; anything
    /// unmatched is a living room. Matching is case-sensitive and permissive, so
    /// "Non-Bedroom Storage" is still a bedroom.
    pub fn from_room_type(room_type: &str) -> Self {
        if room_type.contains("Bedroom") || room_type.contains("Master") {
            RoomCategory::Bedroom
        } else if room_type.contains("Kitchen") {
            RoomCategory::Kitchen
        } else if room_type.contains("Dining") {
            RoomCategory::Dining
        } else if room_type.contains("Toilet") || room_type.contains("Bathroom") {
            RoomCategory::Toilet
        } else {
            RoomCategory::LivingRoom
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labelled room rectangle placed on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomArea {
    /// Unique key, `"{type}-{ordinal}"`.
    pub key: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// 1-based per-type counter shown in the label.
    pub index: u32,
    pub color: [u8; 4],
    pub rect: Rect,
}

impl RoomArea {
    pub fn new(key: impl Into<String>, room_type: RoomType, index: u32, rect: Rect) -> Self {
        Self {
            key: key.into(),
            room_type,
            index,
            color: room_type.color(),
            rect,
        }
    }

    /// Short label drawn in the middle of the rectangle, e.g. `BR2`.
    pub fn label(&self) -> String {
        format!("{}{}", self.room_type.prefix(), self.index)
    }

    /// Scoring category for this area.
    pub fn category(&self) -> RoomCategory {
        RoomCategory::from_room_type(self.room_type.name())
    }
}
