//! Placement scoring: (room type, direction) to zone, score and colour band.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::guidance::{GuidanceCatalog, GuidanceEntry};
use crate::model::{DirectionLabel, RoomCategory, round_half_up};

/// Score at or above which a placement counts as a strength.
pub const EXCELLENT_THRESHOLD: u8 = 80;
/// Score at or below which a placement counts as critical.
pub const POOR_THRESHOLD: u8 = 25;
/// Placements scoring below this get their remedies surfaced.
pub const REMEDY_THRESHOLD: u8 = 60;

/// Qualitative verdict for a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementStatus {
    Excellent,
    Good,
    Neutral,
    NotIdeal,
    Poor,
    Critical,
    Unknown,
    NotAnalyzed,
}

impl PlacementStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlacementStatus::Excellent => "Excellent",
            PlacementStatus::Good => "Good",
            PlacementStatus::Neutral => "Neutral",
            PlacementStatus::NotIdeal => "Not Ideal",
            PlacementStatus::Poor => "Poor",
            PlacementStatus::Critical => "Critical",
            PlacementStatus::Unknown => "Unknown",
            PlacementStatus::NotAnalyzed => "Not Analyzed",
        }
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display colour attached to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Green,
    Lime,
    Yellow,
    Orange,
    Red,
    DarkRed,
    Gray,
}

impl ColorBand {
    /// Hex colour used when painting this band.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorBand::Green => "#22c55e",
            ColorBand::Lime => "#84cc16",
            ColorBand::Yellow => "#eab308",
            ColorBand::Orange => "#f97316",
            ColorBand::Red => "#ef4444",
            ColorBand::DarkRed => "#dc2626",
            ColorBand::Gray => "#6b7280",
        }
    }
}

/// Status, score and colour for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRating {
    pub status: PlacementStatus,
    pub score: u8,
    pub color_band: ColorBand,
}

impl ZoneRating {
    const fn new(status: PlacementStatus, score: u8, color_band: ColorBand) -> Self {
        Self {
            status,
            score,
            color_band,
        }
    }

    /// Rating used when there is no guidance for a room category at all.
    pub const NOT_ANALYZED: ZoneRating =
        ZoneRating::new(PlacementStatus::NotAnalyzed, 50, ColorBand::Gray);
}

/// Fixed mapping from zone text to rating. This table is the only source of scores.
pub fn rate_zone(zone: &str) -> ZoneRating {
    match zone.trim().to_lowercase().as_str() {
        "best" | "ideal" => ZoneRating::new(PlacementStatus::Excellent, 100, ColorBand::Green),
        "good" => ZoneRating::new(PlacementStatus::Good, 80, ColorBand::Lime),
        "neutral" => ZoneRating::new(PlacementStatus::Neutral, 50, ColorBand::Yellow),
        "not ideal" => ZoneRating::new(PlacementStatus::NotIdeal, 35, ColorBand::Orange),
        "bad" => ZoneRating::new(PlacementStatus::Poor, 25, ColorBand::Red),
        "very bad" => ZoneRating::new(PlacementStatus::Critical, 10, ColorBand::DarkRed),
        _ => ZoneRating::new(PlacementStatus::Unknown, 50, ColorBand::Gray),
    }
}

/// Result of scoring one room in one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementAnalysis {
    pub category: RoomCategory,
    /// Direction that was asked about.
    pub direction: DirectionLabel,
    /// Direction whose entry was used; `N` on fallback, `None` when not analysed.
    pub matched_direction: Option<DirectionLabel>,
    pub status: PlacementStatus,
    pub score: u8,
    pub color_band: ColorBand,
    pub zone: String,
    pub element: String,
    pub planet: String,
    pub effects: Vec<String>,
    pub remedies: Vec<String>,
    pub colors_favorable: Vec<String>,
    pub colors_avoid: Vec<String>,
}

impl PlacementAnalysis {
    fn from_entry(
        category: RoomCategory,
        direction: DirectionLabel,
        matched: DirectionLabel,
        entry: &GuidanceEntry,
    ) -> Self {
        let rating = rate_zone(&entry.zone);
        Self {
            category,
            direction,
            matched_direction: Some(matched),
            status: rating.status,
            score: rating.score,
            color_band: rating.color_band,
            zone: entry.zone.clone(),
            element: entry.element.clone(),
            planet: entry.planet.clone(),
            effects: entry.effects.clone(),
            remedies: entry.remedies().cloned().collect(),
            colors_favorable: entry.colors_favorable.clone(),
            colors_avoid: entry.colors_avoid.clone(),
        }
    }

    fn not_analyzed(category: RoomCategory, direction: DirectionLabel) -> Self {
        let rating = ZoneRating::NOT_ANALYZED;
        Self {
            category,
            direction,
            matched_direction: None,
            status: rating.status,
            score: rating.score,
            color_band: rating.color_band,
            zone: "Unknown".to_string(),
            element: "Unknown".to_string(),
            planet: String::new(),
            effects: Vec::new(),
            remedies: Vec::new(),
            colors_favorable: Vec::new(),
            colors_avoid: Vec::new(),
        }
    }

    pub fn is_excellent(&self) -> bool {
        self.score >= EXCELLENT_THRESHOLD
    }

    pub fn is_poor(&self) -> bool {
        self.score <= POOR_THRESHOLD
    }

    /// Whether remedies should be shown for this placement.
    pub fn needs_remedies(&self) -> bool {
        self.score < REMEDY_THRESHOLD && !self.remedies.is_empty()
    }
}

/// Overall verdict for a whole floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            ScoreBand::Good
        } else if score >= 50 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

/// Scores room placements against a [`GuidanceCatalog`].
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: GuidanceCatalog,
}

impl ScoringEngine {
    pub fn new(catalog: GuidanceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &GuidanceCatalog {
        &self.catalog
    }

    /// Entry for a category and direction, falling back to the category's `N` entry.
    pub fn lookup(
        &self,
        category: RoomCategory,
        direction: DirectionLabel,
    ) -> Option<(DirectionLabel, &GuidanceEntry)> {
        let set = self.catalog.category(category)?;
        set.get(direction.as_str())
            .map(|entry| (direction, entry))
            .or_else(|| {
                set.get(DirectionLabel::N.as_str())
                    .map(|entry| (DirectionLabel::N, entry))
            })
    }

    /// Score a free-text room type placed in `direction`.
    ///
    /// Never fails: a missing direction falls back to the category's `N` entry,
    /// and a category with no usable data yields a "Not Analyzed" result
    /// scoring 50.
    pub fn classify_placement(&self, room_type: &str, direction: DirectionLabel) -> PlacementAnalysis {
        let category = RoomCategory::from_room_type(room_type);
        match self.lookup(category, direction) {
            Some((matched, entry)) => {
                if matched != direction {
                    log::debug!(
                        "No {} guidance for {}, using {}",
                        category,
                        direction,
                        matched
                    );
                }
                PlacementAnalysis::from_entry(category, direction, matched, entry)
            }
            None => {
                log::debug!("No guidance for category {}", category);
                PlacementAnalysis::not_analyzed(category, direction)
            }
        }
    }
}

/// Arithmetic mean of the scores rounded to the nearest integer; 0 for no rooms.
pub fn overall_score<'a, I>(analyses: I) -> u8
where
    I: IntoIterator<Item = &'a PlacementAnalysis>,
{
    let (sum, count) = analyses
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), a| (sum + u32::from(a.score), count + 1));
    if count == 0 {
        return 0;
    }
    let mean = f64::from(sum) / f64::from(count);
    u8::try_from(round_half_up(mean)).unwrap_or(u8::MAX)
}
