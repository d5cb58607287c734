//! Rooms reported by the external floor-plan detector, and their placement on the image.
//!
//! Detected rooms carry their centre as percentages of the analysed image.
//! Everything geometric converts them to pixels against the image's natural
//! size first.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{LOCATION_PADDING_PERCENT, ROOM_MARKER_HIT_SCALE, ROOM_PERCENT_RANGE};
use crate::error::Result;
use crate::model::ImageSize;

/// Rough room size as reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomSize {
    Small,
    Medium,
    Large,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One room found by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedRoom {
    #[serde(rename = "type", default)]
    pub room_type: String,
    /// Horizontal centre in percent of the image width.
    #[serde(default)]
    pub x: Option<f64>,
    /// Vertical centre in percent of the image height.
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub size: RoomSize,
    /// Free-text position such as `top-left`, used when coordinates are missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl DetectedRoom {
    pub fn new(room_type: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            room_type: room_type.into(),
            x: Some(x),
            y: Some(y),
            size: RoomSize::Unknown,
            location: None,
        }
    }

    /// Centre in percent; falls back to the location text when coordinates are missing.
    pub fn percent_position(&self) -> (f64, f64) {
        match (self.x, self.y) {
            (Some(x), Some(y)) => (x, y),
            _ => location_to_percent(self.location.as_deref()),
        }
    }

    /// Centre in pixels of an image of `size`.
    pub fn pixel_position(&self, size: ImageSize) -> (f64, f64) {
        percent_to_pixel(self.percent_position(), size)
    }
}

/// Result of one detector run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysis {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rooms: Vec<DetectedRoom>,
    /// Defaults to the number of rooms when missing or zero.
    #[serde(default)]
    pub total_rooms: usize,
    #[serde(default)]
    pub floor_plan_type: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DetectedRoom>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DetectedRoom>>::deserialize(deserializer)?.unwrap_or_default())
}

impl VisionAnalysis {
    /// Parse a detector result.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut analysis: Self = serde_json::from_str(json)?;
        if analysis.total_rooms == 0 {
            analysis.total_rooms = analysis.rooms.len();
        }
        log::debug!(
            "Vision result: {} rooms, plan type {:?}",
            analysis.rooms.len(),
            analysis.floor_plan_type
        );
        Ok(analysis)
    }

    /// Parse a detector reply that may wrap the JSON in prose or a fenced code block.
    pub fn from_response_text(text: &str) -> Result<Self> {
        Self::from_json(extract_json(text))
    }

    /// Index of the first room whose marker contains `point` (image pixels).
    ///
    /// The marker radius is `radius_fraction` of the smaller image side, and a
    /// press counts within 1.5 times that radius.
    pub fn room_at(&self, point: (f64, f64), size: ImageSize, radius_fraction: f64) -> Option<usize> {
        let radius = marker_radius(size, radius_fraction) * ROOM_MARKER_HIT_SCALE;
        self.rooms.iter().position(|room| {
            let (rx, ry) = room.pixel_position(size);
            (point.0 - rx).hypot(point.1 - ry) <= radius
        })
    }

    /// Move room `index` to `point` (image pixels), keeping it inside the 5-95% band.
    ///
    /// Returns `false` for an out-of-range index.
    pub fn drag_room(&mut self, index: usize, point: (f64, f64), size: ImageSize) -> bool {
        let Some(room) = self.rooms.get_mut(index) else {
            return false;
        };
        let (px, py) = pixel_to_percent(point, size);
        let (lo, hi) = ROOM_PERCENT_RANGE;
        room.x = Some(px.clamp(lo, hi));
        room.y = Some(py.clamp(lo, hi));
        true
    }
}

/// Drawn marker radius for an image of `size`.
pub fn marker_radius(size: ImageSize, radius_fraction: f64) -> f64 {
    f64::from(size.width.min(size.height)) * radius_fraction
}

/// Percent coordinates to pixels of an image of `size`.
pub fn percent_to_pixel(percent: (f64, f64), size: ImageSize) -> (f64, f64) {
    (
        percent.0 / 100.0 * f64::from(size.width),
        percent.1 / 100.0 * f64::from(size.height),
    )
}

/// Pixels to percent coordinates of an image of `size`. A zero dimension maps to 50%.
pub fn pixel_to_percent(pixel: (f64, f64), size: ImageSize) -> (f64, f64) {
    let axis = |value: f64, extent: u32| {
        if extent == 0 {
            50.0
        } else {
            value / f64::from(extent) * 100.0
        }
    };
    (axis(pixel.0, size.width), axis(pixel.1, size.height))
}

/// Named positions, compound names first so `bottom-left` is not read as `left`.
const LOCATIONS: [(&str, Anchor, Anchor); 11] = [
    ("top-left", Anchor::Start, Anchor::Start),
    ("top-right", Anchor::End, Anchor::Start),
    ("bottom-left", Anchor::Start, Anchor::End),
    ("bottom-right", Anchor::End, Anchor::End),
    ("top-center", Anchor::Middle, Anchor::Start),
    ("bottom-center", Anchor::Middle, Anchor::End),
    ("top", Anchor::Middle, Anchor::Start),
    ("bottom", Anchor::Middle, Anchor::End),
    ("left", Anchor::Start, Anchor::Middle),
    ("right", Anchor::End, Anchor::Middle),
    ("center", Anchor::Middle, Anchor::Middle),
];

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn percent(self) -> f64 {
        match self {
            Anchor::Start => LOCATION_PADDING_PERCENT,
            Anchor::Middle => 50.0,
            Anchor::End => 100.0 - LOCATION_PADDING_PERCENT,
        }
    }
}

/// Percent position for a free-text location; unknown or missing text is the centre.
pub fn location_to_percent(text: Option<&str>) -> (f64, f64) {
    let text = text.unwrap_or("center").to_lowercase();
    LOCATIONS
        .iter()
        .find(|(name, _, _)| text.contains(name))
        .map_or((50.0, 50.0), |(_, x, y)| (x.percent(), y.percent()))
}

/// The JSON object inside a detector reply.
///
/// Prefers the contents of a fenced code block, then the span from the first
/// `{` to the last `}`, then the whole text.
fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```") {
        let body = &text[start + 3..];
        let body = body.strip_prefix("json").unwrap_or(body);
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rooms": [
            {"type": "Master Bedroom", "x": 20, "y": 30, "size": "large"},
            {"type": "Kitchen", "x": 75, "y": 25, "size": "medium"},
            {"type": "Toilet", "x": 85, "y": 40, "size": "tiny"}
        ],
        "floorPlanType": "apartment",
        "additionalNotes": "observations"
    }"#;

    #[test]
    fn test_parse_result_and_default_total() {
        let analysis = VisionAnalysis::from_json(SAMPLE).expect("valid json");
        assert_eq!(analysis.rooms.len(), 3);
        assert_eq!(analysis.total_rooms, 3);
        assert_eq!(analysis.rooms[0].room_type, "Master Bedroom");
        assert_eq!(analysis.rooms[0].size, RoomSize::Large);
        assert_eq!(analysis.rooms[2].size, RoomSize::Unknown);
        assert_eq!(analysis.floor_plan_type.as_deref(), Some("apartment"));
    }

    #[test]
    fn test_missing_or_null_rooms() {
        let analysis = VisionAnalysis::from_json(r#"{"floorPlanType": "villa"}"#).expect("valid");
        assert!(analysis.rooms.is_empty());
        assert_eq!(analysis.total_rooms, 0);

        let analysis = VisionAnalysis::from_json(r#"{"rooms": null, "totalRooms": 4}"#).expect("valid");
        assert!(analysis.rooms.is_empty());
        assert_eq!(analysis.total_rooms, 4);
    }

    #[test]
    fn test_response_text_extraction() {
        let fenced = format!("Here you go:\n```json\n{SAMPLE}\n```\nDone.");
        assert_eq!(
            VisionAnalysis::from_response_text(&fenced).expect("fenced").rooms.len(),
            3
        );

        let prose = format!("Result: {SAMPLE} (end)");
        assert_eq!(
            VisionAnalysis::from_response_text(&prose).expect("raw").rooms.len(),
            3
        );

        assert!(VisionAnalysis::from_response_text("no json here").is_err());
    }

    #[test]
    fn test_percent_to_pixel_uses_natural_size() {
        let room = DetectedRoom::new("Kitchen", 75.0, 25.0);
        assert_eq!(room.pixel_position(ImageSize::new(1200, 800)), (900.0, 200.0));
        assert_eq!(
            pixel_to_percent((900.0, 200.0), ImageSize::new(1200, 800)),
            (75.0, 25.0)
        );
    }

    #[test]
    fn test_location_fallback_is_deterministic() {
        assert_eq!(location_to_percent(Some("Top-Left corner")), (15.0, 15.0));
        assert_eq!(location_to_percent(Some("bottom-left")), (15.0, 85.0));
        assert_eq!(location_to_percent(Some("bottom-center")), (50.0, 85.0));
        assert_eq!(location_to_percent(Some("right side")), (85.0, 50.0));
        assert_eq!(location_to_percent(Some("top")), (50.0, 15.0));
        assert_eq!(location_to_percent(Some("somewhere")), (50.0, 50.0));
        assert_eq!(location_to_percent(None), (50.0, 50.0));

        let mut room = DetectedRoom::new("Study", 0.0, 0.0);
        room.x = None;
        room.location = Some("bottom-right".to_string());
        assert_eq!(room.percent_position(), (85.0, 85.0));
        assert_eq!(room.percent_position(), room.percent_position());
    }

    #[test]
    fn test_room_hit_test_first_match_wins() {
        let size = ImageSize::new(1000, 500);
        let analysis = VisionAnalysis {
            rooms: vec![
                DetectedRoom::new("Bedroom", 50.0, 50.0),
                DetectedRoom::new("Hall", 51.0, 50.0),
                DetectedRoom::new("Kitchen", 10.0, 10.0),
            ],
            ..Default::default()
        };
        // Radius 500 * 0.04 = 20, hit radius 30.
        assert_eq!(analysis.room_at((500.0, 250.0), size, 0.04), Some(0));
        assert_eq!(analysis.room_at((529.0, 250.0), size, 0.04), Some(0));
        assert_eq!(analysis.room_at((535.0, 250.0), size, 0.04), Some(1));
        assert_eq!(analysis.room_at((100.0, 50.0), size, 0.04), Some(2));
        assert_eq!(analysis.room_at((800.0, 400.0), size, 0.04), None);
    }

    #[test]
    fn test_drag_clamps_to_band() {
        let size = ImageSize::new(400, 200);
        let mut analysis = VisionAnalysis {
            rooms: vec![DetectedRoom::new("Puja", 50.0, 50.0)],
            ..Default::default()
        };
        assert!(analysis.drag_room(0, (100.0, 150.0), size));
        assert_eq!(analysis.rooms[0].percent_position(), (25.0, 75.0));

        assert!(analysis.drag_room(0, (-40.0, 500.0), size));
        assert_eq!(analysis.rooms[0].percent_position(), (5.0, 95.0));

        assert!(!analysis.drag_room(3, (0.0, 0.0), size));
    }
}
