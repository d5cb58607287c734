//! Report data: detected rooms with their Vastu direction and placement score.
//!
//! Only the data is assembled here; laying it out as a document is left to the
//! caller.

use serde::{Deserialize, Serialize};

use crate::analysis::{DetectedRoom, RoomSize, VisionAnalysis};
use crate::analysis::marker_radius;
use crate::compass::CompassFrame;
use crate::constants::ROOM_MARKER_RADIUS_FRACTION;
use crate::model::{DirectionLabel, ImageSize, Point, RoomType};
use crate::scoring::{
    self, EXCELLENT_THRESHOLD, POOR_THRESHOLD, PlacementAnalysis, ScoreBand, ScoringEngine,
};
use crate::session::{AreaPlacement, SessionSnapshot};

/// One detected room in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReport {
    #[serde(rename = "type")]
    pub room_type: String,
    pub x: f64,
    pub y: f64,
    pub size: RoomSize,
    /// Marker fill colour (RGBA).
    pub color: [u8; 4],
    /// Direction from the compass, `None` when no North marker was placed.
    pub vastu_direction: Option<DirectionLabel>,
    /// Direction the room was scored in; `N` when the compass gave none.
    pub direction: DirectionLabel,
    pub analysis: PlacementAnalysis,
}

impl RoomReport {
    /// Short description used in issue lists, e.g. `Kitchen in NE (Very Bad)`.
    pub fn headline(&self) -> String {
        format!("{} in {} ({})", self.room_type, self.direction, self.analysis.zone)
    }
}

/// Remedies for a room that scored below the remedy threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemedyNote {
    pub room: String,
    pub direction: DirectionLabel,
    pub remedies: Vec<String>,
}

/// Aggregate figures over all detected rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Rounded mean of the room scores, 0 without rooms.
    pub overall_score: u8,
    pub band: ScoreBand,
    pub excellent_count: usize,
    pub acceptable_count: usize,
    pub poor_count: usize,
    /// Headlines of rooms scoring at or below the poor threshold.
    pub critical: Vec<String>,
    /// Headlines of rooms scoring at or above the excellent threshold.
    pub strengths: Vec<String>,
}

impl ReportSummary {
    pub fn from_rooms(rooms: &[RoomReport]) -> Self {
        let overall_score = scoring::overall_score(rooms.iter().map(|r| &r.analysis));
        let excellent: Vec<_> = rooms.iter().filter(|r| r.analysis.is_excellent()).collect();
        let poor: Vec<_> = rooms.iter().filter(|r| r.analysis.is_poor()).collect();
        let acceptable_count = rooms
            .iter()
            .filter(|r| r.analysis.score > POOR_THRESHOLD && r.analysis.score < EXCELLENT_THRESHOLD)
            .count();

        Self {
            overall_score,
            band: ScoreBand::from_score(overall_score),
            excellent_count: excellent.len(),
            acceptable_count,
            poor_count: poor.len(),
            critical: poor.iter().map(|r| r.headline()).collect(),
            strengths: excellent
                .iter()
                .map(|r| format!("{} in {} - {}", r.room_type, r.direction, r.analysis.zone))
                .collect(),
        }
    }
}

/// Everything a report renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VastuReport {
    pub image: ImageSize,
    pub floor_plan_type: Option<String>,
    pub additional_notes: Option<String>,
    pub total_rooms: usize,
    pub north: Option<Point>,
    pub rotation_deg: f64,
    /// Room marker radius in image pixels.
    pub marker_radius: f64,
    pub rooms: Vec<RoomReport>,
    /// Areas drawn by hand during annotation; not part of the summary.
    pub annotated_areas: Vec<AreaPlacement>,
    pub remedies: Vec<RemedyNote>,
    pub summary: ReportSummary,
}

/// Combines detector output, annotation state and guidance into a [`VastuReport`].
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'a> {
    engine: &'a ScoringEngine,
    marker_radius_fraction: f64,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(engine: &'a ScoringEngine) -> Self {
        Self {
            engine,
            marker_radius_fraction: ROOM_MARKER_RADIUS_FRACTION,
        }
    }

    /// Size room markers as this fraction of the smaller image side.
    pub fn with_marker_radius_fraction(mut self, fraction: f64) -> Self {
        self.marker_radius_fraction = fraction;
        self
    }

    /// Build the report for an image of natural size `image`.
    ///
    /// Every direction is computed in the snapshot's compass frame, centred on
    /// the captured centroid or, without one, on the image centre.
    pub fn assemble(
        &self,
        analysis: &VisionAnalysis,
        snapshot: &SessionSnapshot,
        image: ImageSize,
    ) -> VastuReport {
        let frame = snapshot.compass_frame(image);
        if frame.north.is_none() {
            log::warn!("No North marker; rooms are scored as facing N");
        }

        let rooms: Vec<RoomReport> = analysis
            .rooms
            .iter()
            .map(|room| self.room_report(room, &frame, image))
            .collect();

        let annotated_areas = AreaPlacement::for_areas(&snapshot.areas, &frame, self.engine);

        let remedies = rooms
            .iter()
            .filter(|r| r.analysis.needs_remedies())
            .map(|r| RemedyNote {
                room: r.room_type.clone(),
                direction: r.direction,
                remedies: r.analysis.remedies.clone(),
            })
            .collect();

        let summary = ReportSummary::from_rooms(&rooms);
        log::info!(
            "Report: {} rooms, overall score {} ({:?})",
            rooms.len(),
            summary.overall_score,
            summary.band
        );

        VastuReport {
            image,
            floor_plan_type: analysis.floor_plan_type.clone(),
            additional_notes: analysis.additional_notes.clone(),
            total_rooms: analysis.total_rooms,
            north: snapshot.north_pos,
            rotation_deg: frame.rotation_deg,
            marker_radius: marker_radius(image, self.marker_radius_fraction),
            rooms,
            annotated_areas,
            remedies,
            summary,
        }
    }

    fn room_report(&self, room: &DetectedRoom, frame: &CompassFrame, image: ImageSize) -> RoomReport {
        let (x, y) = room.percent_position();
        let (px, py) = room.pixel_position(image);
        let vastu_direction = frame.direction_of(px, py);
        let direction = vastu_direction.unwrap_or(DirectionLabel::N);
        RoomReport {
            room_type: room.room_type.clone(),
            x,
            y,
            size: room.size,
            color: RoomType::color_for_label(&room.room_type),
            vastu_direction,
            direction,
            analysis: self.engine.classify_placement(&room.room_type, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::GuidanceCatalog;
    use crate::model::{Rect, RoomArea, RoomType};
    use crate::scoring::PlacementStatus;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(GuidanceCatalog::builtin().expect("builtin data"))
    }

    /// 200x200 image, centroid in the middle, North straight up.
    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            image: Some(ImageSize::new(200, 200)),
            wall_points: Vec::new(),
            wall_centroid: Some(Point::new(100, 100)),
            north_pos: Some(Point::new(100, 0)),
            direction_rotation_deg: 0.0,
            areas: Vec::new(),
        }
    }

    fn analysis(rooms: Vec<DetectedRoom>) -> VisionAnalysis {
        VisionAnalysis {
            total_rooms: rooms.len(),
            rooms,
            floor_plan_type: Some("apartment".to_string()),
            additional_notes: None,
        }
    }

    #[test]
    fn test_rooms_get_directions_and_scores() {
        let engine = engine();
        let assembler = ReportAssembler::new(&engine);
        let analysis = analysis(vec![
            DetectedRoom::new("Kitchen", 90.0, 90.0),        // SE: Best
            DetectedRoom::new("Master Bedroom", 10.0, 90.0), // SW: Good
            DetectedRoom::new("Toilet", 90.0, 10.0),         // NE: Very Bad
        ]);
        let report = assembler.assemble(&analysis, &snapshot(), ImageSize::new(200, 200));

        let directions: Vec<_> = report.rooms.iter().map(|r| r.vastu_direction).collect();
        assert_eq!(
            directions,
            [
                Some(DirectionLabel::Se),
                Some(DirectionLabel::Sw),
                Some(DirectionLabel::Ne)
            ]
        );
        let scores: Vec<_> = report.rooms.iter().map(|r| r.analysis.score).collect();
        assert_eq!(scores, [100, 80, 10]);

        // (100 + 80 + 10) / 3 = 63.33
        let summary = &report.summary;
        assert_eq!(summary.overall_score, 63);
        assert_eq!(summary.band, ScoreBand::Fair);
        assert_eq!(summary.excellent_count, 2);
        assert_eq!(summary.acceptable_count, 0);
        assert_eq!(summary.poor_count, 1);
        assert_eq!(summary.critical, ["Toilet in NE (Very Bad)"]);
        assert_eq!(summary.strengths.len(), 2);

        assert_eq!(report.remedies.len(), 1);
        assert_eq!(report.remedies[0].room, "Toilet");
        assert_eq!(report.floor_plan_type.as_deref(), Some("apartment"));
    }

    #[test]
    fn test_without_north_rooms_score_as_north() {
        let engine = engine();
        let mut snapshot = snapshot();
        snapshot.north_pos = None;
        let report = ReportAssembler::new(&engine).assemble(
            &analysis(vec![DetectedRoom::new("Kitchen", 90.0, 90.0)]),
            &snapshot,
            ImageSize::new(200, 200),
        );
        let room = &report.rooms[0];
        assert_eq!(room.vastu_direction, None);
        assert_eq!(room.direction, DirectionLabel::N);
        assert_eq!(room.analysis.status, PlacementStatus::Poor);
    }

    #[test]
    fn test_missing_centroid_uses_image_center() {
        let engine = engine();
        let mut snapshot = snapshot();
        snapshot.wall_centroid = None;
        // Image is 400x200 so its centre is (200, 100); North straight up from there.
        snapshot.north_pos = Some(Point::new(200, 0));
        let report = ReportAssembler::new(&engine).assemble(
            &analysis(vec![DetectedRoom::new("Dining", 25.0, 50.0)]),
            &snapshot,
            ImageSize::new(400, 200),
        );
        assert_eq!(report.rooms[0].vastu_direction, Some(DirectionLabel::W));
    }

    #[test]
    fn test_empty_analysis() {
        let engine = engine();
        let report = ReportAssembler::new(&engine).assemble(
            &VisionAnalysis::default(),
            &snapshot(),
            ImageSize::new(200, 200),
        );
        assert!(report.rooms.is_empty());
        assert_eq!(report.summary.overall_score, 0);
        assert_eq!(report.summary.band, ScoreBand::Poor);
        assert!(report.remedies.is_empty());
    }

    #[test]
    fn test_acceptable_band_and_remedies_threshold() {
        let engine = engine();
        let report = ReportAssembler::new(&engine).assemble(
            &analysis(vec![
                DetectedRoom::new("Dining", 50.0, 10.0),  // N: Not Ideal, 35
                DetectedRoom::new("Kitchen", 10.0, 50.0), // W: Neutral, 50
            ]),
            &snapshot(),
            ImageSize::new(200, 200),
        );
        let scores: Vec<_> = report.rooms.iter().map(|r| r.analysis.score).collect();
        assert_eq!(scores, [35, 50]);
        assert_eq!(report.summary.acceptable_count, 2);
        assert_eq!(report.summary.overall_score, 43);
        assert_eq!(report.summary.band, ScoreBand::Poor);
        assert_eq!(report.remedies.len(), 2);
    }

    #[test]
    fn test_annotated_areas_share_frame() {
        let engine = engine();
        let mut snapshot = snapshot();
        snapshot.areas.push(RoomArea::new(
            "Kitchen-1",
            RoomType::Kitchen,
            1,
            Rect::new(140, 140, 40, 40),
        ));
        let report = ReportAssembler::new(&engine).assemble(
            &VisionAnalysis::default(),
            &snapshot,
            ImageSize::new(200, 200),
        );
        let area = &report.annotated_areas[0];
        assert_eq!(area.label, "KT1");
        assert_eq!(area.direction, Some(DirectionLabel::Se));
        assert_eq!(area.analysis.as_ref().map(|a| a.score), Some(100));
        assert_eq!(report.summary.overall_score, 0);
    }

    #[test]
    fn test_out_of_range_rotation_is_ignored() {
        let engine = engine();
        let mut snapshot = snapshot();
        snapshot.direction_rotation_deg = 270.0;
        let report = ReportAssembler::new(&engine).assemble(
            &analysis(vec![DetectedRoom::new("Kitchen", 50.0, 10.0)]),
            &snapshot,
            ImageSize::new(200, 200),
        );
        assert_eq!(report.rotation_deg, 0.0);
        assert_eq!(report.rooms[0].vastu_direction, Some(DirectionLabel::N));
    }

    #[test]
    fn test_marker_radius_and_colors() {
        let engine = engine();
        let rooms = analysis(vec![
            DetectedRoom::new("Kitchen", 50.0, 50.0),
            DetectedRoom::new("Dining", 20.0, 20.0),
        ]);
        let size = ImageSize::new(400, 200);

        let report = ReportAssembler::new(&engine).assemble(&rooms, &snapshot(), size);
        assert_eq!(report.marker_radius, 8.0);
        assert_eq!(report.rooms[0].color, RoomType::Kitchen.color());
        assert_eq!(report.rooms[1].color, crate::model::DEFAULT_ROOM_COLOR);

        let report = ReportAssembler::new(&engine)
            .with_marker_radius_fraction(0.1)
            .assemble(&rooms, &snapshot(), size);
        assert_eq!(report.marker_radius, 20.0);
    }
}
