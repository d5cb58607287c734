//! 16-sector compass math.
//!
//! Directions are measured relative to the vector from a reference centre to a
//! user-placed North marker, with an extra rotation offset applied uniformly.
//! Sectors are 22.5° wide and centred on their labels, so a point aligned with
//! the North marker classifies as `N` rather than landing on a boundary.
//!
//! Image coordinates have y growing downwards, so increasing `atan2` angles run
//! clockwise on screen, which is the order of [`DirectionLabel::ALL`].

use std::f64::consts::TAU;

use crate::model::{DirectionLabel, Point, Rect};

/// Number of compass sectors.
pub const SECTOR_COUNT: usize = 16;

/// Angular width of one sector in radians.
pub const SECTOR_WIDTH: f64 = TAU / SECTOR_COUNT as f64;

/// Reference frame for direction classification.
///
/// Every direction computed at a given moment (overlay, area labels, report
/// scoring) must use the same frame so that they agree with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassFrame {
    /// Reference centre, normally the boundary centroid.
    pub center: (f64, f64),
    /// North marker; `None` until the user places it.
    pub north: Option<(f64, f64)>,
    /// Extra rotation in degrees.
    pub rotation_deg: f64,
}

impl CompassFrame {
    pub fn new(center: (f64, f64), north: Option<(f64, f64)>, rotation_deg: f64) -> Self {
        Self {
            center,
            north,
            rotation_deg,
        }
    }

    /// Frame built from pixel points.
    pub fn from_points(center: Point, north: Option<Point>, rotation_deg: f64) -> Self {
        Self::new(center.to_f64(), north.map(Point::to_f64), rotation_deg)
    }

    /// Angle of the North marker as seen from the centre, in radians.
    pub fn north_angle(&self) -> Option<f64> {
        let (nx, ny) = self.north?;
        Some((ny - self.center.1).atan2(nx - self.center.0))
    }

    /// Classify a point. See [`point_to_direction`].
    pub fn direction_of(&self, x: f64, y: f64) -> Option<DirectionLabel> {
        point_to_direction((x, y), self)
    }

    /// Classify the centre of a rectangle. See [`dominant_direction_for_rect`].
    pub fn direction_of_rect(&self, rect: &Rect) -> Option<DirectionLabel> {
        dominant_direction_for_rect(rect, self)
    }
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Sector index (0 = N, clockwise) for an angle already measured relative to
/// North, in radians. Every finite angle maps to exactly one sector.
pub fn sector_index(relative_angle: f64) -> usize {
    let rel = normalize_angle(relative_angle + SECTOR_WIDTH / 2.0);
    (rel / SECTOR_WIDTH).floor() as usize % SECTOR_COUNT
}

/// Classify a query point into one of the 16 compass sectors.
///
/// Returns `None` when the frame has no North marker. A query point equal to
/// the centre is not an error: `atan2(0, 0)` resolves to `0`, and the result is
/// whatever sector that angle falls in.
pub fn point_to_direction(point: (f64, f64), frame: &CompassFrame) -> Option<DirectionLabel> {
    let north_angle = frame.north_angle()?;
    let query_angle = (point.1 - frame.center.1).atan2(point.0 - frame.center.0);
    let relative = query_angle - north_angle - frame.rotation_deg.to_radians();
    Some(DirectionLabel::from_index(sector_index(relative)))
}

/// Direction of a rectangle, taken at its geometric centre.
pub fn dominant_direction_for_rect(rect: &Rect, frame: &CompassFrame) -> Option<DirectionLabel> {
    point_to_direction(rect.center(), frame)
}

/// Screen angle (radians) of the centre line of each sector, in label order.
///
/// Overlays draw labels here; it is the direction a point must lie in to get
/// that label from [`point_to_direction`].
pub fn sector_label_angles(frame: &CompassFrame) -> Option<[f64; SECTOR_COUNT]> {
    let north_angle = frame.north_angle()?;
    let rotation = frame.rotation_deg.to_radians();
    Some(std::array::from_fn(|i| {
        north_angle + i as f64 * SECTOR_WIDTH + rotation
    }))
}

/// Screen angle (radians) of the boundary line preceding each sector.
///
/// Boundaries sit half a sector before the label angles; this is the same
/// half-step that [`point_to_direction`] adds, applied with the opposite sign.
pub fn sector_boundary_angles(frame: &CompassFrame) -> Option<[f64; SECTOR_COUNT]> {
    let labels = sector_label_angles(frame)?;
    Some(labels.map(|angle| angle - SECTOR_WIDTH / 2.0))
}
