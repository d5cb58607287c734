//! Pixel-space geometry primitives.

use serde::{Deserialize, Serialize};

/// Round to the nearest integer with halves going towards positive infinity.
///
/// Canvas coordinates are produced this way, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// A point in image coordinates (integer pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round floating point coordinates onto the pixel grid.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(round_half_up(x), round_half_up(y))
    }

    /// Coordinates as floats, for angle math.
    pub fn to_f64(self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }

    /// Clamp into `[0, width] x [0, height]`.
    pub fn clamp_to(self, size: ImageSize) -> Self {
        let max_x = i32::try_from(size.width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(size.height).unwrap_or(i32::MAX);
        Self::new(self.x.clamp(0, max_x), self.y.clamp(0, max_y))
    }
}

/// Natural pixel dimensions of an image (not any scaled display size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Geometric centre of the image.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Whether both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Geometric centre; may fall on a half pixel.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.w) / 2.0,
            f64::from(self.y) + f64::from(self.h) / 2.0,
        )
    }

    /// Inclusive containment test (edges count as inside).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_matches_canvas_rounding() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(49.49), 49);
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::new(10, 10, 100, 50);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(110, 60)));
        assert!(!rect.contains(Point::new(111, 60)));
        assert!(!rect.contains(Point::new(9, 30)));
    }

    #[test]
    fn test_rect_center_half_pixel() {
        let rect = Rect::new(0, 0, 5, 3);
        assert_eq!(rect.center(), (2.5, 1.5));
    }

    #[test]
    fn test_point_clamp_to_image() {
        let size = ImageSize::new(640, 480);
        assert_eq!(Point::new(-5, 500).clamp_to(size), Point::new(0, 480));
        assert_eq!(Point::new(320, 10).clamp_to(size), Point::new(320, 10));
    }
}
