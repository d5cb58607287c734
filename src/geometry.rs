//! Polygon centroid, rectangle hit-testing and corner resizing.

use serde::{Deserialize, Serialize};

use crate::model::{Point, Rect, RoomArea};

/// Minimum number of vertices for a boundary to have a centroid.
pub const MIN_BOUNDARY_POINTS: usize = 3;

/// Area-weighted centroid of a closed polygon, rounded to whole pixels.
///
/// Returns `None` for fewer than three vertices or when the signed area is
/// exactly zero (all points collinear, or a self-cancelling outline).
pub fn compute_centroid(polygon: &[Point]) -> Option<Point> {
    if polygon.len() < MIN_BOUNDARY_POINTS {
        return None;
    }

    // Integer accumulation keeps the zero-area test exact.
    let mut area_twice: i64 = 0;
    let mut cx_sum: i64 = 0;
    let mut cy_sum: i64 = 0;
    for (i, p0) in polygon.iter().enumerate() {
        let p1 = polygon[(i + 1) % polygon.len()];
        let (x0, y0) = (i64::from(p0.x), i64::from(p0.y));
        let (x1, y1) = (i64::from(p1.x), i64::from(p1.y));
        let cross = x0 * y1 - x1 * y0;
        area_twice += cross;
        cx_sum += (x0 + x1) * cross;
        cy_sum += (y0 + y1) * cross;
    }

    if area_twice == 0 {
        return None;
    }

    let denom = 3.0 * area_twice as f64;
    Some(Point::from_f64(cx_sum as f64 / denom, cy_sum as f64 / denom))
}

/// Find the top-most area containing `point`.
///
/// Areas are tested from the most recently added backwards; bounds are inclusive.
pub fn hit_test_area(areas: &[RoomArea], point: Point) -> Option<&RoomArea> {
    areas.iter().rev().find(|area| area.rect.contains(point))
}

/// One of the four corner handles of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeHandle {
    /// Handles in hit-test priority order.
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Sw,
        ResizeHandle::Se,
    ];

    /// Position of this handle on `rect`.
    pub fn position(self, rect: &Rect) -> Point {
        match self {
            ResizeHandle::Nw => Point::new(rect.x, rect.y),
            ResizeHandle::Ne => Point::new(rect.right(), rect.y),
            ResizeHandle::Sw => Point::new(rect.x, rect.bottom()),
            ResizeHandle::Se => Point::new(rect.right(), rect.bottom()),
        }
    }

    /// The diagonally opposite handle, which stays put while this one is dragged.
    pub fn opposite(self) -> Self {
        match self {
            ResizeHandle::Nw => ResizeHandle::Se,
            ResizeHandle::Ne => ResizeHandle::Sw,
            ResizeHandle::Sw => ResizeHandle::Ne,
            ResizeHandle::Se => ResizeHandle::Nw,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResizeHandle::Nw => "nw",
            ResizeHandle::Ne => "ne",
            ResizeHandle::Sw => "sw",
            ResizeHandle::Se => "se",
        }
    }

    fn moves_left_edge(self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::Sw)
    }

    fn moves_top_edge(self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::Ne)
    }
}

/// Which corner handle of `rect` (if any) is under `point`.
///
/// Each handle owns a square window of side `2 * handle_size` centred on its
/// corner; when windows overlap the first in `nw, ne, sw, se` order wins.
pub fn hit_test_resize_handle(rect: &Rect, point: Point, handle_size: i32) -> Option<ResizeHandle> {
    ResizeHandle::ALL.into_iter().find(|handle| {
        let corner = handle.position(rect);
        (point.x - corner.x).abs() <= handle_size && (point.y - corner.y).abs() <= handle_size
    })
}

/// Minimum rectangle size enforced while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinSize {
    pub w: i32,
    pub h: i32,
}

/// Drag one corner of `rect` to `pointer`, keeping the opposite corner fixed.
///
/// Width and height are clamped to `min`; when clamping applies to an edge that
/// was moving, that edge is pulled back so the fixed corner still does not move.
pub fn resize_from_handle(rect: &Rect, handle: ResizeHandle, pointer: Point, min: MinSize) -> Rect {
    let fixed = handle.opposite().position(rect);

    let (x, w) = if handle.moves_left_edge() {
        let w = (fixed.x - pointer.x).max(min.w);
        (fixed.x - w, w)
    } else {
        (fixed.x, (pointer.x - fixed.x).max(min.w))
    };

    let (y, h) = if handle.moves_top_edge() {
        let h = (fixed.y - pointer.y).max(min.h);
        (fixed.y - h, h)
    } else {
        (fixed.y, (pointer.y - fixed.y).max(min.h))
    };

    Rect::new(x, y, w, h)
}

/// Map a pointer position in displayed (CSS) pixels onto image pixels.
///
/// `display` is the on-screen size of the canvas, `image` its natural size.
pub fn display_to_image(
    pointer: (f64, f64),
    display: (f64, f64),
    image: (f64, f64),
) -> Point {
    let scale_x = if display.0 > 0.0 { image.0 / display.0 } else { 1.0 };
    let scale_y = if display.1 > 0.0 { image.1 / display.1 } else { 1.0 };
    Point::from_f64(pointer.0 * scale_x, pointer.1 * scale_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomType;

    const MIN: MinSize = MinSize { w: 40, h: 30 };

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_centroid_of_square() {
        let square = pts(&[(0, 0), (100, 0), (100, 100), (0, 100)]);
        assert_eq!(compute_centroid(&square), Some(Point::new(50, 50)));
    }

    #[test]
    fn test_centroid_independent_of_winding() {
        let ccw = pts(&[(0, 0), (0, 100), (100, 100), (100, 0)]);
        assert_eq!(compute_centroid(&ccw), Some(Point::new(50, 50)));
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        // L-shape: 100x50 bar plus 50x50 block; vertex mean would be wrong.
        let l_shape = pts(&[(0, 0), (100, 0), (100, 50), (50, 50), (50, 100), (0, 100)]);
        // Bar area 5000 centred (50,25); block area 2500 centred (25,75).
        // cx = (5000*50 + 2500*25)/7500 = 41.67, cy = (5000*25 + 2500*75)/7500 = 41.67
        assert_eq!(compute_centroid(&l_shape), Some(Point::new(42, 42)));
    }

    #[test]
    fn test_centroid_degenerate() {
        assert_eq!(compute_centroid(&[]), None);
        assert_eq!(compute_centroid(&pts(&[(0, 0), (10, 10)])), None);
        assert_eq!(compute_centroid(&pts(&[(0, 0), (10, 10), (20, 20)])), None);
        assert_eq!(compute_centroid(&pts(&[(5, 5), (5, 5), (5, 5), (5, 5)])), None);
    }

    #[test]
    fn test_centroid_inside_convex_hull() {
        let polygons = [
            pts(&[(10, 10), (300, 40), (250, 200), (30, 180)]),
            pts(&[(0, 0), (7, 1), (3, 9)]),
            pts(&[(500, 500), (620, 480), (700, 560), (650, 700), (520, 650)]),
            pts(&[(-50, -20), (40, -60), (90, 10), (0, 80), (-70, 40)]),
        ];
        for poly in &polygons {
            let c = compute_centroid(poly).expect("non-degenerate");
            // Convex polygons in clockwise or anticlockwise order: the centroid
            // is on the same side of every edge (allowing one pixel of rounding).
            let n = poly.len();
            let sign = {
                let (a, b) = (poly[0], poly[1]);
                let cross = i64::from(b.x - a.x) * i64::from(poly[2].y - a.y)
                    - i64::from(b.y - a.y) * i64::from(poly[2].x - a.x);
                cross.signum()
            };
            for i in 0..n {
                let (a, b) = (poly[i], poly[(i + 1) % n]);
                let cross = i64::from(b.x - a.x) * i64::from(c.y - a.y)
                    - i64::from(b.y - a.y) * i64::from(c.x - a.x);
                let edge_len = f64::from((b.x - a.x).pow(2) + (b.y - a.y).pow(2)).sqrt();
                let distance = cross as f64 / edge_len;
                assert!(distance * sign as f64 >= -1.0, "{c:?} outside edge {a:?}->{b:?}");
            }
        }
    }

    fn area(key: &str, rect: Rect) -> RoomArea {
        RoomArea::new(key, RoomType::Bedroom, 1, rect)
    }

    #[test]
    fn test_hit_test_area_prefers_topmost() {
        let areas = vec![
            area("Bedroom-1", Rect::new(0, 0, 100, 100)),
            area("Bedroom-2", Rect::new(50, 50, 100, 100)),
        ];
        assert_eq!(hit_test_area(&areas, Point::new(75, 75)).map(|a| a.key.as_str()), Some("Bedroom-2"));
        assert_eq!(hit_test_area(&areas, Point::new(10, 10)).map(|a| a.key.as_str()), Some("Bedroom-1"));
        // Inclusive edge of the lower area.
        assert_eq!(hit_test_area(&areas, Point::new(150, 150)).map(|a| a.key.as_str()), Some("Bedroom-2"));
        assert!(hit_test_area(&areas, Point::new(151, 10)).is_none());
    }

    #[test]
    fn test_hit_test_resize_handle() {
        let rect = Rect::new(100, 100, 80, 60);
        assert_eq!(hit_test_resize_handle(&rect, Point::new(100, 100), 12), Some(ResizeHandle::Nw));
        assert_eq!(hit_test_resize_handle(&rect, Point::new(192, 88), 12), Some(ResizeHandle::Ne));
        assert_eq!(hit_test_resize_handle(&rect, Point::new(95, 165), 12), Some(ResizeHandle::Sw));
        assert_eq!(hit_test_resize_handle(&rect, Point::new(180, 160), 12), Some(ResizeHandle::Se));
        assert_eq!(hit_test_resize_handle(&rect, Point::new(140, 130), 12), None);
        assert_eq!(hit_test_resize_handle(&rect, Point::new(113, 100), 12), None);
    }

    #[test]
    fn test_hit_test_resize_handle_overlap_order() {
        // Tiny rectangle: every window covers the centre, nw wins.
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(hit_test_resize_handle(&rect, Point::new(5, 5), 12), Some(ResizeHandle::Nw));
        assert_eq!(hit_test_resize_handle(&rect, Point::new(20, 5), 12), Some(ResizeHandle::Ne));
    }

    #[test]
    fn test_resize_keeps_opposite_corner() {
        let rect = Rect::new(100, 100, 200, 150);
        let pointers = [
            Point::new(0, 0),
            Point::new(150, 120),
            Point::new(290, 240),
            Point::new(1000, -40),
            Point::new(310, 260),
            Point::new(-500, 900),
        ];
        for handle in ResizeHandle::ALL {
            let fixed = handle.opposite().position(&rect);
            for pointer in pointers {
                let resized = resize_from_handle(&rect, handle, pointer, MIN);
                assert_eq!(handle.opposite().position(&resized), fixed, "{handle:?} to {pointer:?}");
                assert!(resized.w >= MIN.w && resized.h >= MIN.h, "{resized:?}");
            }
        }
    }

    #[test]
    fn test_resize_moves_dragged_corner_to_pointer() {
        let rect = Rect::new(100, 100, 200, 150);
        let resized = resize_from_handle(&rect, ResizeHandle::Nw, Point::new(50, 60), MIN);
        assert_eq!(resized, Rect::new(50, 60, 250, 190));
        let resized = resize_from_handle(&rect, ResizeHandle::Se, Point::new(400, 300), MIN);
        assert_eq!(resized, Rect::new(100, 100, 300, 200));
        let resized = resize_from_handle(&rect, ResizeHandle::Ne, Point::new(350, 80), MIN);
        assert_eq!(resized, Rect::new(100, 80, 250, 170));
        let resized = resize_from_handle(&rect, ResizeHandle::Sw, Point::new(90, 260), MIN);
        assert_eq!(resized, Rect::new(90, 100, 210, 160));
    }

    #[test]
    fn test_resize_clamps_past_fixed_corner() {
        let rect = Rect::new(100, 100, 200, 150);
        // Drag nw past the se corner: clamps to minimum, se stays at (300, 250).
        let resized = resize_from_handle(&rect, ResizeHandle::Nw, Point::new(400, 400), MIN);
        assert_eq!(resized, Rect::new(260, 220, 40, 30));
    }

    #[test]
    fn test_display_to_image_scaling() {
        // Canvas shown at half size.
        let p = display_to_image((100.0, 50.25), (400.0, 300.0), (800.0, 600.0));
        assert_eq!(p, Point::new(200, 101));
        // Zero-size display falls back to identity.
        assert_eq!(display_to_image((3.0, 4.0), (0.0, 0.0), (800.0, 600.0)), Point::new(3, 4));
    }
}
