//! Default tunables for the annotation session and report placement.

/// Half-size of the square hit window around each resize handle
pub const HANDLE_SIZE: i32 = 12;

/// Minimum room rectangle width after a resize
pub const MIN_AREA_WIDTH: i32 = 40;

/// Minimum room rectangle height after a resize
pub const MIN_AREA_HEIGHT: i32 = 30;

/// Size of a newly added area relative to the canvas, `[width, height]`
pub const DEFAULT_AREA_FRACTION: [f64; 2] = [0.15, 0.12];

/// Lower bound for a newly added area, `[width, height]`
pub const DEFAULT_AREA_MIN: [i32; 2] = [80, 60];

/// Canvas width assumed while no image is loaded
pub const FALLBACK_CANVAS_WIDTH: u32 = 800;

/// Canvas height assumed while no image is loaded
pub const FALLBACK_CANVAS_HEIGHT: u32 = 600;

/// Detected-room dot radius as a fraction of the smaller image side
pub const ROOM_MARKER_RADIUS_FRACTION: f64 = 0.04;

/// Dot hit radius is this many times the drawn radius
pub const ROOM_MARKER_HIT_SCALE: f64 = 1.5;

/// Detected-room percentages are clamped to this range while dragging
pub const ROOM_PERCENT_RANGE: (f64, f64) = (5.0, 95.0);

/// Inset used when placing rooms from a location description, in percent
pub const LOCATION_PADDING_PERCENT: f64 = 15.0;
