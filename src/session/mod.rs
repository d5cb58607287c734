//! Annotation session: boundary capture, North placement and room rectangles.
//!
//! All mutation happens synchronously in response to user actions and pointer
//! events given in image pixel coordinates. At most one [`InteractionMode`] is
//! active at a time; drag bookkeeping lives inside the mode variant.

mod areas;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::compass::CompassFrame;
use crate::config::{AppConfig, InteractionSettings};
use crate::geometry::{self, MIN_BOUNDARY_POINTS, ResizeHandle};
use crate::model::{DirectionLabel, ImageSize, Point, Rect, RoomArea};

pub use areas::{AreaPlacement, HoverTarget};

/// Message shown before any image has been loaded.
pub const NO_IMAGE_INFO: &str = "Upload an image to get started";

/// Why a session transition was refused. State is unchanged when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Boundary has too few points for a centroid
    #[error("Need at least 3 points, have {have}")]
    NotEnoughPoints { have: usize },

    /// Boundary points enclose no area
    #[error("Boundary is degenerate (zero area), adjust the points")]
    DegenerateBoundary,

    /// North placement needs a centroid first
    #[error("Calculate the center before placing North")]
    CentroidRequired,

    /// The compass needs a North marker first
    #[error("Place the North marker first")]
    NorthNotPlaced,
}

/// Coarse progress through the workflow, for step indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Idle,
    Wall,
    Center,
    North,
}

/// The single active pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Pointer-downs select, move or resize room areas.
    #[default]
    Idle,
    /// Pointer-downs append boundary points.
    WallSelecting,
    /// Pointer-downs plant the North marker, or start dragging it.
    NorthPlacing,
    /// Dragging the North marker; `offset` is pointer minus marker at drag start.
    NorthDragging { offset: (i32, i32) },
    /// Moving the active area; `offset` is pointer minus rect origin at drag start.
    AreaMoving { offset: (i32, i32) },
    /// Resizing the active area from one corner.
    AreaResizing { handle: ResizeHandle },
}

impl InteractionMode {
    /// Whether a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            InteractionMode::NorthDragging { .. }
                | InteractionMode::AreaMoving { .. }
                | InteractionMode::AreaResizing { .. }
        )
    }

    /// Mode to return to once the pointer is released.
    fn after_release(self) -> Self {
        match self {
            InteractionMode::NorthDragging { .. } => InteractionMode::NorthPlacing,
            InteractionMode::AreaMoving { .. } | InteractionMode::AreaResizing { .. } => {
                InteractionMode::Idle
            }
            other => other,
        }
    }
}

/// User-chosen North location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NorthMarker {
    pub position: Point,
    /// Set once the user commits the marker with "show directions".
    pub fixed: bool,
}

/// Serialisable state handed from annotation to analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub image: Option<ImageSize>,
    #[serde(default)]
    pub wall_points: Vec<Point>,
    #[serde(default)]
    pub wall_centroid: Option<Point>,
    #[serde(default)]
    pub north_pos: Option<Point>,
    #[serde(default, deserialize_with = "deserialize_rotation")]
    pub direction_rotation_deg: f64,
    #[serde(default)]
    pub areas: Vec<RoomArea>,
}

impl SessionSnapshot {
    /// Frame for classifying points of an image of `size`.
    ///
    /// Uses the captured centroid, or the image centre when none was captured.
    pub fn compass_frame(&self, size: ImageSize) -> CompassFrame {
        let center = self
            .wall_centroid
            .map(Point::to_f64)
            .unwrap_or_else(|| size.center());
        CompassFrame::new(
            center,
            self.north_pos.map(Point::to_f64),
            coerce_rotation(self.direction_rotation_deg),
        )
    }
}

/// Coerce a rotation value into `[-180, 180]`; anything else becomes `0`.
pub fn coerce_rotation(value: f64) -> f64 {
    if value.is_finite() && (-180.0..=180.0).contains(&value) {
        value
    } else {
        0.0
    }
}

/// Parse free-text rotation input, coercing it like [`coerce_rotation`].
pub fn parse_rotation(text: &str) -> f64 {
    coerce_rotation(text.trim().parse::<f64>().unwrap_or(0.0))
}

/// Snapshot rotations are coerced on load; numeric strings are accepted.
fn deserialize_rotation<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map_or(0.0, coerce_rotation),
        serde_json::Value::String(text) => parse_rotation(&text),
        _ => 0.0,
    })
}

/// State of one floor-plan annotation.
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    settings: InteractionSettings,
    fallback_canvas: ImageSize,
    image: Option<ImageSize>,
    boundary: Vec<Point>,
    centroid: Option<Point>,
    north: Option<NorthMarker>,
    rotation_deg: f64,
    compass_visible: bool,
    stage: Stage,
    mode: InteractionMode,
    areas: Vec<RoomArea>,
    active_area: Option<String>,
    info: String,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl AnnotationSession {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            settings: config.interaction,
            fallback_canvas: config.fallback_canvas,
            image: None,
            boundary: Vec::new(),
            centroid: None,
            north: None,
            rotation_deg: 0.0,
            compass_visible: false,
            stage: Stage::Idle,
            mode: InteractionMode::Idle,
            areas: Vec::new(),
            active_area: None,
            info: NO_IMAGE_INFO.to_string(),
        }
    }

    // --- accessors ---

    pub fn image(&self) -> Option<ImageSize> {
        self.image
    }

    /// Size of the drawing surface: the image, or the fallback canvas.
    pub fn canvas_size(&self) -> ImageSize {
        self.image.unwrap_or(self.fallback_canvas)
    }

    pub fn boundary(&self) -> &[Point] {
        &self.boundary
    }

    pub fn centroid(&self) -> Option<Point> {
        self.centroid
    }

    pub fn north(&self) -> Option<NorthMarker> {
        self.north
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn compass_visible(&self) -> bool {
        self.compass_visible
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_selecting_walls(&self) -> bool {
        self.mode == InteractionMode::WallSelecting
    }

    /// Status line for the user.
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Whether enough has been set up to hand the plan to analysis.
    pub fn can_analyze(&self) -> bool {
        self.compass_visible
    }

    // --- image ---

    /// Start over with a new image. Clears all geometry, areas and compass state.
    pub fn set_image(&mut self, size: ImageSize) {
        let settings = self.settings;
        let fallback = self.fallback_canvas;
        *self = Self {
            settings,
            fallback_canvas: fallback,
            image: Some(size),
            info: format!("{}×{}", size.width, size.height),
            ..Self::default()
        };
        log::info!("Loaded image {}x{}", size.width, size.height);
    }

    // --- boundary ---

    /// Toggle boundary capture. Turning it on clears the existing points,
    /// turning it off keeps them.
    pub fn toggle_wall_selection(&mut self) {
        if self.is_selecting_walls() {
            self.mode = InteractionMode::Idle;
            log::debug!("Wall selection stopped with {} points", self.boundary.len());
        } else {
            self.begin_wall_selection();
        }
        self.stage = Stage::Wall;
    }

    /// Enter boundary capture, discarding any existing points.
    pub fn begin_wall_selection(&mut self) {
        self.end_drag();
        self.boundary.clear();
        self.mode = InteractionMode::WallSelecting;
        self.stage = Stage::Wall;
        log::debug!("Wall selection started");
    }

    /// Drop all boundary points without changing mode.
    pub fn clear_points(&mut self) {
        self.boundary.clear();
        self.info = "0 points selected".to_string();
    }

    /// Compute the boundary centroid and leave wall selection.
    ///
    /// Refused with state unchanged if the boundary has fewer than three
    /// points or encloses no area.
    pub fn derive_centroid(&mut self) -> Result<Point, SessionError> {
        let have = self.boundary.len();
        let result = if have < MIN_BOUNDARY_POINTS {
            Err(SessionError::NotEnoughPoints { have })
        } else {
            geometry::compute_centroid(&self.boundary).ok_or(SessionError::DegenerateBoundary)
        };

        match result {
            Ok(centroid) => {
                self.centroid = Some(centroid);
                self.stage = Stage::Center;
                if self.is_selecting_walls() {
                    self.mode = InteractionMode::Idle;
                }
                self.info = "Center calculated".to_string();
                log::info!("Centroid at ({}, {}) from {} points", centroid.x, centroid.y, have);
                Ok(centroid)
            }
            Err(e) => {
                log::warn!("Centroid refused: {}", e);
                self.info = e.to_string();
                Err(e)
            }
        }
    }

    // --- north ---

    /// Enter North placement. Reopens an already fixed marker for dragging.
    pub fn begin_north_placement(&mut self) -> Result<(), SessionError> {
        if self.centroid.is_none() {
            log::warn!("North placement refused: no centroid");
            return Err(SessionError::CentroidRequired);
        }
        self.end_drag();
        if let Some(north) = self.north.as_mut() {
            north.fixed = false;
        }
        self.stage = Stage::North;
        self.mode = InteractionMode::NorthPlacing;
        log::debug!("North placement started");
        Ok(())
    }

    /// Commit the North marker and show the compass.
    pub fn fix_north(&mut self) -> Result<(), SessionError> {
        let Some(north) = self.north.as_mut() else {
            log::warn!("Show directions refused: no North marker");
            return Err(SessionError::NorthNotPlaced);
        };
        north.fixed = true;
        self.compass_visible = true;
        if matches!(
            self.mode,
            InteractionMode::NorthPlacing | InteractionMode::NorthDragging { .. }
        ) {
            self.mode = InteractionMode::Idle;
        }
        log::info!("North fixed at ({}, {})", north.position.x, north.position.y);
        Ok(())
    }

    /// Set the compass rotation. Values outside `[-180, 180]` become `0`.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_deg = coerce_rotation(degrees);
    }

    /// Set the rotation from free text. Unparseable input becomes `0`.
    pub fn set_rotation_input(&mut self, text: &str) {
        self.rotation_deg = parse_rotation(text);
    }

    // --- pointer events ---

    /// Route a pointer press at `point` (image pixels) to the current mode.
    pub fn pointer_down(&mut self, point: Point) {
        if self.mode.is_dragging() {
            log::warn!("Pointer down while a drag is still active, forcing end");
            self.end_drag();
        }

        match self.mode {
            InteractionMode::WallSelecting => {
                self.boundary.push(point);
                self.info = format!("{} points selected", self.boundary.len());
            }
            InteractionMode::NorthPlacing => match self.north {
                None => {
                    self.north = Some(NorthMarker {
                        position: point,
                        fixed: false,
                    });
                    self.info =
                        "North placed. Drag to adjust, then click \"Show 16 Directions\"".to_string();
                    log::debug!("North placed at ({}, {})", point.x, point.y);
                }
                Some(marker) => {
                    let offset = (point.x - marker.position.x, point.y - marker.position.y);
                    self.mode = InteractionMode::NorthDragging { offset };
                }
            },
            InteractionMode::Idle => self.area_pointer_down(point),
            InteractionMode::NorthDragging { .. }
            | InteractionMode::AreaMoving { .. }
            | InteractionMode::AreaResizing { .. } => {}
        }
    }

    /// Continue the active drag, if any. Returns whether anything moved.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.mode {
            InteractionMode::NorthDragging { offset } => {
                let canvas = self.canvas_size();
                let Some(north) = self.north.as_mut() else {
                    return false;
                };
                let next = Point::new(point.x - offset.0, point.y - offset.1).clamp_to(canvas);
                let changed = next != north.position;
                north.position = next;
                changed
            }
            InteractionMode::AreaMoving { offset } => self.update_active_rect(|rect| {
                Rect::new(point.x - offset.0, point.y - offset.1, rect.w, rect.h)
            }),
            InteractionMode::AreaResizing { handle } => {
                let min = self.settings.min_size();
                self.update_active_rect(|rect| geometry::resize_from_handle(rect, handle, point, min))
            }
            _ => false,
        }
    }

    /// Release the pointer. Always ends any drag.
    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// The pointer left the canvas; treated like a release.
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        if self.mode.is_dragging() {
            log::debug!("Drag ended: {:?}", self.mode);
            self.mode = self.mode.after_release();
        }
    }

    // --- directions ---

    /// The frame every direction in this session is computed in.
    ///
    /// Centred on the centroid, or on the canvas centre before one exists.
    pub fn compass_frame(&self) -> CompassFrame {
        let center = self
            .centroid
            .map(Point::to_f64)
            .unwrap_or_else(|| self.canvas_size().center());
        CompassFrame::new(
            center,
            self.north.map(|n| n.position.to_f64()),
            self.rotation_deg,
        )
    }

    /// Direction of the centre of `rect`, or `None` before North is placed.
    pub fn direction_of_rect(&self, rect: &Rect) -> Option<DirectionLabel> {
        self.compass_frame().direction_of_rect(rect)
    }

    /// State to hand over to analysis.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            image: self.image,
            wall_points: self.boundary.clone(),
            wall_centroid: self.centroid,
            north_pos: self.north.map(|n| n.position),
            direction_rotation_deg: self.rotation_deg,
            areas: self.areas.clone(),
        }
    }
}
