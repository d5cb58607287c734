//! Vastu - floor-plan annotation and placement scoring
//!
//! The core of a floor-plan Vastu tool: capture a boundary and its centroid,
//! place a North marker, classify points into 16 compass sectors, and score
//! room placements against a guidance catalog.

pub mod analysis;
pub mod compass;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod guidance;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;

pub use analysis::{DetectedRoom, RoomSize, VisionAnalysis};
pub use compass::{CompassFrame, point_to_direction};
pub use config::{AppConfig, ConfigError, LogLevel};
pub use error::{Error, Result};
pub use guidance::{GuidanceCatalog, GuidanceEntry};
pub use model::{DirectionLabel, ImageSize, Point, Rect, RoomArea, RoomCategory, RoomType};
pub use report::{ReportAssembler, VastuReport};
pub use scoring::{PlacementAnalysis, PlacementStatus, ScoringEngine};
pub use session::{AnnotationSession, InteractionMode, SessionError, SessionSnapshot};

/// Load the guidance catalog configured in `config`, or the built-in one.
pub fn load_catalog(config: &AppConfig) -> Result<GuidanceCatalog> {
    match &config.guidance_dir {
        Some(dir) => GuidanceCatalog::from_dir(dir),
        None => GuidanceCatalog::builtin(),
    }
}
