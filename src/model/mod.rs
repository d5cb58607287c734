//! Data models for the floor-plan annotation core.

mod direction;
mod geometry;
mod room;

pub use direction::{DirectionLabel, ParseDirectionError, UNKNOWN_DIRECTION};
pub use geometry::{ImageSize, Point, Rect, round_half_up};
pub use room::{DEFAULT_ROOM_COLOR, RoomArea, RoomCategory, RoomType};
