//! Room rectangles inside an annotation session.

use serde::{Deserialize, Serialize};

use super::{AnnotationSession, InteractionMode};
use crate::compass::CompassFrame;
use crate::geometry::{self, ResizeHandle};
use crate::model::{DirectionLabel, Point, Rect, RoomArea, RoomType, round_half_up};
use crate::scoring::{PlacementAnalysis, ScoringEngine};

/// What lies under the pointer, for cursor feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// A corner handle of the area under the pointer.
    Handle(ResizeHandle),
    /// The body of an area.
    Area,
}

/// Direction and score of one placed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaPlacement {
    pub key: String,
    pub label: String,
    pub direction: Option<DirectionLabel>,
    /// `None` until a North marker exists.
    pub analysis: Option<PlacementAnalysis>,
}

impl AreaPlacement {
    /// Classify and score `area` in `frame`.
    pub fn new(area: &RoomArea, frame: &CompassFrame, engine: &ScoringEngine) -> Self {
        let direction = frame.direction_of_rect(&area.rect);
        Self {
            key: area.key.clone(),
            label: area.label(),
            direction,
            analysis: direction.map(|dir| engine.classify_placement(area.room_type.name(), dir)),
        }
    }

    /// Placements of every area, in insertion order.
    pub fn for_areas(areas: &[RoomArea], frame: &CompassFrame, engine: &ScoringEngine) -> Vec<Self> {
        areas
            .iter()
            .map(|area| Self::new(area, frame, engine))
            .collect()
    }
}

impl AnnotationSession {
    pub fn areas(&self) -> &[RoomArea] {
        &self.areas
    }

    pub fn active_area_key(&self) -> Option<&str> {
        self.active_area.as_deref()
    }

    pub fn active_area(&self) -> Option<&RoomArea> {
        let key = self.active_area.as_deref()?;
        self.areas.iter().find(|a| a.key == key)
    }

    /// Add an area of `room_type` centred on the canvas and make it active.
    ///
    /// The label index is one more than the number of existing areas of that
    /// type. The key starts from the same ordinal and skips ahead past any key
    /// still in use, so keys stay unique after deletions.
    pub fn add_area(&mut self, room_type: RoomType) -> &RoomArea {
        let index = self.areas.iter().filter(|a| a.room_type == room_type).count() as u32 + 1;
        let mut ordinal = index;
        let key = loop {
            let candidate = format!("{}-{}", room_type.name(), ordinal);
            if !self.areas.iter().any(|a| a.key == candidate) {
                break candidate;
            }
            ordinal += 1;
        };

        let canvas = self.canvas_size();
        let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
        let [fw, fh] = self.settings.default_area_fraction;
        let [min_w, min_h] = self.settings.default_area_min;
        let w = round_half_up(cw * fw).max(min_w);
        let h = round_half_up(ch * fh).max(min_h);
        let rect = Rect::new(
            round_half_up(cw / 2.0 - f64::from(w) / 2.0),
            round_half_up(ch / 2.0 - f64::from(h) / 2.0),
            w,
            h,
        );

        log::debug!("Added area {} at {:?}", key, rect);
        self.active_area = Some(key.clone());
        self.areas.push(RoomArea::new(key, room_type, index, rect));
        &self.areas[self.areas.len() - 1]
    }

    /// Remove the active area. No-op without one.
    pub fn delete_active_area(&mut self) -> Option<RoomArea> {
        let key = self.active_area.take()?;
        if self.mode.is_dragging() {
            self.end_drag();
        }
        let pos = self.areas.iter().position(|a| a.key == key)?;
        let removed = self.areas.remove(pos);
        log::debug!("Deleted area {}", removed.key);
        Some(removed)
    }

    /// Make `key` the active area, or clear the selection with `None`.
    pub fn select_area(&mut self, key: Option<&str>) {
        self.active_area = key
            .filter(|k| self.areas.iter().any(|a| a.key == *k))
            .map(str::to_string);
    }

    pub(super) fn area_pointer_down(&mut self, point: Point) {
        let Some(hit) = geometry::hit_test_area(&self.areas, point) else {
            if self.active_area.take().is_some() {
                log::debug!("Area deselected");
            }
            return;
        };

        let rect = hit.rect;
        self.active_area = Some(hit.key.clone());
        self.mode = match geometry::hit_test_resize_handle(&rect, point, self.settings.handle_size) {
            Some(handle) => {
                log::debug!("Resizing {} from {}", hit.key, handle.name());
                InteractionMode::AreaResizing { handle }
            }
            None => InteractionMode::AreaMoving {
                offset: (point.x - rect.x, point.y - rect.y),
            },
        };
    }

    /// Apply `f` to the active area's rectangle. Returns whether it changed.
    pub(super) fn update_active_rect(&mut self, f: impl FnOnce(&Rect) -> Rect) -> bool {
        let Some(key) = self.active_area.as_deref() else {
            return false;
        };
        let Some(area) = self.areas.iter_mut().find(|a| a.key == key) else {
            return false;
        };
        let next = f(&area.rect);
        let changed = next != area.rect;
        area.rect = next;
        changed
    }

    /// What a press at `point` would grab, outside wall and North modes.
    ///
    /// Mirrors the press routing: the top-most area under the pointer, then its
    /// corner handles.
    pub fn hover_target(&self, point: Point) -> Option<HoverTarget> {
        if self.mode != InteractionMode::Idle {
            return None;
        }
        let hit = geometry::hit_test_area(&self.areas, point)?;
        Some(
            match geometry::hit_test_resize_handle(&hit.rect, point, self.settings.handle_size) {
                Some(handle) => HoverTarget::Handle(handle),
                None => HoverTarget::Area,
            },
        )
    }

    /// Direction label of every area, in insertion order.
    pub fn area_directions(&self) -> Vec<(&RoomArea, Option<DirectionLabel>)> {
        let frame = self.compass_frame();
        self.areas
            .iter()
            .map(|area| (area, frame.direction_of_rect(&area.rect)))
            .collect()
    }

    /// Direction and placement score of every area.
    pub fn area_placements(&self, engine: &ScoringEngine) -> Vec<AreaPlacement> {
        AreaPlacement::for_areas(&self.areas, &self.compass_frame(), engine)
    }
}
