// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pan/zoom editing state for a profile picture.

use crate::models::ImagePosition;

/// Editing session for an [`ImagePosition`].
///
/// A drag records the pointer's offset from the current position, so the
/// image follows the pointer without jumping.
#[derive(Debug, Clone, Default)]
pub struct ImagePositioner {
    position: ImagePosition,
    drag_anchor: Option<(f64, f64)>,
}

impl ImagePositioner {
    /// Start editing from an existing position (normalized) or the centered default.
    pub fn new(initial: Option<ImagePosition>) -> Self {
        Self {
            position: initial.and_then(ImagePosition::normalized).unwrap_or_default(),
            drag_anchor: None,
        }
    }

    pub fn position(&self) -> ImagePosition {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn begin_drag(&mut self, pointer_x: f64, pointer_y: f64) {
        self.drag_anchor = Some((pointer_x - self.position.x, pointer_y - self.position.y));
    }

    /// Move the image with the pointer. Ignored unless a drag is in progress.
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64) {
        let Some((anchor_x, anchor_y)) = self.drag_anchor else {
            return;
        };
        let (x, y) = (pointer_x - anchor_x, pointer_y - anchor_y);
        if x.is_finite() && y.is_finite() {
            self.position.x = x;
            self.position.y = y;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Set the zoom, clamped to the allowed range. Non-finite input is ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.position.scale = ImagePosition::clamp_scale(scale);
        }
    }

    pub fn reset(&mut self) {
        self.position = ImagePosition::centered();
        self.drag_anchor = None;
    }
}
