//! Rectangle shape.

use super::{Bounds, Point, SerializableColor};
use crate::hit_test::is_inner_box;
use crate::ticket::CreationTicket;
use serde::{Deserialize, Serialize};

/// An axis-aligned filled rectangle.
///
/// The anchor point is always the top-left corner of `bounds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(default)]
    pub(crate) ticket: Option<CreationTicket>,
    /// Box in board coordinates.
    pub bounds: Bounds,
    /// Fill color.
    pub color: SerializableColor,
}

impl Rectangle {
    /// Create a rectangle that does not belong to any document yet.
    pub fn new(bounds: Bounds, color: SerializableColor) -> Self {
        Self {
            ticket: None,
            bounds,
            color,
        }
    }

    /// Zero-sized rectangle anchored at `point`.
    pub fn at(point: Point, color: SerializableColor) -> Self {
        Self::new(Bounds::new(point.x, point.y, 0.0, 0.0), color)
    }

    /// Reconstruct a rectangle read back from a document.
    pub(crate) fn reconstruct(
        ticket: CreationTicket,
        bounds: Bounds,
        color: SerializableColor,
    ) -> Self {
        Self {
            ticket: Some(ticket),
            bounds,
            color,
        }
    }

    pub fn ticket(&self) -> Option<CreationTicket> {
        self.ticket
    }

    /// Top-left anchor.
    pub fn anchor(&self) -> Point {
        self.bounds.origin()
    }

    /// Move the anchor to `point`, keeping size and color.
    pub fn move_anchor_to(&mut self, point: Point) {
        self.bounds.x = point.x;
        self.bounds.y = point.y;
    }

    pub fn contains(&self, point: Point) -> bool {
        is_inner_box(&self.bounds, point)
    }
}
