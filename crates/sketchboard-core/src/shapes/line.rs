//! Polyline shape.

use super::{Point, SerializableColor};
use crate::ticket::CreationTicket;
use serde::{Deserialize, Serialize};

/// Default stroke width for new lines.
pub(crate) const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// A freehand polyline through an ordered list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub(crate) ticket: Option<CreationTicket>,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Line {
    /// Create a line that does not belong to any document yet.
    pub fn new(points: Vec<Point>, color: SerializableColor) -> Self {
        Self {
            ticket: None,
            points,
            color,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    pub(crate) fn reconstruct(
        ticket: CreationTicket,
        points: Vec<Point>,
        color: SerializableColor,
        stroke_width: f64,
    ) -> Self {
        Self {
            ticket: Some(ticket),
            points,
            color,
            stroke_width,
        }
    }

    pub fn ticket(&self) -> Option<CreationTicket> {
        self.ticket
    }

    /// Append a point unless it repeats the last one.
    pub fn push_point(&mut self, point: Point) -> bool {
        if self.points.last() == Some(&point) {
            return false;
        }
        self.points.push(point);
        true
    }
}
