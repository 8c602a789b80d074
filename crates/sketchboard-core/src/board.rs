//! Rendering seam.

use crate::document::ShapeCollection;
use crate::shapes::Shape;

/// Something that can paint the whole shape collection.
///
/// Workers call `draw_all` after every change to the document that should
/// become visible. Implementations must not retain the collection.
pub trait Board {
    fn draw_all(&mut self, shapes: &ShapeCollection<'_>);
}

/// Board that records frames instead of painting them.
#[derive(Debug, Default)]
pub struct HeadlessBoard {
    frames: Vec<Vec<Shape>>,
}

impl HeadlessBoard {
    /// Board with no frames recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full redraws so far.
    pub fn draw_count(&self) -> usize {
        self.frames.len()
    }

    /// Shapes of the most recent frame.
    pub fn last_frame(&self) -> Option<&[Shape]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Board for HeadlessBoard {
    fn draw_all(&mut self, shapes: &ShapeCollection<'_>) {
        self.frames.push(shapes.to_vec());
    }
}
