//! Rectangle drawing tool.

use super::{ToolContext, ToolFeedback, ToolKind, Worker};
use crate::config::BoardConfig;
use crate::document::DocumentResult;
use crate::shapes::{Bounds, Point, Rectangle, SerializableColor, Shape};

/// Drags out a rectangle between the press point and the pointer.
#[derive(Debug)]
pub struct RectWorker {
    color: SerializableColor,
    start: Option<Point>,
    preview: Option<Rectangle>,
}

impl RectWorker {
    pub fn new(color: SerializableColor) -> Self {
        Self {
            color,
            start: None,
            preview: None,
        }
    }
}

impl Default for RectWorker {
    fn default() -> Self {
        Self::new(BoardConfig::default().rect_color)
    }
}

impl Worker for RectWorker {
    fn kind(&self) -> ToolKind {
        ToolKind::Rect
    }

    fn mousedown(&mut self, _ctx: &mut ToolContext<'_>, point: Point) -> DocumentResult<()> {
        self.start = Some(point);
        self.preview = Some(Rectangle::at(point, self.color));
        Ok(())
    }

    fn mousemove(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        point: Point,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        if let (Some(start), Some(preview)) = (self.start, self.preview.as_mut()) {
            preview.bounds = Bounds::from_corners(start, point);
            callback(ToolFeedback::Rect(preview.clone()));
        }
        Ok(())
    }

    fn mouseup(
        &mut self,
        ctx: &mut ToolContext<'_>,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        self.start = None;
        let result = match self.preview.take() {
            // A press without a drag draws nothing.
            Some(rect) if rect.bounds.width > 0.0 && rect.bounds.height > 0.0 => {
                let ToolContext { document, board } = ctx;
                document
                    .update(|shapes| {
                        let ticket = shapes.push(&Shape::Rectangle(rect))?;
                        board.draw_all(shapes);
                        Ok(ticket)
                    })
                    .map(|ticket| log::debug!("Created rectangle {}", ticket))
            }
            _ => Ok(()),
        };
        callback(ToolFeedback::Done);
        result
    }

    fn is_busy(&self) -> bool {
        self.start.is_some()
    }
}
