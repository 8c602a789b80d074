//! Freehand line tool.

use super::{ToolContext, ToolFeedback, ToolKind, Worker};
use crate::config::BoardConfig;
use crate::document::DocumentResult;
use crate::shapes::{Line, Point, SerializableColor, Shape};

/// Collects pointer positions into a polyline.
#[derive(Debug)]
pub struct LineWorker {
    color: SerializableColor,
    stroke_width: f64,
    current: Option<Line>,
}

impl LineWorker {
    pub fn new(color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
            current: None,
        }
    }
}

impl Default for LineWorker {
    fn default() -> Self {
        let config = BoardConfig::default();
        Self::new(config.line_color, config.line_stroke_width)
    }
}

impl Worker for LineWorker {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn mousedown(&mut self, _ctx: &mut ToolContext<'_>, point: Point) -> DocumentResult<()> {
        let mut line = Line::new(vec![point], self.color);
        line.stroke_width = self.stroke_width;
        self.current = Some(line);
        Ok(())
    }

    fn mousemove(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        point: Point,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        if let Some(line) = self.current.as_mut() {
            if line.push_point(point) {
                callback(ToolFeedback::Line(line.clone()));
            }
        }
        Ok(())
    }

    fn mouseup(
        &mut self,
        ctx: &mut ToolContext<'_>,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        let result = match self.current.take() {
            Some(line) if line.points.len() >= 2 => {
                let ToolContext { document, board } = ctx;
                document
                    .update(|shapes| {
                        let ticket = shapes.push(&Shape::Line(line))?;
                        board.draw_all(shapes);
                        Ok(ticket)
                    })
                    .map(|ticket| log::debug!("Created line {}", ticket))
            }
            _ => Ok(()),
        };
        callback(ToolFeedback::Done);
        result
    }

    fn is_busy(&self) -> bool {
        self.current.is_some()
    }
}
