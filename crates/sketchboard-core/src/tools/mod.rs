//! Tool system for the drawing board.
//!
//! The UI shell forwards raw pointer events to a [`ToolManager`], which hands
//! them to the worker of the active [`ToolKind`]. Workers read and write the
//! shared document only inside its transactions and report transient
//! previews through a callback.

mod line;
mod rect;
mod selector;

pub use line::LineWorker;
pub use rect::RectWorker;
pub use selector::{SelectionPhase, SelectorWorker};

use crate::board::Board;
use crate::config::BoardConfig;
use crate::document::{BoardDocument, DocumentResult};
use crate::shapes::{Line, Point, Rectangle};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Selector,
    Rect,
    Line,
}

/// Transient visual produced by a worker before anything is committed.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolFeedback {
    /// Rectangle preview at its current position.
    Rect(Rectangle),
    /// Line preview with the points collected so far.
    Line(Line),
    /// The gesture is over; previews can be dropped.
    Done,
}

/// What a worker may touch while handling an event.
pub struct ToolContext<'a> {
    pub document: &'a mut BoardDocument,
    pub board: &'a mut dyn Board,
}

impl<'a> ToolContext<'a> {
    pub fn new(document: &'a mut BoardDocument, board: &'a mut dyn Board) -> Self {
        Self { document, board }
    }
}

/// Pointer-driven behavior shared by all tools.
pub trait Worker {
    fn kind(&self) -> ToolKind;

    fn mousedown(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> DocumentResult<()>;

    fn mousemove(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()>;

    /// End the gesture. Always reports [`ToolFeedback::Done`], even when the
    /// commit fails.
    fn mouseup(
        &mut self,
        ctx: &mut ToolContext<'_>,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()>;

    /// Whether a gesture is in progress.
    fn is_busy(&self) -> bool;
}

/// Manages the current tool and dispatches pointer events to it.
#[derive(Debug, Default)]
pub struct ToolManager {
    current_tool: ToolKind,
    selector: SelectorWorker,
    rect: RectWorker,
    line: LineWorker,
}

impl ToolManager {
    /// Tool manager with the selector active and default drawing settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tool manager whose drawing tools use the configured defaults.
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            current_tool: ToolKind::default(),
            selector: SelectorWorker::new(),
            rect: RectWorker::new(config.rect_color),
            line: LineWorker::new(config.line_color, config.line_stroke_width),
        }
    }

    /// The active tool.
    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Switch tools. A gesture still running on the outgoing tool is ended as
    /// if the pointer had been released, so a drag never leaves the document
    /// without its shape.
    pub fn set_tool(&mut self, ctx: &mut ToolContext<'_>, tool: ToolKind) -> DocumentResult<()> {
        if tool == self.current_tool {
            return Ok(());
        }
        let result = if self.active().is_busy() {
            log::debug!("Ending {:?} gesture on switch to {:?}", self.current_tool, tool);
            self.active().mouseup(ctx, &mut |_| {})
        } else {
            Ok(())
        };
        self.current_tool = tool;
        result
    }

    /// The selector worker, whichever tool is active.
    pub fn selector(&self) -> &SelectorWorker {
        &self.selector
    }

    /// Whether the active tool is in the middle of a gesture.
    pub fn is_busy(&self) -> bool {
        match self.current_tool {
            ToolKind::Selector => self.selector.is_busy(),
            ToolKind::Rect => self.rect.is_busy(),
            ToolKind::Line => self.line.is_busy(),
        }
    }

    /// Forward a pointer press to the active tool.
    pub fn mousedown(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> DocumentResult<()> {
        self.active().mousedown(ctx, point)
    }

    /// Forward a pointer move to the active tool.
    pub fn mousemove(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        self.active().mousemove(ctx, point, callback)
    }

    /// Forward a pointer release to the active tool.
    pub fn mouseup(
        &mut self,
        ctx: &mut ToolContext<'_>,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        self.active().mouseup(ctx, callback)
    }

    fn active(&mut self) -> &mut dyn Worker {
        match self.current_tool {
            ToolKind::Selector => &mut self.selector,
            ToolKind::Rect => &mut self.rect,
            ToolKind::Line => &mut self.line,
        }
    }
}
