//! Select-and-drag tool.
//!
//! Picking a shape copies it out of the document. The first pointer move
//! removes the original from the document (so it is never painted next to its
//! preview), every move repositions a local presence shape, and releasing the
//! pointer appends the presence shape as a new document entry.

use super::{ToolContext, ToolFeedback, ToolKind, Worker};
use crate::document::{BoardDocument, DocumentResult};
use crate::shapes::{Point, Rectangle, Shape};

/// Where the selector is in a pick-drag-commit gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Nothing selected.
    Idle,
    /// A shape is selected but has not moved yet.
    Selected,
    /// The original was removed from the document and a preview is following the pointer.
    Dragging,
}

#[derive(Debug, Default)]
pub struct SelectorWorker {
    /// Copy of the picked shape as it was in the document.
    selected: Option<Shape>,
    /// Local preview, not part of the document until committed.
    presence: Option<Shape>,
    selected_deleted: bool,
    /// Pointer position of the mousedown that made the selection.
    drag_anchor: Point,
}

impl SelectorWorker {
    /// Selector with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no shape is selected.
    pub fn is_empty_selected_shape(&self) -> bool {
        self.selected.is_none()
    }

    /// Current step of the pick-drag-commit gesture.
    pub fn phase(&self) -> SelectionPhase {
        match (&self.selected, self.selected_deleted) {
            (None, _) => SelectionPhase::Idle,
            (Some(_), false) => SelectionPhase::Selected,
            (Some(_), true) => SelectionPhase::Dragging,
        }
    }

    /// The picked shape as it was in the document.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.as_ref()
    }

    /// The local preview following the pointer.
    pub fn presence_shape(&self) -> Option<&Shape> {
        self.presence.as_ref()
    }

    /// First rectangle in collection order that contains `point`. Lines are not hit.
    fn find_target(document: &mut BoardDocument, point: Point) -> DocumentResult<Option<Shape>> {
        document.update(|shapes| {
            Ok(shapes
                .iter()
                .find(|shape| shape.as_rectangle().is_some_and(|rect| rect.contains(point))))
        })
    }

    /// Remove the original from the document, once per selection.
    fn delete_selected(&mut self, ctx: &mut ToolContext<'_>) -> DocumentResult<()> {
        if self.selected_deleted {
            return Ok(());
        }
        let Some(ticket) = self.selected.as_ref().and_then(Shape::ticket) else {
            return Ok(());
        };

        let ToolContext { document, board } = ctx;
        document.update(|shapes| {
            if !shapes.remove(ticket)? {
                log::debug!("Shape {} was already removed by a collaborator", ticket);
            }
            board.draw_all(shapes);
            Ok(())
        })?;
        self.selected_deleted = true;
        Ok(())
    }

    /// Commit the preview if the original was taken out, then return to idle.
    fn flush_task(&mut self, ctx: &mut ToolContext<'_>) -> DocumentResult<()> {
        let presence = self.presence.take();
        let selected_deleted = std::mem::take(&mut self.selected_deleted);
        self.selected = None;

        let Some(shape) = presence.filter(|_| selected_deleted) else {
            return Ok(());
        };
        let ToolContext { document, board } = ctx;
        let ticket = document.update(|shapes| {
            let ticket = shapes.push(&shape)?;
            board.draw_all(shapes);
            Ok(ticket)
        })?;
        log::debug!("Committed moved shape as {}", ticket);
        Ok(())
    }
}

impl Worker for SelectorWorker {
    fn kind(&self) -> ToolKind {
        ToolKind::Selector
    }

    fn mousedown(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> DocumentResult<()> {
        if self.selected_deleted {
            log::warn!("Pointer pressed during an unfinished drag; committing it first");
            self.flush_task(ctx)?;
        }

        match Self::find_target(ctx.document, point)? {
            Some(target) => {
                log::debug!("Selected {:?} at ({}, {})", target.ticket(), point.x, point.y);
                self.presence = target
                    .as_rectangle()
                    .map(|rect| Shape::Rectangle(Rectangle::new(rect.bounds, rect.color)));
                self.selected = Some(target);
                self.drag_anchor = point;
            }
            None => {
                self.selected = None;
                self.presence = None;
            }
        }
        Ok(())
    }

    fn mousemove(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        if self.selected.is_none() {
            return Ok(());
        }
        self.delete_selected(ctx)?;

        // Offset from the original press, applied to the original position.
        if let (Some(Shape::Rectangle(origin)), Some(Shape::Rectangle(preview))) =
            (&self.selected, &mut self.presence)
        {
            let offset = point - self.drag_anchor;
            preview.move_anchor_to(origin.anchor() + offset);
            callback(ToolFeedback::Rect(preview.clone()));
        }
        Ok(())
    }

    fn mouseup(
        &mut self,
        ctx: &mut ToolContext<'_>,
        callback: &mut dyn FnMut(ToolFeedback),
    ) -> DocumentResult<()> {
        let result = self.flush_task(ctx);
        callback(ToolFeedback::Done);
        result
    }

    fn is_busy(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HeadlessBoard;
    use crate::shapes::{Bounds, Line, SerializableColor};
    use crate::ticket::CreationTicket;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(
            Bounds::new(x, y, w, h),
            SerializableColor::new(200, 0, 0, 255),
        ))
    }

    fn doc_with(shapes: &[Shape]) -> (BoardDocument, Vec<CreationTicket>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut doc = BoardDocument::with_peer_id(1).unwrap();
        let tickets = doc
            .update(|collection| shapes.iter().map(|s| collection.push(s)).collect())
            .unwrap();
        (doc, tickets)
    }

    #[test]
    fn test_miss_leaves_idle_and_document_unchanged() {
        let (mut doc, _) = doc_with(&[rect(10.0, 10.0, 20.0, 20.0)]);
        let before = doc.shapes();
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();

        for point in [Point::new(0.0, 0.0), Point::new(31.0, 15.0), Point::new(15.0, 9.9)] {
            selector.mousedown(&mut ctx, point).unwrap();
            assert!(selector.is_empty_selected_shape());
            assert_eq!(selector.phase(), SelectionPhase::Idle);
        }
        assert_eq!(doc.shapes(), before);
        assert_eq!(board.draw_count(), 0);
    }

    #[test]
    fn test_mousedown_builds_presence_at_original_anchor() {
        let (mut doc, tickets) = doc_with(&[rect(10.0, 10.0, 20.0, 30.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();

        selector.mousedown(&mut ctx, Point::new(12.0, 12.0)).unwrap();
        assert_eq!(selector.phase(), SelectionPhase::Selected);
        assert_eq!(selector.selected_shape().and_then(Shape::ticket), Some(tickets[0]));

        let presence = selector.presence_shape().and_then(Shape::as_rectangle).expect("presence");
        assert!(presence.ticket().is_none());
        assert_eq!(presence.bounds, Bounds::new(10.0, 10.0, 20.0, 30.0));
        assert_eq!(presence.color, SerializableColor::new(200, 0, 0, 255));
    }

    #[test]
    fn test_click_without_drag_is_noop() {
        let (mut doc, _) = doc_with(&[rect(10.0, 10.0, 20.0, 20.0), rect(50.0, 50.0, 5.0, 5.0)]);
        let before = doc.shapes();
        let version = doc.version();
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();
        let mut done = 0;

        selector.mousedown(&mut ctx, Point::new(15.0, 15.0)).unwrap();
        selector
            .mouseup(&mut ctx, &mut |feedback| {
                assert_eq!(feedback, ToolFeedback::Done);
                done += 1;
            })
            .unwrap();

        assert_eq!(done, 1);
        assert!(selector.is_empty_selected_shape());
        assert_eq!(doc.shapes(), before);
        assert_eq!(doc.version(), version);
        assert_eq!(board.draw_count(), 0);
    }

    #[test]
    fn test_original_deleted_exactly_once() {
        let (mut doc, tickets) =
            doc_with(&[rect(10.0, 10.0, 20.0, 20.0), rect(100.0, 100.0, 5.0, 5.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();

        selector.mousedown(&mut ctx, Point::new(15.0, 15.0)).unwrap();
        for i in 0..10 {
            selector
                .mousemove(&mut ctx, Point::new(15.0 + i as f64, 15.0), &mut |_| {})
                .unwrap();
            assert_eq!(selector.phase(), SelectionPhase::Dragging);
        }

        // One redraw for the delete, none for the moves.
        assert_eq!(board.draw_count(), 1);
        let frame = board.last_frame().expect("frame");
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].ticket(), Some(tickets[1]));
        assert_eq!(doc.shape_count(), 1);
        assert!(doc.shape(tickets[0]).is_none());
    }

    #[test]
    fn test_offset_measured_from_original_press() {
        let (mut doc, _) = doc_with(&[rect(10.0, 10.0, 20.0, 20.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();
        let mut seen = Vec::new();

        selector.mousedown(&mut ctx, Point::new(10.0, 10.0)).unwrap();
        // Anchor outside the box, as if the press had been reported with an offset.
        selector.drag_anchor = Point::new(5.0, 5.0);

        selector
            .mousemove(&mut ctx, Point::new(15.0, 15.0), &mut |f| seen.push(f))
            .unwrap();
        selector
            .mousemove(&mut ctx, Point::new(25.0, 25.0), &mut |f| seen.push(f))
            .unwrap();

        let boxes: Vec<Bounds> = seen
            .iter()
            .filter_map(|f| match f {
                ToolFeedback::Rect(r) => Some(r.bounds),
                _ => None,
            })
            .collect();
        assert_eq!(
            boxes,
            vec![Bounds::new(20.0, 20.0, 20.0, 20.0), Bounds::new(30.0, 30.0, 20.0, 20.0)]
        );
    }

    #[test]
    fn test_repeated_move_is_idempotent() {
        let (mut doc, _) = doc_with(&[rect(0.0, 0.0, 10.0, 10.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();
        let mut seen = Vec::new();

        selector.mousedown(&mut ctx, Point::new(2.0, 3.0)).unwrap();
        for _ in 0..2 {
            selector
                .mousemove(&mut ctx, Point::new(12.0, 43.0), &mut |f| seen.push(f))
                .unwrap();
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        let expected = Rectangle::new(
            Bounds::new(10.0, 40.0, 10.0, 10.0),
            SerializableColor::new(200, 0, 0, 255),
        );
        assert_eq!(seen[0], ToolFeedback::Rect(expected));
    }

    #[test]
    fn test_commit_creates_new_ticket() {
        let (mut doc, tickets) = doc_with(&[rect(10.0, 10.0, 20.0, 20.0)]);
        let original = tickets[0];
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();
        let mut feedback = Vec::new();

        selector.mousedown(&mut ctx, Point::new(15.0, 15.0)).unwrap();
        selector
            .mousemove(&mut ctx, Point::new(45.0, 25.0), &mut |f| feedback.push(f))
            .unwrap();
        selector.mouseup(&mut ctx, &mut |f| feedback.push(f)).unwrap();

        assert_eq!(feedback.last(), Some(&ToolFeedback::Done));
        assert_eq!(selector.phase(), SelectionPhase::Idle);
        assert!(selector.presence_shape().is_none());

        let shapes = doc.shapes();
        assert_eq!(shapes.len(), 1);
        let moved = shapes[0].as_rectangle().expect("rectangle");
        assert_eq!(moved.bounds, Bounds::new(40.0, 20.0, 20.0, 20.0));
        assert_ne!(moved.ticket(), Some(original));
        assert!(doc.shape(original).is_none());

        // Delete frame and commit frame.
        assert_eq!(board.draw_count(), 2);
        assert_eq!(board.last_frame().map(<[Shape]>::len), Some(1));
    }

    #[test]
    fn test_first_inserted_wins_on_overlap() {
        let (mut doc, tickets) =
            doc_with(&[rect(0.0, 0.0, 20.0, 20.0), rect(10.0, 10.0, 20.0, 20.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();

        selector.mousedown(&mut ctx, Point::new(15.0, 15.0)).unwrap();
        assert_eq!(selector.selected_shape().and_then(Shape::ticket), Some(tickets[0]));
    }

    #[test]
    fn test_lines_are_not_selectable() {
        let line = Shape::Line(Line::new(
            vec![Point::new(0.0, 0.0), Point::new(40.0, 40.0)],
            SerializableColor::black(),
        ));
        let (mut doc, _) = doc_with(&[line]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();

        selector.mousedown(&mut ctx, Point::new(20.0, 20.0)).unwrap();
        assert!(selector.is_empty_selected_shape());
    }

    #[test]
    fn test_move_without_selection_is_noop() {
        let (mut doc, _) = doc_with(&[rect(0.0, 0.0, 10.0, 10.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();
        let mut calls = 0;

        selector
            .mousemove(&mut ctx, Point::new(5.0, 5.0), &mut |_| calls += 1)
            .unwrap();
        assert_eq!(calls, 0);
        assert_eq!(doc.shape_count(), 1);
    }

    #[test]
    fn test_mouseup_without_selection_still_reports_done() {
        let mut doc = BoardDocument::new();
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();
        let mut seen = Vec::new();

        selector.mouseup(&mut ctx, &mut |f| seen.push(f)).unwrap();
        assert_eq!(seen, vec![ToolFeedback::Done]);
    }

    #[test]
    fn test_press_during_unfinished_drag_commits_it() {
        let (mut doc, _) = doc_with(&[rect(0.0, 0.0, 10.0, 10.0)]);
        let mut board = HeadlessBoard::new();
        let mut ctx = ToolContext::new(&mut doc, &mut board);
        let mut selector = SelectorWorker::new();

        selector.mousedown(&mut ctx, Point::new(5.0, 5.0)).unwrap();
        selector.mousemove(&mut ctx, Point::new(105.0, 5.0), &mut |_| {}).unwrap();
        // mouseup lost; the next press lands on the moved preview once it is committed
        selector.mousedown(&mut ctx, Point::new(105.0, 5.0)).unwrap();

        assert_eq!(selector.phase(), SelectionPhase::Selected);
        assert_eq!(doc.shape_count(), 1);
        assert_eq!(
            doc.shapes()[0].as_rectangle().map(|r| r.bounds),
            Some(Bounds::new(100.0, 0.0, 10.0, 10.0))
        );
    }
}
