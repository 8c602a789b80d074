//! Sketchboard Core Library
//!
//! Shape model, shared CRDT document and pointer tools for a collaborative
//! drawing board. Rendering and transport live outside this crate.

pub mod board;
pub mod config;
pub mod document;
pub mod shapes;
pub mod ticket;
pub mod tools;

pub use board::{Board, HeadlessBoard};
pub use config::{BoardConfig, ConfigError};
pub use document::{BoardDocument, DocumentError, DocumentResult, ShapeCollection, Transaction};
pub use hit_test::is_inner_box;
pub use shapes::{Bounds, Line, Point, Rectangle, SerializableColor, Shape, ShapeKind};
pub use ticket::CreationTicket;
pub use tools::{
    LineWorker, RectWorker, SelectionPhase, SelectorWorker, ToolContext, ToolFeedback, ToolKind,
    ToolManager, Worker,
};
