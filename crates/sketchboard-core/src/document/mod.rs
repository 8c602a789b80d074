//! Shared board document backed by a Loro CRDT.
//!
//! # Schema
//!
//! ```text
//! LoroDoc
//! └── "shapes": LoroList<LoroMap>   (draw order, back to front)
//! ```
//!
//! Each shape map holds a `"type"` (`"line"` or `"rect"`), color channels and
//! the kind-specific geometry. The container ID of the map is the shape's
//! [`CreationTicket`].

mod collection;
mod convert;
mod transaction;

pub use collection::ShapeCollection;
pub use convert::{shape_from_loro, shape_to_loro};
pub use transaction::Transaction;

pub use loro::VersionVector;

use crate::config::BoardConfig;
use crate::shapes::Shape;
use crate::ticket::CreationTicket;
use loro::{ExportMode, LoroDoc, LoroError};
use thiserror::Error;

/// Key of the shape list in the Loro document.
pub const SHAPES_KEY: &str = "shapes";

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("CRDT error: {0}")]
    Loro(#[from] LoroError),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Shape container is not attached to the document")]
    Unattached,
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// A replica of the shared board.
pub struct BoardDocument {
    doc: LoroDoc,
}

impl BoardDocument {
    /// Create an empty document with a random peer id.
    pub fn new() -> Self {
        Self { doc: LoroDoc::new() }
    }

    /// Create an empty document with a fixed peer id.
    pub fn with_peer_id(peer_id: u64) -> DocumentResult<Self> {
        let doc = LoroDoc::new();
        doc.set_peer_id(peer_id)?;
        Ok(Self { doc })
    }

    pub fn from_config(config: &BoardConfig) -> DocumentResult<Self> {
        match config.peer_id {
            Some(peer_id) => Self::with_peer_id(peer_id),
            None => Ok(Self::new()),
        }
    }

    /// Create a document from a snapshot exported by another replica.
    pub fn from_snapshot(bytes: &[u8]) -> DocumentResult<Self> {
        let doc = LoroDoc::new();
        doc.import(bytes)?;
        Ok(Self { doc })
    }

    pub fn peer_id(&self) -> u64 {
        self.doc.peer_id()
    }

    /// Begin a transaction. It is sealed on `commit()` or when dropped.
    pub fn transact(&mut self) -> Transaction<'_> {
        Transaction::begin(&self.doc)
    }

    /// Run `mutator` with exclusive access to the live shape collection and
    /// commit everything it did as one change.
    pub fn update<R>(
        &mut self,
        mutator: impl FnOnce(&mut ShapeCollection<'_>) -> DocumentResult<R>,
    ) -> DocumentResult<R> {
        let mut txn = self.transact();
        let result = mutator(&mut txn.shapes());
        txn.commit();
        result
    }

    pub fn shape_count(&self) -> usize {
        self.doc.get_list(SHAPES_KEY).len()
    }

    /// Copy of all shapes in draw order.
    pub fn shapes(&self) -> Vec<Shape> {
        let list = self.doc.get_list(SHAPES_KEY);
        ShapeCollection::new(&list).to_vec()
    }

    pub fn shape(&self, ticket: CreationTicket) -> Option<Shape> {
        let list = self.doc.get_list(SHAPES_KEY);
        ShapeCollection::new(&list).get_by_ticket(ticket)
    }

    // --- Replication ---

    /// Export the full document state.
    pub fn export_snapshot(&self) -> DocumentResult<Vec<u8>> {
        self.doc
            .export(ExportMode::Snapshot)
            .map_err(|e| DocumentError::Export(e.to_string()))
    }

    /// Export the changes made since `since`.
    pub fn export_updates(&self, since: &VersionVector) -> DocumentResult<Vec<u8>> {
        self.doc
            .export(ExportMode::updates(since))
            .map_err(|e| DocumentError::Export(e.to_string()))
    }

    /// Apply a snapshot or update from another replica.
    pub fn import(&mut self, bytes: &[u8]) -> DocumentResult<()> {
        self.doc.import(bytes)?;
        log::debug!("Imported {} bytes of remote changes", bytes.len());
        Ok(())
    }

    /// Current version vector.
    pub fn version(&self) -> VersionVector {
        self.doc.oplog_vv()
    }
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}
