//! Scoped write access to a document.

use super::SHAPES_KEY;
use super::collection::ShapeCollection;
use loro::{LoroDoc, LoroList};

/// One atomic change against the shape list.
///
/// The shape list is looked up fresh when the transaction begins. Operations
/// are applied to the local replica as they are issued and are sealed into a
/// single Loro change when the transaction is committed or dropped, whichever
/// comes first, so every exit path (early `?` return, unwinding) finalizes it.
pub struct Transaction<'doc> {
    doc: &'doc LoroDoc,
    shapes: LoroList,
    finished: bool,
}

impl<'doc> Transaction<'doc> {
    pub(crate) fn begin(doc: &'doc LoroDoc) -> Self {
        Self {
            doc,
            shapes: doc.get_list(SHAPES_KEY),
            finished: false,
        }
    }

    /// The live shape collection.
    pub fn shapes(&mut self) -> ShapeCollection<'_> {
        ShapeCollection::new(&self.shapes)
    }

    /// Seal the pending operations now.
    pub fn commit(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.doc.commit();
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
