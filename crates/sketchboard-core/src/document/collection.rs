//! Ordered view over the document's shape list.

use super::convert::{shape_from_loro, shape_to_loro};
use super::{DocumentError, DocumentResult};
use crate::shapes::Shape;
use crate::ticket::CreationTicket;
use loro::{Container, ContainerTrait, LoroList, LoroMap, LoroValue, ValueOrContainer};

/// The shapes of a document in draw order (later entries are drawn on top).
///
/// Every read goes to the live Loro list, so a collection always reflects the
/// current replica state including remote updates imported earlier.
pub struct ShapeCollection<'txn> {
    list: &'txn LoroList,
}

impl<'txn> ShapeCollection<'txn> {
    pub(crate) fn new(list: &'txn LoroList) -> Self {
        Self { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape at `index`, or `None` when out of range or malformed.
    pub fn get(&self, index: usize) -> Option<Shape> {
        let (ticket, map) = self.entry(index)?;
        let shape = match map.get_deep_value() {
            LoroValue::Map(value) => shape_from_loro(ticket, &value),
            _ => None,
        };
        if shape.is_none() {
            log::warn!("Skipping malformed shape {} at index {}", ticket, index);
        }
        shape
    }

    pub fn last(&self) -> Option<Shape> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.get(len - 1)
    }

    /// Index of the shape created with `ticket`.
    pub fn position(&self, ticket: CreationTicket) -> Option<usize> {
        (0..self.len()).find(|&i| self.entry(i).is_some_and(|(t, _)| t == ticket))
    }

    pub fn get_by_ticket(&self, ticket: CreationTicket) -> Option<Shape> {
        self.position(ticket).and_then(|i| self.get(i))
    }

    /// Forward iteration in draw order.
    pub fn iter(&self) -> impl Iterator<Item = Shape> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn to_vec(&self) -> Vec<Shape> {
        self.iter().collect()
    }

    /// Append a shape on top. The document assigns a fresh ticket; any ticket
    /// carried by `shape` is ignored.
    pub fn push(&mut self, shape: &Shape) -> DocumentResult<CreationTicket> {
        let map = self.list.push_container(LoroMap::new())?;
        shape_to_loro(shape, &map)?;
        CreationTicket::from_container(&map.id()).ok_or(DocumentError::Unattached)
    }

    /// Remove the entry created with `ticket`, malformed or not. Returns `false`
    /// if there is no such entry, for example because a collaborator already
    /// removed it.
    pub fn remove(&mut self, ticket: CreationTicket) -> DocumentResult<bool> {
        let Some(index) = self.position(ticket) else {
            return Ok(false);
        };
        self.list.delete(index, 1)?;
        Ok(true)
    }

    fn entry(&self, index: usize) -> Option<(CreationTicket, LoroMap)> {
        match self.list.get(index)? {
            ValueOrContainer::Container(Container::Map(map)) => {
                let ticket = CreationTicket::from_container(&map.id())?;
                Some((ticket, map))
            }
            _ => None,
        }
    }
}
