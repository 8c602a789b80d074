//! Creation tickets: document-assigned shape identity.

use loro::ContainerID;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a shape when it is appended to a document.
///
/// A ticket is the logical-clock position (`peer`, `counter`) of the operation
/// that created the shape's container, so it is the same on every replica.
/// Tickets only support equality; they carry no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreationTicket {
    peer: u64,
    counter: i32,
}

impl CreationTicket {
    pub fn new(peer: u64, counter: i32) -> Self {
        Self { peer, counter }
    }

    /// Peer that created the shape.
    pub fn peer(&self) -> u64 {
        self.peer
    }

    /// Operation counter of that peer at creation time.
    pub fn counter(&self) -> i32 {
        self.counter
    }

    /// Ticket of a container created by an operation. Root containers have none.
    pub fn from_container(id: &ContainerID) -> Option<Self> {
        match id {
            ContainerID::Normal { peer, counter, .. } => Some(Self::new(*peer, *counter)),
            ContainerID::Root { .. } => None,
        }
    }
}

impl fmt::Display for CreationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.counter, self.peer)
    }
}
