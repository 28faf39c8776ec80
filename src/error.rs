//! Error types.
//!
//! Only configuration mistakes surface as errors. Unknown directives, unknown
//! filters and attributes without the prefix are skipped, not reported.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors returned while constructing a [`Seed`](crate::Seed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The root identifier does not resolve to any element.
    #[error("root element `#{id}` not found")]
    RootNotFound { id: String },
}

/// Errors returned by tree mutations on a [`Document`](crate::dom::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node id does not belong to this document.
    #[error("node {0} does not belong to this document")]
    UnknownNode(NodeId),

    /// The operation needs an element but got a text node.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Appending would make a node its own ancestor.
    #[error("cannot append node {child} under its descendant {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
