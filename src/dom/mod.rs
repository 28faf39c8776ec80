//! Host DOM - An in-memory document tree.
//!
//! The binding engine scans and mutates a DOM. This module provides one:
//! - Document: Node allocation, tree structure, attributes, text, style
//! - Query: Attribute selector lists and descendant queries
//! - ElementMut: The element handle handed to directive hooks
//! - Serialize: Markup output for inspecting the final tree
//!
//! # Architecture
//!
//! Nodes are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: #document (parent=None, children=[1])
//! Index 1: <div>     (parent=0, attrs=[id="app"],         display="")
//! Index 2: <span>    (parent=1, attrs=[sd-text="msg"],    display="")
//! Index 3: #text     (parent=2, data="hello")
//! ```
//!
//! A [`NodeId`] is stable for the lifetime of its document. Detaching a node
//! never frees its index.

mod document;
mod element;
mod query;
mod serialize;

pub use document::*;
pub use element::*;
pub use query::*;
