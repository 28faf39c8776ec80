//! ElementMut - The element handle passed to directive hooks.

use super::document::{Document, NodeId};

/// Mutable view of one element in a [`Document`].
///
/// Only constructed for element nodes, so every mutation here is infallible.
pub struct ElementMut<'a> {
    document: &'a mut Document,
    node: NodeId,
}

impl<'a> ElementMut<'a> {
    /// Borrow `node` as an element. `None` if it is not an element.
    pub fn new(document: &'a mut Document, node: NodeId) -> Option<Self> {
        document
            .is_element(node)
            .then_some(Self { document, node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn tag(&self) -> &str {
        self.document.tag(self.node).unwrap_or_default()
    }

    /// The document this element lives in (read-only).
    pub fn document(&self) -> &Document {
        &*self.document
    }

    pub fn text_content(&self) -> String {
        self.document.text_content(self.node)
    }

    pub fn set_text_content(&mut self, text: &str) {
        self.document.write_text_content(self.node, text);
    }

    pub fn display(&self) -> &str {
        self.document.display(self.node)
    }

    pub fn set_display(&mut self, display: &str) {
        self.document.write_display(self.node, display);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.document.get_attribute(self.node, name)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.document.write_attribute(self.node, name, value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        self.document.remove_attribute(self.node, name)
    }
}
