//! Document - Node allocation and tree structure.
//!
//! Every node kind shares the same parallel arrays. Arrays that only make
//! sense for elements (attributes, display) stay empty for other kinds.

use std::fmt;

use crate::error::DomError;

// =============================================================================
// Node Types
// =============================================================================

/// Stable handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this node in the document's arrays.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeKind {
    Document,
    Element { tag: String },
    Text(String),
}

// =============================================================================
// Document
// =============================================================================

/// An in-memory DOM tree.
///
/// Index 0 is always the document node. Elements and text nodes created with
/// [`create_element`](Self::create_element) / [`create_text`](Self::create_text)
/// start detached and become part of the tree once appended under it.
#[derive(Debug, Clone)]
pub struct Document {
    kinds: Vec<NodeKind>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
    attributes: Vec<Vec<Attribute>>,
    display: Vec<Option<String>>,
    /// Text node last created by `set_text_content`, reused on the next call.
    text_slots: Vec<Option<NodeId>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the document node.
    pub fn new() -> Self {
        let mut document = Self {
            kinds: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            attributes: Vec::new(),
            display: Vec::new(),
            text_slots: Vec::new(),
        };
        document.allocate(NodeKind::Document);
        document
    }

    /// The document node. Everything reachable from it is "in the document".
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn allocate(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.kinds.len());
        self.kinds.push(kind);
        self.parents.push(None);
        self.children.push(Vec::new());
        self.attributes.push(Vec::new());
        self.display.push(None);
        self.text_slots.push(None);
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.allocate(NodeKind::Element { tag: tag.into() })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, data: impl Into<String>) -> NodeId {
        self.allocate(NodeKind::Text(data.into()))
    }

    /// Number of nodes ever allocated (attached or not).
    pub fn node_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.kinds.len()
    }

    fn check(&self, node: NodeId) -> Result<(), DomError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(DomError::UnknownNode(node))
        }
    }

    fn check_element(&self, node: NodeId) -> Result<(), DomError> {
        self.check(node)?;
        if self.is_element(node) {
            Ok(())
        } else {
            Err(DomError::NotAnElement(node))
        }
    }

    pub(crate) fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.kinds.get(node.0)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Element { .. }))
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Text(_)))
    }

    /// Tag name of an element, `None` for any other node.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.kind(node) {
            Some(NodeKind::Element { tag }) => Some(tag),
            _ => None,
        }
    }

    // =========================================================================
    // Tree Structure
    // =========================================================================

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.0).copied().flatten()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(node.0).map_or(&[], Vec::as_slice)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it if it already
    /// has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_text(parent) {
            return Err(DomError::NotAnElement(parent));
        }
        if child == self.root() || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.parents[child.0] = Some(parent);
        self.children[parent.0].push(child);
        Ok(())
    }

    /// Remove a node from its parent. The node and its subtree stay allocated.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else { return };
        self.children[parent.0].retain(|&c| c != node);
        self.parents[node.0] = None;
    }

    /// All descendants of `node` in pre-order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// First element in document order whose `id` attribute equals `id`.
    ///
    /// Detached subtrees are not searched.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.is_element(n) && self.get_attribute(n, "id") == Some(id))
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Attributes of an element in source order (empty for other nodes).
    pub fn attributes(&self, node: NodeId) -> &[Attribute] {
        self.attributes.get(node.0).map_or(&[], Vec::as_slice)
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attributes(node).iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.check_element(node)?;
        self.write_attribute(node, name, value.into());
        Ok(())
    }

    pub(crate) fn write_attribute(&mut self, node: NodeId, name: &str, value: String) {
        let attrs = &mut self.attributes[node.0];
        match attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => attrs.push(Attribute::new(name, value)),
        }
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        let Some(attrs) = self.attributes.get_mut(node.0) else {
            return false;
        };
        let before = attrs.len();
        attrs.retain(|a| a.name != name);
        attrs.len() != before
    }

    // =========================================================================
    // Text Content
    // =========================================================================

    /// Concatenated data of all descendant text nodes (or the node's own data).
    pub fn text_content(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Text(data)) => data.clone(),
            Some(_) => self
                .descendants(node)
                .into_iter()
                .filter_map(|n| match &self.kinds[n.0] {
                    NodeKind::Text(data) => Some(data.as_str()),
                    _ => None,
                })
                .collect(),
            None => String::new(),
        }
    }

    /// Replace all children with a single text node (none if `text` is empty).
    ///
    /// The text node is owned by the element: while it is detached or still
    /// under the element, later calls overwrite it instead of allocating.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.check(node)?;
        self.write_text_content(node, text);
        Ok(())
    }

    pub(crate) fn write_text_content(&mut self, node: NodeId, text: &str) {
        if let NodeKind::Text(data) = &mut self.kinds[node.0] {
            *data = text.to_string();
            return;
        }

        for child in std::mem::take(&mut self.children[node.0]) {
            self.parents[child.0] = None;
        }
        if text.is_empty() {
            return;
        }

        let text_node = match self.text_slots[node.0] {
            Some(slot) if self.parent(slot).is_none() => {
                self.kinds[slot.0] = NodeKind::Text(text.to_string());
                slot
            }
            _ => {
                let created = self.create_text(text);
                self.text_slots[node.0] = Some(created);
                created
            }
        };
        self.parents[text_node.0] = Some(node);
        self.children[node.0].push(text_node);
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Inline `display` style, empty when unset.
    pub fn display(&self, node: NodeId) -> &str {
        self.display
            .get(node.0)
            .and_then(|d| d.as_deref())
            .unwrap_or("")
    }

    /// Set inline `display`. An empty string clears it.
    pub fn set_display(&mut self, node: NodeId, display: &str) -> Result<(), DomError> {
        self.check_element(node)?;
        self.write_display(node, display);
        Ok(())
    }

    pub(crate) fn write_display(&mut self, node: NodeId, display: &str) {
        self.display[node.0] = (!display.is_empty()).then(|| display.to_string());
    }
}
