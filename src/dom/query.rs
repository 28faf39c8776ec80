//! Query - Attribute selectors and descendant lookup.
//!
//! Only attribute-presence selectors (`[name]`) are supported. That is all
//! directive discovery needs.

use std::fmt;

use super::document::{Document, NodeId};

// =============================================================================
// Selector List
// =============================================================================

/// A group of attribute-presence selectors, e.g. `[sd-text],[sd-show]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
    attributes: Vec<String>,
}

impl SelectorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `[name]` selector.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// One `[<prefix>-<name>]` selector per directive name.
    pub fn for_directives<'a>(prefix: &str, names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .fold(Self::new(), |list, name| list.attribute(format!("{prefix}-{name}")))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Whether `node` is an element carrying any of the selected attributes.
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        document.is_element(node)
            && self
                .attributes
                .iter()
                .any(|name| document.has_attribute(node, name))
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "[{name}]")?;
        }
        Ok(())
    }
}

// =============================================================================
// Query
// =============================================================================

impl Document {
    /// Descendant elements of `root` matching any selector, in document order.
    pub fn query_selector_all(&self, root: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| selectors.matches(self, n))
            .collect()
    }
}
