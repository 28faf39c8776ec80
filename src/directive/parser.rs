//! Expression Parser - Attribute to directive descriptor.
//!
//! Attribute syntax:
//!
//! ```text
//! <prefix>-<directive>[-<argument>]="<key>[|filter|filter...]"
//! ```
//!
//! Anything that does not parse into a registered directive yields `None`.
//! That is not an error: the attribute is simply not ours.

use std::rc::Rc;

use tracing::trace;

use super::registry::{Directive, DirectiveRegistry, UpdateFn};
use crate::dom::Attribute;

// =============================================================================
// Expression
// =============================================================================

/// The parsed attribute value: a scope key and an optional filter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub key: String,
    /// `None` when the expression has no `|` at all, which is different from
    /// an empty chain: filters only run when a chain is present.
    pub filters: Option<Vec<String>>,
}

/// Split `key | a | b` into key and filter names, trimming each part.
pub fn parse_expression(raw: &str) -> Expression {
    match raw.split_once('|') {
        None => Expression {
            key: raw.trim().to_string(),
            filters: None,
        },
        Some((key, rest)) => Expression {
            key: key.trim().to_string(),
            filters: Some(rest.split('|').map(|f| f.trim().to_string()).collect()),
        },
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// One directive occurrence parsed from one attribute.
#[derive(Clone)]
pub struct DirectiveDescriptor {
    /// The source attribute (name and value as they were when scanned).
    pub attribute: Attribute,
    /// Directive name, e.g. `text` for `sd-text`.
    pub name: String,
    /// Text after the second `-` in the attribute name.
    pub argument: Option<String>,
    pub key: String,
    pub filters: Option<Vec<String>>,
    pub directive: Rc<Directive>,
    /// Resolved from the directive at parse time.
    pub update: UpdateFn,
}

impl std::fmt::Debug for DirectiveDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveDescriptor")
            .field("attribute", &self.attribute)
            .field("name", &self.name)
            .field("argument", &self.argument)
            .field("key", &self.key)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// Parse one attribute into a descriptor.
///
/// The prefix test is a plain substring check, and the directive name is read
/// from the bytes after `<prefix>-` counted from the start of the attribute
/// name, wherever the prefix actually matched.
pub fn parse_directive(
    attribute: &Attribute,
    prefix: &str,
    registry: &DirectiveRegistry,
) -> Option<DirectiveDescriptor> {
    if !attribute.name.contains(prefix) {
        return None;
    }

    let no_prefix = attribute.name.get(prefix.len() + 1..).unwrap_or("");
    let (name, argument) = match no_prefix.split_once('-') {
        Some((name, argument)) => (name, Some(argument.to_string())),
        None => (no_prefix, None),
    };

    let Some(directive) = registry.get(name) else {
        trace!(attribute = %attribute.name, directive = name, "unknown directive, skipped");
        return None;
    };

    let Expression { key, filters } = parse_expression(&attribute.value);

    Some(DirectiveDescriptor {
        attribute: attribute.clone(),
        name: name.to_string(),
        argument,
        key,
        filters,
        directive: Rc::clone(directive),
        update: Rc::clone(directive.update_fn()),
    })
}
