//! Seed - The engine facade.
//!
//! Construction runs the whole binding pass:
//!
//! 1. Resolve the root element by id (fatal if missing)
//! 2. Query descendants carrying any `[<prefix>-<directive>]` attribute
//! 3. Process each of them, then the root itself, attribute by attribute
//! 4. Seed the scope from the initial values, one write per bound key
//!
//! After that the binding table is frozen: writes only read it.
//!
//! # Example
//!
//! ```ignore
//! use spark_seed::{builtin, Document, Seed, SeedOptions};
//!
//! let mut doc = Document::new();
//! let app = doc.create_element("div");
//! let span = doc.create_element("span");
//! doc.set_attribute(app, "id", "app")?;
//! doc.set_attribute(span, "sd-text", "greeting | upper")?;
//! doc.append_child(doc.root(), app)?;
//! doc.append_child(app, span)?;
//!
//! let mut seed = Seed::create(
//!     doc,
//!     SeedOptions::new("app").with_value("greeting", "hi"),
//!     builtin::directives(),
//!     builtin::filters(),
//! )?;
//! assert_eq!(seed.document().text_content(span), "HI");
//!
//! seed.set("greeting", "hello");
//! assert_eq!(seed.document().text_content(span), "HELLO");
//! ```

use indexmap::IndexMap;
use spark_signals::Signal;
use tracing::{debug, trace};

use crate::binding::{BindingTable, BoundDirective, Scope, ScopeMut};
use crate::directive::{parse_directive, DirectiveDescriptor, DirectiveRegistry};
use crate::dom::{Document, ElementMut, NodeId, SelectorList};
use crate::error::SeedError;
use crate::filter::FilterRegistry;
use crate::types::Value;

/// Attribute prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "sd";

// =============================================================================
// Options
// =============================================================================

/// Construction options.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// `id` attribute of the root element.
    pub id: String,
    /// Initial scope values. Keys no directive uses are dropped.
    pub scope: IndexMap<String, Value>,
    /// Directive attribute prefix.
    pub prefix: String,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            id: String::new(),
            scope: IndexMap::new(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl SeedOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.scope.insert(key.into(), value.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

// =============================================================================
// Seed
// =============================================================================

/// A document whose directive attributes are bound to a reactive scope.
pub struct Seed {
    document: Document,
    root: NodeId,
    prefix: String,
    directives: DirectiveRegistry,
    filters: FilterRegistry,
    bindings: BindingTable,
    scope: Scope,
}

impl Seed {
    /// Bind every directive under the element `#options.id`, then seed the
    /// scope with `options.scope`.
    pub fn create(
        document: Document,
        options: SeedOptions,
        directives: DirectiveRegistry,
        filters: FilterRegistry,
    ) -> Result<Self, SeedError> {
        let SeedOptions { id, scope: initial, prefix } = options;

        let root = document
            .get_element_by_id(&id)
            .ok_or_else(|| SeedError::RootNotFound { id: id.clone() })?;

        let selectors = SelectorList::for_directives(&prefix, directives.names());
        let mut nodes = document.query_selector_all(root, &selectors);
        debug!(root = %id, selector = %selectors, matched = nodes.len(), "scanning");
        nodes.push(root);

        let mut seed = Self {
            document,
            root,
            prefix,
            directives,
            filters,
            bindings: BindingTable::new(),
            scope: Scope::new(),
        };

        for node in nodes {
            seed.process_node(node);
        }

        let keys: Vec<String> = seed.bindings.keys().map(str::to_string).collect();
        for key in &keys {
            let value = initial.get(key).cloned().unwrap_or_default();
            seed.set(key, value);
        }
        debug!(root = %id, keys = keys.len(), "seeded");

        Ok(seed)
    }

    /// Parse and bind every directive attribute of `node`.
    ///
    /// Attributes are snapshotted first, so removals made while binding do
    /// not affect which attributes are visited.
    fn process_node(&mut self, node: NodeId) {
        let attributes = self.document.attributes(node).to_vec();
        for attribute in &attributes {
            match parse_directive(attribute, &self.prefix, &self.directives) {
                Some(descriptor) => self.bind_directive(node, descriptor),
                None => trace!(node = %node, attribute = %attribute.name, "not a directive"),
            }
        }
    }

    fn bind_directive(&mut self, element: NodeId, descriptor: DirectiveDescriptor) {
        self.document
            .remove_attribute(element, &descriptor.attribute.name);

        let id = self.bindings.entry(&descriptor.key);
        let Some(binding) = self.bindings.get_mut(id) else {
            return;
        };
        let current = binding.get();

        debug!(
            key = %descriptor.key,
            directive = %descriptor.name,
            argument = ?descriptor.argument,
            node = %element,
            "bind"
        );
        let bind = descriptor.directive.bind_fn().cloned();
        binding.push(BoundDirective { descriptor, element });

        if let Some(bind) = bind {
            if let Some(mut el) = ElementMut::new(&mut self.document, element) {
                bind(&mut el, &current);
            }
        }

        let key = binding.key().to_string();
        self.scope.install(&key, id);
    }

    // =========================================================================
    // Scope Access
    // =========================================================================

    /// Read a scope key.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.scope.get(&self.bindings, key)
    }

    /// Write a scope key. Reactive keys update the DOM before this returns.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.scope_mut().set(key, value);
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The scope, borrowed with what it needs to write.
    pub fn scope_mut(&mut self) -> ScopeMut<'_> {
        ScopeMut {
            scope: &mut self.scope,
            bindings: &self.bindings,
            document: &mut self.document,
            filters: &self.filters,
        }
    }

    /// The signal behind a reactive key, for building derived state on top.
    pub fn signal(&self, key: &str) -> Option<Signal<Value>> {
        self.bindings.by_key(key).map(|b| b.signal())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}
