//! Binding Table - One reactive cell per scope key.
//!
//! Each [`Binding`] owns the key's current value and the ordered list of
//! directives that depend on it. Writing the binding stores the value and
//! fans it out to every directive, synchronously, in discovery order.

use std::fmt;

use indexmap::IndexMap;
use spark_signals::{signal_with_equals, Signal};
use tracing::trace;

use crate::directive::DirectiveDescriptor;
use crate::dom::{Document, ElementMut, NodeId};
use crate::filter::FilterRegistry;
use crate::types::Value;

// =============================================================================
// Bound Directive
// =============================================================================

/// A descriptor attached to the element it was parsed from.
#[derive(Debug, Clone)]
pub struct BoundDirective {
    pub descriptor: DirectiveDescriptor,
    pub element: NodeId,
}

impl BoundDirective {
    /// Apply `value` to this directive's element, through its filters.
    fn apply(&self, value: &Value, document: &mut Document, filters: &FilterRegistry) {
        let descriptor = &self.descriptor;
        let value = match &descriptor.filters {
            Some(names) if value.is_truthy() => {
                filters.apply(value.clone(), names, &descriptor.directive)
            }
            _ => value.clone(),
        };

        let Some(mut element) = ElementMut::new(document, self.element) else {
            return;
        };
        trace!(key = %descriptor.key, directive = %descriptor.name, node = %self.element, value = %value, "update");
        (descriptor.update)(&mut element, &value);
    }
}

// =============================================================================
// Binding
// =============================================================================

/// Index of a [`Binding`] inside its [`BindingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

impl BindingId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The reactive cell for one scope key.
///
/// The value lives in a signal, so host code can derive from it. Fan-out to
/// directives is explicit and does not go through effect tracking.
pub struct Binding {
    key: String,
    value: Signal<Value>,
    directives: Vec<BoundDirective>,
}

impl Binding {
    fn new(key: String) -> Self {
        Self {
            key,
            value: signal_with_equals(Value::Undefined, same_value),
            directives: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value (the last one written, unfiltered).
    pub fn get(&self) -> Value {
        self.value.get()
    }

    /// The signal holding this binding's value.
    pub fn signal(&self) -> Signal<Value> {
        self.value.clone()
    }

    /// Directives depending on this key, in discovery order.
    pub fn directives(&self) -> &[BoundDirective] {
        &self.directives
    }

    pub(crate) fn push(&mut self, directive: BoundDirective) {
        self.directives.push(directive);
    }

    /// Store `value`, then update every dependent directive.
    ///
    /// Each directive filters its own copy of the written value; nothing
    /// carries over from one directive to the next.
    pub fn set(&self, value: Value, document: &mut Document, filters: &FilterRegistry) {
        self.value.set(value.clone());
        for directive in &self.directives {
            directive.apply(&value, document, filters);
        }
    }
}

/// Equality for the stored value: numbers compare by bits, so `-0` replaces
/// `0` and a written `NaN` is kept as written.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("value", &self.get())
            .field("directives", &self.directives)
            .finish()
    }
}

// =============================================================================
// Binding Table
// =============================================================================

/// All bindings of one engine, keyed by scope key in first-sighting order.
#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: IndexMap<String, Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding for `key`, created (empty, undefined) on first sight.
    pub fn entry(&mut self, key: &str) -> BindingId {
        if let Some(index) = self.bindings.get_index_of(key) {
            return BindingId(index);
        }
        let (index, _) = self
            .bindings
            .insert_full(key.to_string(), Binding::new(key.to_string()));
        BindingId(index)
    }

    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get_index(id.0).map(|(_, binding)| binding)
    }

    pub(crate) fn get_mut(&mut self, id: BindingId) -> Option<&mut Binding> {
        self.bindings.get_index_mut(id.0).map(|(_, binding)| binding)
    }

    pub fn id_of(&self, key: &str) -> Option<BindingId> {
        self.bindings.get_index_of(key).map(BindingId)
    }

    pub fn by_key(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Keys in first-sighting order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
