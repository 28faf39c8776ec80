//! Scope - The caller-facing property bag.
//!
//! Every key that some directive depends on has an accessor: a non-owning
//! [`BindingId`] into the binding table. Reads go to the binding, writes go
//! through the binding's fan-out. Any other key is a plain property.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::trace;

use super::table::{BindingId, BindingTable};
use crate::dom::Document;
use crate::filter::FilterRegistry;
use crate::types::Value;

/// Accessor map plus plain (non-reactive) properties.
#[derive(Debug, Default)]
pub struct Scope {
    accessors: IndexMap<String, BindingId>,
    plain: HashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an accessor for `key`. Returns `false` if one already exists,
    /// in which case nothing changes.
    pub fn install(&mut self, key: &str, binding: BindingId) -> bool {
        if self.accessors.contains_key(key) {
            return false;
        }
        // A plain value under the same name is shadowed from now on.
        self.plain.remove(key);
        self.accessors.insert(key.to_string(), binding);
        true
    }

    pub fn accessor(&self, key: &str) -> Option<BindingId> {
        self.accessors.get(key).copied()
    }

    pub fn is_reactive(&self, key: &str) -> bool {
        self.accessors.contains_key(key)
    }

    /// Reactive keys, in installation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Read a key: the binding's value for reactive keys, else the plain value.
    pub fn get(&self, bindings: &BindingTable, key: &str) -> Option<Value> {
        match self.accessor(key) {
            Some(id) => bindings.get(id).map(|b| b.get()),
            None => self.plain.get(key).cloned(),
        }
    }
}

// =============================================================================
// ScopeMut
// =============================================================================

/// A scope borrowed together with everything a write needs to fan out.
pub struct ScopeMut<'a> {
    pub(crate) scope: &'a mut Scope,
    pub(crate) bindings: &'a BindingTable,
    pub(crate) document: &'a mut Document,
    pub(crate) filters: &'a FilterRegistry,
}

impl ScopeMut<'_> {
    pub fn get(&self, key: &str) -> Option<Value> {
        self.scope.get(self.bindings, key)
    }

    pub fn is_reactive(&self, key: &str) -> bool {
        self.scope.is_reactive(key)
    }

    /// Write a key.
    ///
    /// For a reactive key this stores the value and updates every dependent
    /// directive before returning. Other keys are stored as plain properties.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let bindings = self.bindings;
        let binding = self.scope.accessor(key).and_then(|id| bindings.get(id));

        match binding {
            Some(binding) => binding.set(value, self.document, self.filters),
            None => {
                trace!(key, "plain write, not reactive");
                self.scope.plain.insert(key.to_string(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_once() {
        let mut bindings = BindingTable::new();
        let id = bindings.entry("msg");
        let mut scope = Scope::new();

        assert!(scope.install("msg", id));
        assert!(!scope.install("msg", id));
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.accessor("msg"), Some(id));
    }

    #[test]
    fn test_plain_and_reactive_writes() {
        let mut bindings = BindingTable::new();
        let id = bindings.entry("msg");
        let mut scope = Scope::new();
        scope.install("msg", id);
        let mut document = Document::new();
        let filters = FilterRegistry::new();

        let mut view = ScopeMut {
            scope: &mut scope,
            bindings: &bindings,
            document: &mut document,
            filters: &filters,
        };
        view.set("msg", "hi");
        view.set("other", 1);

        assert_eq!(view.get("msg"), Some(Value::from("hi")));
        assert_eq!(view.get("other"), Some(Value::from(1)));
        assert_eq!(view.get("missing"), None);
        assert!(view.is_reactive("msg"));
        assert!(!view.is_reactive("other"));
        assert_eq!(bindings.by_key("msg").unwrap().get(), Value::from("hi"));
    }
}
