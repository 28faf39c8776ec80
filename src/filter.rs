//! Filters - Named value transforms and the filter pipeline.
//!
//! A directive expression like `msg | upper | trim` runs the written value
//! through `upper`, then `trim`, before the directive sees it.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::directive::Directive;
use crate::types::Value;

/// A pure value transform.
pub type FilterFn = Rc<dyn Fn(&Value) -> Value>;

/// Filters by name.
///
/// Cloning is cheap: entries are shared.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, FilterFn>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a filter.
    pub fn register<F>(&mut self, name: impl Into<String>, filter: F) -> &mut Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        self.filters.insert(name.into(), Rc::new(filter));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        self.register(name, filter);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run `value` through the filter chain of one directive.
    ///
    /// A directive with a custom filter gets the whole chain and the registry
    /// is not consulted. Otherwise filters apply left to right and unknown
    /// names leave the value as it is.
    pub fn apply(&self, value: Value, names: &[String], directive: &Directive) -> Value {
        if let Some(custom) = directive.custom_filter() {
            return custom(&value, names);
        }

        names.iter().fold(value, |value, name| match self.get(name) {
            Some(filter) => filter(&value),
            None => {
                trace!(filter = %name, "unknown filter, skipped");
                value
            }
        })
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_list().entries(names).finish()
    }
}
