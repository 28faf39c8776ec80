//! Directive Registry - Named element behaviors.
//!
//! A directive is registered in one of two shapes (see [`DirectiveDefinition`])
//! and normalized into a single [`Directive`] record on the way in, so the
//! binding code never has to care which shape the author used.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dom::ElementMut;
use crate::types::Value;

// =============================================================================
// Hook Types
// =============================================================================

/// Apply a value to an element. Called on every write to the bound key.
pub type UpdateFn = Rc<dyn Fn(&mut ElementMut<'_>, &Value)>;

/// One-time initialization, called when the directive is bound.
pub type BindFn = Rc<dyn Fn(&mut ElementMut<'_>, &Value)>;

/// Replaces the standard filter pipeline for a directive.
/// Receives the value and the directive's filter names.
pub type CustomFilterFn = Rc<dyn Fn(&Value, &[String]) -> Value>;

// =============================================================================
// Definition (as authored)
// =============================================================================

/// A directive as its author supplies it.
#[derive(Clone)]
pub enum DirectiveDefinition {
    /// Just an update function.
    Simple(UpdateFn),
    /// Update plus optional hooks.
    Full {
        update: UpdateFn,
        bind: Option<BindFn>,
        custom_filter: Option<CustomFilterFn>,
    },
}

impl DirectiveDefinition {
    pub fn simple<F>(update: F) -> Self
    where
        F: Fn(&mut ElementMut<'_>, &Value) + 'static,
    {
        Self::Simple(Rc::new(update))
    }

    /// A full definition with no optional hooks yet.
    pub fn full<F>(update: F) -> Self
    where
        F: Fn(&mut ElementMut<'_>, &Value) + 'static,
    {
        Self::Full {
            update: Rc::new(update),
            bind: None,
            custom_filter: None,
        }
    }

    /// Attach a bind hook (turns a simple definition into a full one).
    pub fn with_bind<F>(self, hook: F) -> Self
    where
        F: Fn(&mut ElementMut<'_>, &Value) + 'static,
    {
        let (update, _, custom_filter) = self.into_parts();
        Self::Full {
            update,
            bind: Some(Rc::new(hook)),
            custom_filter,
        }
    }

    /// Attach a custom filter (turns a simple definition into a full one).
    pub fn with_custom_filter<F>(self, filter: F) -> Self
    where
        F: Fn(&Value, &[String]) -> Value + 'static,
    {
        let (update, bind, _) = self.into_parts();
        Self::Full {
            update,
            bind,
            custom_filter: Some(Rc::new(filter)),
        }
    }

    fn into_parts(self) -> (UpdateFn, Option<BindFn>, Option<CustomFilterFn>) {
        match self {
            Self::Simple(update) => (update, None, None),
            Self::Full {
                update,
                bind,
                custom_filter,
            } => (update, bind, custom_filter),
        }
    }
}

impl fmt::Debug for DirectiveDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(_) => f.write_str("Simple(..)"),
            Self::Full {
                bind, custom_filter, ..
            } => f
                .debug_struct("Full")
                .field("bind", &bind.is_some())
                .field("custom_filter", &custom_filter.is_some())
                .finish_non_exhaustive(),
        }
    }
}

// =============================================================================
// Directive (normalized)
// =============================================================================

/// The canonical directive record every definition is normalized into.
#[derive(Clone)]
pub struct Directive {
    update: UpdateFn,
    bind: Option<BindFn>,
    custom_filter: Option<CustomFilterFn>,
}

impl From<DirectiveDefinition> for Directive {
    fn from(definition: DirectiveDefinition) -> Self {
        let (update, bind, custom_filter) = definition.into_parts();
        Self {
            update,
            bind,
            custom_filter,
        }
    }
}

impl Directive {
    /// The resolved update function.
    pub fn update_fn(&self) -> &UpdateFn {
        &self.update
    }

    pub fn bind_fn(&self) -> Option<&BindFn> {
        self.bind.as_ref()
    }

    pub fn custom_filter(&self) -> Option<&CustomFilterFn> {
        self.custom_filter.as_ref()
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive")
            .field("bind", &self.bind.is_some())
            .field("custom_filter", &self.custom_filter.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Directives by name, in registration order.
///
/// Cloning is cheap: entries are shared.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    directives: IndexMap<String, Rc<Directive>>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a directive. A replaced name keeps its position.
    pub fn register(&mut self, name: impl Into<String>, definition: DirectiveDefinition) -> &mut Self {
        self.directives
            .insert(name.into(), Rc::new(Directive::from(definition)));
        self
    }

    /// Register a directive that only has an update function.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, update: F) -> &mut Self
    where
        F: Fn(&mut ElementMut<'_>, &Value) + 'static,
    {
        self.register(name, DirectiveDefinition::simple(update))
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, definition: DirectiveDefinition) -> Self {
        self.register(name, definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Directive>> {
        self.directives.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
