//! # spark-seed
//!
//! Declarative attribute directives bound to a reactive scope.
//!
//! Markup declares bindings with attributes; the engine scans for them once
//! and wires each scope key to every element that depends on it:
//!
//! ```text
//! <span sd-text="msg | upper">   →   seed.set("msg", "hi")   →   <span>HI</span>
//! ```
//!
//! ## Architecture
//!
//! ```text
//! attributes → parse_directive → DirectiveDescriptor → BindingTable (by key)
//!            → Scope accessor per key → set → filters → directive update → DOM
//! ```
//!
//! Every write is synchronous: when `set` returns, all DOM effects are done.
//!
//! ## Modules
//!
//! - [`types`] - The dynamically-typed [`Value`]
//! - [`dom`] - In-memory document the engine binds against
//! - [`directive`] - Directive registry and attribute parser
//! - [`filter`] - Filter registry and pipeline
//! - [`binding`] - Reactive cells and the scope
//! - [`seed`] - Engine construction and scope access
//! - [`builtin`] - Default `text`/`show` directives and string filters

pub mod binding;
pub mod builtin;
pub mod directive;
pub mod dom;
pub mod error;
pub mod filter;
pub mod seed;
pub mod types;

// Re-export commonly used items
pub use types::Value;

pub use error::{DomError, SeedError};

pub use dom::{Attribute, Document, ElementMut, NodeId, SelectorList};

pub use directive::{
    parse_directive, parse_expression, Directive, DirectiveDefinition, DirectiveDescriptor,
    DirectiveRegistry, Expression,
};

pub use filter::{FilterFn, FilterRegistry};

pub use binding::{Binding, BindingId, BindingTable, BoundDirective, Scope, ScopeMut};

pub use seed::{Seed, SeedOptions, DEFAULT_PREFIX};
