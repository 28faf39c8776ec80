//! Bindings - Reactive cells and the scope that exposes them.
//!
//! - [`BindingTable`] - Owns one [`Binding`] per scope key
//! - [`Scope`] - Key to [`BindingId`] accessors, plus plain properties
//!
//! # Data flow
//!
//! ```text
//! scope.set(key) → Binding::set → per directive: filters → update(element)
//! ```

mod scope;
mod table;

pub use scope::*;
pub use table::*;
