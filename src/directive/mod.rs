//! Directives - Registry and attribute parsing.
//!
//! - [`DirectiveRegistry`] - Named behaviors, normalized at registration
//! - [`parse_directive`] - One attribute to one [`DirectiveDescriptor`]

mod parser;
mod registry;

pub use parser::*;
pub use registry::*;
