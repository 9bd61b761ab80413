//! Custom URI scheme resolution for scripts.
//!
//! Scripts reference shared modules and fixture files through `resource://relative/path`.
//! The engine asks a [`ResourceRegistry`] for every such URI; the registry delegates to the
//! first [`ResourceHandler`] that recognizes it.

mod handler;
mod path_resolver;

pub use handler::{RESOURCE_SCHEME, ResourceHandler, ResourceRegistry, SchemeHandler};
pub use path_resolver::PathResolver;
