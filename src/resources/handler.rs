use std::{
    fmt,
    io::{self, Read},
};

use crate::resources::PathResolver;

/// Prefix recognized by [`SchemeHandler`].
pub const RESOURCE_SCHEME: &str = "resource://";

/// A recognizer/resolver pair for one family of URIs.
pub trait ResourceHandler: Send + Sync {
    /// Whether this handler is responsible for `uri`.
    fn handles(&self, uri: &str) -> bool;

    /// Opens the resource behind `uri`. `Ok(None)` means "not found".
    fn resolve(&self, uri: &str) -> io::Result<Option<Box<dyn Read>>>;
}

/// Strips [`RESOURCE_SCHEME`] and delegates the remaining path to a [`PathResolver`].
#[derive(Debug, Clone)]
pub struct SchemeHandler {
    resolver: PathResolver,
}

impl SchemeHandler {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }
}

impl ResourceHandler for SchemeHandler {
    fn handles(&self, uri: &str) -> bool {
        uri.starts_with(RESOURCE_SCHEME)
    }

    fn resolve(&self, uri: &str) -> io::Result<Option<Box<dyn Read>>> {
        let Some(path) = uri.strip_prefix(RESOURCE_SCHEME) else {
            return Ok(None);
        };

        Ok(self
            .resolver
            .resolve(path)?
            .map(|file| Box::new(file) as Box<dyn Read>))
    }
}

/// Ordered lookup list of handlers. The first handler that recognizes a URI owns it.
#[derive(Default)]
pub struct ResourceRegistry {
    handlers: Vec<Box<dyn ResourceHandler>>,
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: impl ResourceHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn with_handler(mut self, handler: impl ResourceHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    pub fn handles(&self, uri: &str) -> bool {
        self.handlers.iter().any(|handler| handler.handles(uri))
    }

    /// Resolves `uri` through the first handler that recognizes it.
    ///
    /// Returns `Ok(None)` both when no handler recognizes the URI and when the owning handler
    /// cannot find it.
    pub fn resolve(&self, uri: &str) -> io::Result<Option<Box<dyn Read>>> {
        match self.handlers.iter().find(|handler| handler.handles(uri)) {
            Some(handler) => handler.resolve(uri),
            None => Ok(None),
        }
    }

    /// Reads the whole resource into a string.
    pub fn read_to_string(&self, uri: &str) -> io::Result<Option<String>> {
        let Some(mut reader) = self.resolve(uri)? else {
            return Ok(None);
        };

        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Some(content))
    }
}
