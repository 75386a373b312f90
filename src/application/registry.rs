use std::sync::Arc;

use crate::application::ports::{ChainError, ChainHandler};

#[derive(Debug)]
pub enum RegistryError {
    UnknownHandler(String),
    Construction { id: String, reason: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::UnknownHandler(id) => {
                write!(f, "No chain handler registered under '{}'", id)
            }
            RegistryError::Construction { id, reason } => {
                write!(f, "Chain handler '{}' could not be constructed: {}", id, reason)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

type HandlerFactory = Box<dyn Fn() -> Result<Arc<dyn ChainHandler>, ChainError> + Send + Sync>;

/// Named chain handler constructors. The configured identifier is resolved
/// exactly once at startup; resolution failure is fatal to the process.
pub struct HandlerRegistry {
    entries: Vec<(String, HandlerFactory)>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The first registration of an identifier wins; later ones are ignored.
    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn() -> Result<Arc<dyn ChainHandler>, ChainError> + Send + Sync + 'static,
    {
        if self.contains(id) {
            return;
        }
        self.entries.push((id.to_string(), Box::new(factory)));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn resolve(&self, id: &str) -> Result<Arc<dyn ChainHandler>, RegistryError> {
        let (_, factory) = self
            .entries
            .iter()
            .find(|(name, _)| name == id)
            .ok_or_else(|| RegistryError::UnknownHandler(id.to_string()))?;

        factory().map_err(|e| RegistryError::Construction {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
