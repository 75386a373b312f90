pub mod ports;
pub mod registry;

// Re-export commonly used items
pub use ports::{ChainError, ChainHandler, ChunkStream, GenerationSettings};
pub use registry::{HandlerRegistry, RegistryError};
