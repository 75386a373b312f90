pub mod chain_handler;

pub use chain_handler::{ChainError, ChainHandler, ChunkStream, GenerationSettings};
