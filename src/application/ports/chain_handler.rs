use async_trait::async_trait;
use futures::stream::BoxStream;
use std::path::Path;

use crate::domain::Message;

#[derive(Debug)]
pub enum ChainError {
    VectorStore(String),
    Unsupported(&'static str),
    Handler(String),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::VectorStore(msg) => write!(f, "Vector store error: {}", msg),
            ChainError::Unsupported(operation) => {
                write!(f, "Chain handler has not implemented the {} operation", operation)
            }
            ChainError::Handler(msg) => write!(f, "Chain handler error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

// The registry's `resolve` returns `Result<Arc<dyn ChainHandler>, _>`; tests
// call `.unwrap_err()` on it, which requires the `Ok` type to be `Debug`.
#[cfg(test)]
impl std::fmt::Debug for dyn ChainHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ChainHandler")
    }
}

/// Lazy sequence of text chunks produced by a chain, consumed incrementally.
pub type ChunkStream = BoxStream<'static, String>;

/// Generation settings forwarded to the chains: every conversation-request
/// field except the message list and the knowledge-base flag.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub seed: u64,
    pub bad: Option<Vec<String>>,
    pub stop: Option<Vec<String>>,
    pub stream: bool,
}

/// The single capability contract the facade dispatches to. Exactly one
/// implementation is resolved at startup and shared across all requests, so
/// implementations are responsible for their own thread safety.
#[async_trait]
pub trait ChainHandler: Send + Sync {
    async fn ingest_docs(&self, file_path: &Path, file_name: &str) -> Result<(), ChainError>;

    async fn rag_chain(
        &self,
        query: Option<&str>,
        chat_history: Vec<Message>,
        settings: GenerationSettings,
    ) -> Result<ChunkStream, ChainError>;

    async fn llm_chain(
        &self,
        query: Option<&str>,
        chat_history: Vec<Message>,
        settings: GenerationSettings,
    ) -> Result<ChunkStream, ChainError>;

    /// Optional capability. Handlers backed by a document store override this;
    /// the default reports the operation as unsupported.
    async fn document_search(
        &self,
        content: &str,
        num_docs: u32,
    ) -> Result<Vec<serde_json::Value>, ChainError> {
        let _ = (content, num_docs);
        Err(ChainError::Unsupported("document_search"))
    }
}
