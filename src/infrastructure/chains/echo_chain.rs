use async_trait::async_trait;
use futures::stream;
use std::path::Path;

use crate::application::ports::{ChainError, ChainHandler, ChunkStream, GenerationSettings};
use crate::domain::Message;

/// Development chain: lets the service run end-to-end without a model
/// backend. Ingestion is a no-op and both chains echo the query back.
pub struct EchoChain;

impl EchoChain {
    pub const ID: &'static str = "echo";

    fn reply(prefix: &str, query: Option<&str>) -> ChunkStream {
        let text = match query {
            Some(query) => format!("{} {}", prefix, query),
            None => prefix.to_string(),
        };
        let chunks: Vec<String> = text
            .split_inclusive(' ')
            .map(|chunk| chunk.to_string())
            .collect();

        Box::pin(stream::iter(chunks))
    }
}

#[async_trait]
impl ChainHandler for EchoChain {
    async fn ingest_docs(&self, file_path: &Path, file_name: &str) -> Result<(), ChainError> {
        tracing::info!(
            "Echo chain accepted {} at {} without indexing it",
            file_name,
            file_path.display()
        );
        Ok(())
    }

    async fn rag_chain(
        &self,
        query: Option<&str>,
        _chat_history: Vec<Message>,
        _settings: GenerationSettings,
    ) -> Result<ChunkStream, ChainError> {
        Ok(Self::reply("No knowledge base is configured. You asked:", query))
    }

    async fn llm_chain(
        &self,
        query: Option<&str>,
        _chat_history: Vec<Message>,
        _settings: GenerationSettings,
    ) -> Result<ChunkStream, ChainError> {
        Ok(Self::reply("No model is configured. You asked:", query))
    }
}
