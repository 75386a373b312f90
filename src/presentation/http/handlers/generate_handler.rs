use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use futures::{StreamExt, stream};
use std::sync::Arc;

use crate::application::ports::{ChainError, ChainHandler, ChunkStream};
use crate::presentation::http::dto::ChatRequestDto;

const VECTOR_STORE_ERROR: &str = "Error from vector store. Please ensure you have ingested some documents. Please check chain-server logs for more details.";
const CHAIN_SERVER_ERROR: &str =
    "Error from chain server. Please check chain-server logs for more details.";

pub struct GenerateHandler {
    chain: Arc<dyn ChainHandler>,
}

impl GenerateHandler {
    pub fn new(chain: Arc<dyn ChainHandler>) -> Self {
        Self { chain }
    }

    pub async fn generate(
        State(handler): State<Arc<GenerateHandler>>,
        Json(mut request): Json<ChatRequestDto>,
    ) -> Response {
        let query = request.take_last_user_turn();
        let settings = request.generation_settings();
        let use_knowledge_base = request.use_knowledge_base;
        let chat_history = request.messages;

        let result = if use_knowledge_base {
            tracing::info!("Knowledge base is enabled. Using rag chain for response generation.");
            handler
                .chain
                .rag_chain(query.as_deref(), chat_history, settings)
                .await
        } else {
            handler
                .chain
                .llm_chain(query.as_deref(), chat_history, settings)
                .await
        };

        match result {
            Ok(chunks) => chunk_stream_response(chunks),
            Err(ChainError::VectorStore(e)) => {
                tracing::error!(
                    "Error from vector store in /generate endpoint. Please ensure you have ingested some documents. Error details: {}",
                    e
                );
                chunk_stream_response(single_chunk(VECTOR_STORE_ERROR))
            }
            Err(e) => {
                tracing::error!("Error from /generate endpoint. Error details: {}", e);
                chunk_stream_response(single_chunk(CHAIN_SERVER_ERROR))
            }
        }
    }
}

/// Raw text chunks forwarded as they are produced; the success status is
/// committed before the first chunk, so chain failures after this point can
/// only be reported in-band.
fn chunk_stream_response(chunks: ChunkStream) -> Response {
    let body = Body::from_stream(chunks.map(Ok::<_, std::convert::Infallible>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn single_chunk(message: &str) -> ChunkStream {
    Box::pin(stream::iter([message.to_string()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationSettings;
    use crate::domain::Message;
    use crate::presentation::http::routes::generate_routes;
    use async_trait::async_trait;
    use axum::Router;
    use axum::body::to_bytes;
    use axum::http::{Method, Request};
    use std::path::Path;
    use std::sync::Mutex;
    use tower::ServiceExt;

    enum Mode {
        Stream,
        VectorStoreError,
        HandlerError,
    }

    struct Recorded {
        operation: &'static str,
        query: Option<String>,
        history: Vec<Message>,
        settings: GenerationSettings,
    }

    struct StubChain {
        mode: Mode,
        calls: Mutex<Vec<Recorded>>,
    }

    impl StubChain {
        fn new(mode: Mode) -> Arc<Self> {
            Arc::new(Self {
                mode,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn respond(
            &self,
            operation: &'static str,
            query: Option<&str>,
            history: Vec<Message>,
            settings: GenerationSettings,
        ) -> Result<ChunkStream, ChainError> {
            self.calls.lock().unwrap().push(Recorded {
                operation,
                query: query.map(String::from),
                history,
                settings,
            });

            match self.mode {
                Mode::Stream => Ok(Box::pin(stream::iter([
                    "chunk one ".to_string(),
                    "chunk two".to_string(),
                ]))),
                Mode::VectorStoreError => {
                    Err(ChainError::VectorStore("collection not loaded".to_string()))
                }
                Mode::HandlerError => Err(ChainError::Handler("model unavailable".to_string())),
            }
        }
    }

    #[async_trait]
    impl ChainHandler for StubChain {
        async fn ingest_docs(&self, _file_path: &Path, _file_name: &str) -> Result<(), ChainError> {
            Ok(())
        }

        async fn rag_chain(
            &self,
            query: Option<&str>,
            chat_history: Vec<Message>,
            settings: GenerationSettings,
        ) -> Result<ChunkStream, ChainError> {
            self.respond("rag_chain", query, chat_history, settings)
        }

        async fn llm_chain(
            &self,
            query: Option<&str>,
            chat_history: Vec<Message>,
            settings: GenerationSettings,
        ) -> Result<ChunkStream, ChainError> {
            self.respond("llm_chain", query, chat_history, settings)
        }
    }

    fn app(chain: Arc<StubChain>) -> Router {
        generate_routes(Arc::new(GenerateHandler::new(chain)))
    }

    fn generate_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_knowledge_base_dispatches_to_rag_chain() {
        let chain = StubChain::new(Mode::Stream);
        let response = app(chain.clone())
            .oneshot(generate_request(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "what is a llama?"}
                ],
                "use_knowledge_base": true
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
        assert_eq!(body_text(response).await, "chunk one chunk two");

        let calls = chain.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].operation, "rag_chain");
        assert_eq!(calls[0].query.as_deref(), Some("what is a llama?"));
        assert_eq!(calls[0].history.len(), 1);
        assert_eq!(calls[0].history[0].content, "be brief");
    }

    #[tokio::test]
    async fn test_plain_chain_is_used_without_knowledge_base() {
        let chain = StubChain::new(Mode::Stream);
        app(chain.clone())
            .oneshot(generate_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hello"}],
                "use_knowledge_base": false
            })))
            .await
            .unwrap();

        assert_eq!(chain.calls.lock().unwrap()[0].operation, "llm_chain");
    }

    #[tokio::test]
    async fn test_only_the_most_recent_user_turn_becomes_the_query() {
        let chain = StubChain::new(Mode::Stream);
        app(chain.clone())
            .oneshot(generate_request(serde_json::json!({
                "messages": [
                    {"role": "user", "content": "first question"},
                    {"role": "assistant", "content": "first answer"},
                    {"role": "user", "content": "second question"}
                ],
                "use_knowledge_base": false
            })))
            .await
            .unwrap();

        let calls = chain.calls.lock().unwrap();
        assert_eq!(calls[0].query.as_deref(), Some("second question"));
        let history: Vec<&str> = calls[0]
            .history
            .iter()
            .map(|message| message.content.as_str())
            .collect();
        assert_eq!(history, vec!["first question", "first answer"]);
    }

    #[tokio::test]
    async fn test_missing_user_turn_leaves_history_unchanged() {
        let chain = StubChain::new(Mode::Stream);
        app(chain.clone())
            .oneshot(generate_request(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "assistant", "content": "hello"}
                ],
                "use_knowledge_base": false
            })))
            .await
            .unwrap();

        let calls = chain.calls.lock().unwrap();
        assert_eq!(calls[0].query, None);
        assert_eq!(calls[0].history.len(), 2);
    }

    #[tokio::test]
    async fn test_settings_carry_defaults_and_exclude_nothing_else() {
        let chain = StubChain::new(Mode::Stream);
        app(chain.clone())
            .oneshot(generate_request(serde_json::json!({
                "messages": [],
                "use_knowledge_base": false
            })))
            .await
            .unwrap();

        let calls = chain.calls.lock().unwrap();
        assert_eq!(
            calls[0].settings,
            GenerationSettings {
                temperature: 0.2,
                top_p: 0.7,
                max_tokens: 1024,
                seed: 42,
                bad: None,
                stop: None,
                stream: false,
            }
        );
    }

    #[tokio::test]
    async fn test_vector_store_failure_streams_canned_text_on_200() {
        let chain = StubChain::new(Mode::VectorStoreError);
        let response = app(chain)
            .oneshot(generate_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hello"}],
                "use_knowledge_base": true
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, VECTOR_STORE_ERROR);
    }

    #[tokio::test]
    async fn test_other_failures_stream_generic_text_on_200() {
        let chain = StubChain::new(Mode::HandlerError);
        let response = app(chain)
            .oneshot(generate_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hello"}],
                "use_knowledge_base": false
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, CHAIN_SERVER_ERROR);
    }
}
