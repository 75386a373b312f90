use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route("/uploadDocument", post(DocumentHandler::upload_document))
        .route("/documentSearch", post(DocumentHandler::document_search))
        // Uploads are not size-capped.
        .layer(DefaultBodyLimit::disable())
        .with_state(document_handler)
}
