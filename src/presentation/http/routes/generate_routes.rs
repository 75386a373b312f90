use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::GenerateHandler;

pub fn generate_routes(generate_handler: Arc<GenerateHandler>) -> Router {
    Router::new()
        .route("/generate", post(GenerateHandler::generate))
        .with_state(generate_handler)
}
