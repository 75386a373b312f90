use axum::Router;
use axum::http::{HeaderValue, Method};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{DocumentHandler, GenerateHandler},
    routes::{document_routes, generate_routes, health_routes},
};

// Local development frontends allowed to call the service.
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3001", "http://localhost:6006"];

pub struct HttpServer {
    document_handler: Arc<DocumentHandler>,
    generate_handler: Arc<GenerateHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        document_handler: Arc<DocumentHandler>,
        generate_handler: Arc<GenerateHandler>,
        port: Option<u16>,
    ) -> Self {
        Self {
            document_handler,
            generate_handler,
            port: port.unwrap_or(3000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // Credentialed CORS rejects wildcard values, so the methods are
        // spelled out and headers mirror the request.
        let mut origins = Vec::new();
        for origin in ALLOWED_ORIGINS {
            origins.push(origin.parse::<HeaderValue>()?);
        }
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);

        let app = Router::new()
            .merge(health_routes())
            .merge(document_routes(self.document_handler.clone()))
            .merge(generate_routes(self.generate_handler.clone()))
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("chain-server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
