use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::ports::ChainHandler;
use crate::infrastructure::file_system::UploadStore;
use crate::presentation::http::dto::{DocumentSearchDto, MessageResponseDto};

pub struct DocumentHandler {
    chain: Arc<dyn ChainHandler>,
    upload_store: Arc<UploadStore>,
}

impl DocumentHandler {
    pub fn new(chain: Arc<dyn ChainHandler>, upload_store: Arc<UploadStore>) -> Self {
        Self {
            chain,
            upload_store,
        }
    }

    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut upload: Option<(String, Vec<u8>)> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let Some(file_name) = field.file_name().map(|name| name.to_string()) else {
                continue;
            };
            if file_name.is_empty() {
                continue;
            }

            let data = field
                .bytes()
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?
                .to_vec();

            upload = Some((file_name, data));
            break;
        }

        // An upload without a usable filename is answered with a 200, not an
        // error status.
        let Some((file_name, data)) = upload else {
            return Ok((
                StatusCode::OK,
                Json(MessageResponseDto::new("No files provided")),
            ));
        };

        match handler.ingest_upload(&file_name, &data).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(MessageResponseDto::new("File uploaded successfully")),
            )),
            Err(e) => {
                tracing::error!(
                    "Error from /uploadDocument endpoint. Ingestion of file {} failed with error: {}",
                    file_name,
                    e
                );
                Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponseDto::new(e.to_string())),
                ))
            }
        }
    }

    async fn ingest_upload(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (file_path, safe_name) = self.upload_store.store(file_name, data).await?;
        self.chain.ingest_docs(&file_path, &safe_name).await?;
        Ok(())
    }

    pub async fn document_search(
        State(handler): State<Arc<DocumentHandler>>,
        Json(request): Json<DocumentSearchDto>,
    ) -> Json<Vec<serde_json::Value>> {
        match handler
            .chain
            .document_search(&request.content, request.num_docs)
            .await
        {
            Ok(documents) => Json(documents),
            Err(e) => {
                // "unsupported" and "failed" both degrade to an empty result.
                tracing::error!("Error from /documentSearch endpoint. Error details: {}", e);
                Json(Vec::new())
            }
        }
    }
}
