use std::{env, path::PathBuf, sync::Arc};

use crate::application::ports::ChainHandler;
use crate::application::registry::HandlerRegistry;
use crate::infrastructure::chains::EchoChain;
use crate::infrastructure::file_system::UploadStore;
use crate::presentation::http::handlers::{DocumentHandler, GenerateHandler};

pub struct AppContainer {
    pub chain_handler: Arc<dyn ChainHandler>,
    pub upload_store: Arc<UploadStore>,
    pub document_handler: Arc<DocumentHandler>,
    pub generate_handler: Arc<GenerateHandler>,
}

impl AppContainer {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Register built-in chains; downstream builds register theirs here.
        let mut registry = HandlerRegistry::new();
        registry.register(EchoChain::ID, || {
            Ok(Arc::new(EchoChain) as Arc<dyn ChainHandler>)
        });

        // Exactly one handler is active per process, resolved once at startup.
        let handler_id =
            env::var("CHAIN_HANDLER").unwrap_or_else(|_| EchoChain::ID.to_string());
        let chain_handler = registry.resolve(&handler_id)?;
        tracing::info!(
            "Resolved chain handler '{}' (registered: {:?})",
            handler_id,
            registry.ids()
        );

        let upload_dir = PathBuf::from(
            env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploaded_files".to_string()),
        );
        let upload_store = Arc::new(UploadStore::new(upload_dir));
        tracing::info!(
            "Uploaded documents are stored under {}",
            upload_store.upload_dir().display()
        );

        // Create HTTP handlers
        let document_handler = Arc::new(DocumentHandler::new(
            chain_handler.clone(),
            upload_store.clone(),
        ));
        let generate_handler = Arc::new(GenerateHandler::new(chain_handler.clone()));

        Ok(Self {
            chain_handler,
            upload_store,
            document_handler,
            generate_handler,
        })
    }
}
