pub mod document_handler;
pub mod generate_handler;

pub use document_handler::DocumentHandler;
pub use generate_handler::GenerateHandler;
