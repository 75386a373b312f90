pub mod chat;

pub use chat::{InvalidRole, Message, Role};
