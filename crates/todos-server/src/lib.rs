pub mod board;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod server;
pub mod service;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{build_router, start, AppState, ServerHandle};
pub use service::TodoService;
