pub mod errors;
pub mod ids;
pub mod models;
pub mod starter;

pub use errors::TodoError;
pub use ids::{ListId, ParseIdError, TodoId, TodoListId};
