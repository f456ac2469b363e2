pub mod database;
pub mod error;
pub mod lists;
pub mod row_helpers;
pub mod schema;
pub mod starter;
pub mod todos;

pub use database::Database;
pub use error::StoreError;
pub use lists::ListRepo;
pub use starter::{StarterSnapshot, StarterState};
pub use todos::TodoRepo;
