pub mod users_errors;
pub mod users_model;
pub mod users_repository;

pub use users_errors::*;
pub use users_model::*;
pub use users_repository::*;
