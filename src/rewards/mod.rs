pub mod rewards_errors;
pub mod rewards_model;
pub mod rewards_repository;
pub mod rewards_service;
pub mod rewards_traits;

pub use rewards_errors::*;
pub use rewards_model::*;
pub use rewards_repository::*;
pub use rewards_service::*;
pub use rewards_traits::*;
