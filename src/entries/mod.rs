pub mod entries_errors;
pub mod entries_model;
pub mod entries_repository;
pub mod entries_service;
pub mod entries_traits;

pub use entries_errors::*;
pub use entries_model::*;
pub use entries_repository::*;
pub use entries_service::*;
pub use entries_traits::*;
