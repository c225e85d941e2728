pub mod activities_errors;
pub mod activities_model;
pub mod activities_repository;
pub mod activities_service;
pub mod activities_traits;

pub use activities_errors::*;
pub use activities_model::*;
pub use activities_repository::*;
pub use activities_service::*;
pub use activities_traits::*;
