pub mod db;

pub mod activities;
pub mod entries;
pub mod errors;
pub mod hooks;
pub mod rewards;
pub mod scheduling;
pub mod schema;
pub mod users;

pub use errors::{Error, Result};

pub use activities::*;
pub use scheduling::*;
