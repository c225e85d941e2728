pub mod generation_registry;
pub mod provisioning_job;
pub mod rewards_reset_job;
pub mod rollover_job;
pub mod scheduling_model;
pub mod scheduling_traits;

pub use generation_registry::*;
pub use provisioning_job::*;
pub use rewards_reset_job::*;
pub use rollover_job::*;
pub use scheduling_model::*;
pub use scheduling_traits::*;
