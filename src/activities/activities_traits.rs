use async_trait::async_trait;

use super::activities_errors::Result;
use super::activities_model::{Activity, ActivityUpdate, NewActivity, PeriodType};

/// Trait defining the contract for Activity service operations.
#[async_trait]
pub trait ActivityServiceTrait: Send + Sync {
    fn get_activities(&self) -> Result<Vec<Activity>>;
    fn get_activity(&self, activity_id: &str) -> Result<Activity>;
    fn get_activities_by_period(&self, period: PeriodType) -> Result<Vec<Activity>>;
    async fn create_activity(&self, new_activity: NewActivity) -> Result<Activity>;
    async fn update_activity(&self, update: ActivityUpdate) -> Result<Activity>;
    async fn delete_activity(&self, activity_id: String) -> Result<Activity>;
}
