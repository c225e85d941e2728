use async_trait::async_trait;

use crate::activities::PeriodType;

use super::entries_errors::Result;
use super::entries_model::{Entry, EntryUpdate};

/// Trait defining the contract for entry lifecycle operations.
#[async_trait]
pub trait EntryServiceTrait: Send + Sync {
    fn get_open_entries(&self, period: PeriodType) -> Result<Vec<Entry>>;
    fn get_entry(&self, period: PeriodType, entry_id: &str) -> Result<Entry>;
    async fn update_entry(&self, period: PeriodType, update: EntryUpdate) -> Result<Entry>;
    async fn delete_entry(&self, period: PeriodType, entry_id: String) -> Result<Entry>;
}
