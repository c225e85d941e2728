use async_trait::async_trait;

use super::rewards_errors::Result;
use super::rewards_model::{NewReward, Reward, RewardUpdate};

/// Trait defining the contract for Reward service operations.
#[async_trait]
pub trait RewardServiceTrait: Send + Sync {
    fn get_rewards(&self) -> Result<Vec<Reward>>;
    fn get_reward(&self, reward_id: &str) -> Result<Reward>;
    async fn create_reward(&self, new_reward: NewReward) -> Result<Reward>;
    async fn update_reward(&self, update: RewardUpdate) -> Result<Reward>;
}
