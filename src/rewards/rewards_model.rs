use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::rewards_errors::RewardError;

/// A redeemable reward. `redeemed` counts units claimed against points,
/// `used` counts units already consumed; `used <= redeemed <=
/// max_redeemables` holds after every accepted update.
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::rewards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub unit_cost: i32,
    pub redeemed: i32,
    pub used: i32,
    pub max_redeemables: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Model for creating a new reward
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::rewards)]
#[serde(rename_all = "camelCase")]
pub struct NewReward {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub unit_cost: i32,
    pub max_redeemables: i32,
}

impl NewReward {
    pub fn validate(&self) -> Result<(), RewardError> {
        if self.name.trim().is_empty() {
            return Err(RewardError::InvalidData(
                "Reward name is required".to_string(),
            ));
        }
        if self.unit_cost < 0 {
            return Err(RewardError::InvalidData(
                "Unit cost cannot be negative".to_string(),
            ));
        }
        if self.max_redeemables < 1 {
            return Err(RewardError::InvalidData(
                "Max redeemables must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Model for updating an existing reward
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RewardUpdate {
    pub id: String,
    pub name: String,
    pub unit_cost: i32,
    pub redeemed: i32,
    pub used: i32,
    pub max_redeemables: i32,
}

impl RewardUpdate {
    pub fn validate(&self) -> Result<(), RewardError> {
        if self.name.trim().is_empty() {
            return Err(RewardError::InvalidData(
                "Reward name is required".to_string(),
            ));
        }
        if self.unit_cost < 0 || self.redeemed < 0 || self.used < 0 {
            return Err(RewardError::InvalidData(
                "Reward counters cannot be negative".to_string(),
            ));
        }
        if self.max_redeemables < 1 {
            return Err(RewardError::InvalidData(
                "Max redeemables must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
