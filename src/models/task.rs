use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Task {
    pub id: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "rewardCoins", default)]
    pub reward_coins: f64,
    /// Only present on the daily streak task
    #[serde(default)]
    pub days: Option<i64>,
}
