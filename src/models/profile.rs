use serde::Deserialize;

/// In-game player state as returned by the sync and tap endpoints.
/// The balance is mutated locally to reflect purchases before the next
/// remote read confirms them.
#[derive(Debug, Deserialize, Clone)]
pub struct ClickerUser {
    #[serde(rename = "availableTaps", default)]
    pub available_taps: i64,
    #[serde(rename = "balanceCoins")]
    pub balance_coins: f64,
    #[serde(rename = "totalCoins", default)]
    pub total_coins: f64,
    #[serde(rename = "earnPassivePerSec", default)]
    pub earn_passive_per_sec: f64,
    #[serde(rename = "earnPassivePerHour", default)]
    pub earn_passive_per_hour: f64,
    #[serde(rename = "lastPassiveEarn", default)]
    pub last_passive_earn: f64,
}
