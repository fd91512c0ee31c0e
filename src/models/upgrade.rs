use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Upgrade {
    pub id: String,
    pub level: i64,
    /// Absent means the upgrade is uncapped
    #[serde(rename = "maxLevel")]
    pub max_level: Option<i64>,
    pub price: f64,
    #[serde(rename = "profitPerHourDelta")]
    pub profit_per_hour_delta: f64,
    #[serde(rename = "cooldownSeconds", default)]
    pub cooldown_seconds: i64,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    #[serde(rename = "isExpired")]
    pub is_expired: bool,
}
