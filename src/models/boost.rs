use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Boost {
    pub id: String,
    pub level: i64,
    /// Absent on some boosts; only the energy refill gate consults it.
    #[serde(rename = "maxLevel", default)]
    pub max_level: Option<i64>,
    pub price: f64,
    #[serde(rename = "cooldownSeconds", default)]
    pub cooldown_seconds: i64,
}
