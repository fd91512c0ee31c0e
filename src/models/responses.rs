use serde::Deserialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

// Per-endpoint payload wrappers

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncPayload {
    #[serde(rename = "clickerUser")]
    pub clicker_user: crate::models::ClickerUser,
}

#[derive(Debug, Deserialize)]
pub struct BoostsPayload {
    #[serde(rename = "boostsForBuy")]
    pub boosts_for_buy: Vec<crate::models::Boost>,
}

#[derive(Debug, Deserialize)]
pub struct UpgradesPayload {
    #[serde(rename = "upgradesForBuy")]
    pub upgrades_for_buy: Vec<crate::models::Upgrade>,
}

#[derive(Debug, Deserialize)]
pub struct TasksPayload {
    pub tasks: Vec<crate::models::Task>,
}

/// The game API sometimes nests the real payload under `"found"` when the
/// top-level `"type"` field equals `"validation"` (typically on 422 replies).
/// Resolved once here; callers never re-check the discriminator.
#[derive(Debug)]
pub enum ResponseBody<T> {
    Direct(T),
    Validation(T),
}

impl<T: DeserializeOwned> ResponseBody<T> {
    pub fn parse(value: Value) -> Result<Self, serde_json::Error> {
        let is_validation = value.get("type").and_then(Value::as_str) == Some("validation");
        if is_validation {
            let found = value
                .get("found")
                .cloned()
                .ok_or_else(|| serde_json::Error::custom("validation response has no 'found' payload"))?;
            Ok(ResponseBody::Validation(serde_json::from_value(found)?))
        } else {
            Ok(ResponseBody::Direct(serde_json::from_value(value)?))
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            ResponseBody::Direct(payload) => payload,
            ResponseBody::Validation(payload) => payload,
        }
    }
}
