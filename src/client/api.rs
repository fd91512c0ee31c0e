use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::models::*;
use crate::config::Settings;
use crate::{API_BASE_URL, v_debug, v_error, v_info};

/// Typed operations of the game API, one per remote capability. The tapper
/// cycle is written against this trait; `GameClient` is the live
/// implementation.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn login(
        &self,
        web_data: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_profile(
        &self,
        token: &str,
    ) -> Result<Option<ClickerUser>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_boosts(
        &self,
        token: &str,
    ) -> Result<Option<Vec<Boost>>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_upgrades(
        &self,
        token: &str,
    ) -> Result<Option<Vec<Upgrade>>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_tasks(
        &self,
        token: &str,
    ) -> Result<Option<Vec<Task>>, Box<dyn std::error::Error + Send + Sync>>;

    async fn send_taps(
        &self,
        token: &str,
        available_energy: i64,
        taps: i64,
    ) -> Result<Option<ClickerUser>, Box<dyn std::error::Error + Send + Sync>>;

    async fn buy_boost(
        &self,
        token: &str,
        boost_id: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn buy_upgrade(
        &self,
        token: &str,
        upgrade_id: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn check_task(
        &self,
        token: &str,
        task_id: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Client for the game's HTTP API. One instance per account; the bearer
/// token is passed per call because a fresh one is obtained every attempt.
#[derive(Clone)]
pub struct GameClient {
    http: reqwest::Client,
    session_name: String,
    body_statuses: Vec<u16>,
}

impl GameClient {
    pub fn new(session_name: &str, settings: &Settings) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(settings.http.request_timeout_seconds))
            .build()
            .unwrap();

        GameClient {
            http,
            session_name: session_name.to_string(),
            body_statuses: settings.http.body_statuses.clone(),
        }
    }

    /// POST a JSON body and return the parsed JSON reply.
    ///
    /// `Ok(None)` means the reply was unusable (unexpected status or
    /// malformed JSON) and the caller should skip the current phase.
    /// `Err` means the transport itself failed; retries are the loop
    /// driver's responsibility, never this client's.
    async fn post(
        &self,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> Result<Option<Value>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}{}", API_BASE_URL, path);
        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() && !self.body_statuses.contains(&status.as_u16()) {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response".to_string());
            v_error!(
                "{}: Request to {} failed with status {}.",
                self.session_name,
                path,
                status
            );
            v_error!("{}: Response: {}", self.session_name, response_body);
            return Ok(None);
        }

        if !status.is_success() {
            v_debug!(
                "{}: Received {} status. Treating as a body-bearing response.",
                self.session_name,
                status.as_u16()
            );
        }

        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                v_error!("{}: Malformed JSON from {}: {}", self.session_name, path, e);
                Ok(None)
            }
        }
    }

    /// Unwrap the validation envelope and parse the typed payload.
    fn parse_payload<T: DeserializeOwned>(&self, value: Value, path: &str) -> Option<T> {
        match ResponseBody::parse(value) {
            Ok(body) => Some(body.into_inner()),
            Err(e) => {
                v_error!(
                    "{}: Unexpected payload shape from {}: {}",
                    self.session_name,
                    path,
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl GameApi for GameClient {
    /// Exchange a mini-app launch payload for a bearer token.
    async fn login(
        &self,
        web_data: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::json!({
            "initDataRaw": web_data,
            "fingerprint": {},
        });
        let response = self.post("/auth/auth-by-telegram-webapp", body, None).await?;
        Ok(response
            .and_then(|value| self.parse_payload::<AuthPayload>(value, "/auth/auth-by-telegram-webapp"))
            .map(|payload| payload.auth_token))
    }

    async fn get_profile(
        &self,
        token: &str,
    ) -> Result<Option<ClickerUser>, Box<dyn std::error::Error + Send + Sync>> {
        let response = self.post("/clicker/sync", serde_json::json!({}), Some(token)).await?;
        Ok(response
            .and_then(|value| self.parse_payload::<SyncPayload>(value, "/clicker/sync"))
            .map(|payload| payload.clicker_user))
    }

    async fn get_boosts(
        &self,
        token: &str,
    ) -> Result<Option<Vec<Boost>>, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .post("/clicker/boosts-for-buy", serde_json::json!({}), Some(token))
            .await?;
        Ok(response
            .and_then(|value| self.parse_payload::<BoostsPayload>(value, "/clicker/boosts-for-buy"))
            .map(|payload| payload.boosts_for_buy))
    }

    async fn get_upgrades(
        &self,
        token: &str,
    ) -> Result<Option<Vec<Upgrade>>, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .post("/clicker/upgrades-for-buy", serde_json::json!({}), Some(token))
            .await?;
        Ok(response
            .and_then(|value| self.parse_payload::<UpgradesPayload>(value, "/clicker/upgrades-for-buy"))
            .map(|payload| payload.upgrades_for_buy))
    }

    async fn get_tasks(
        &self,
        token: &str,
    ) -> Result<Option<Vec<Task>>, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .post("/clicker/list-tasks", serde_json::json!({}), Some(token))
            .await?;
        Ok(response
            .and_then(|value| self.parse_payload::<TasksPayload>(value, "/clicker/list-tasks"))
            .map(|payload| payload.tasks))
    }

    /// Submit taps; returns the updated profile on success.
    async fn send_taps(
        &self,
        token: &str,
        available_energy: i64,
        taps: i64,
    ) -> Result<Option<ClickerUser>, Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::json!({
            "availableTaps": available_energy,
            "count": taps,
            "timestamp": chrono::Utc::now().timestamp(),
        });
        let response = self.post("/clicker/tap", body, Some(token)).await?;
        Ok(response
            .and_then(|value| self.parse_payload::<SyncPayload>(value, "/clicker/tap"))
            .map(|payload| payload.clicker_user))
    }

    async fn buy_boost(
        &self,
        token: &str,
        boost_id: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::json!({
            "boostId": boost_id,
            "timestamp": chrono::Utc::now().timestamp(),
        });
        let response = self.post("/clicker/buy-boost", body, Some(token)).await?;
        if response.is_some() {
            v_debug!("{}: buy-boost {} accepted", self.session_name, boost_id);
        }
        Ok(response.is_some())
    }

    async fn buy_upgrade(
        &self,
        token: &str,
        upgrade_id: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::json!({
            "upgradeId": upgrade_id,
            "timestamp": chrono::Utc::now().timestamp(),
        });
        let response = self.post("/clicker/buy-upgrade", body, Some(token)).await?;
        Ok(response.is_some())
    }

    async fn check_task(
        &self,
        token: &str,
        task_id: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::json!({
            "taskId": task_id,
        });
        let response = self.post("/clicker/check-task", body, Some(token)).await?;
        if response.is_none() {
            v_info!("{}: check-task {} returned no payload", self.session_name, task_id);
        }
        Ok(response.is_some())
    }
}
