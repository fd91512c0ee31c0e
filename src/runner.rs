// Account loop driver with bounded retries, plus the fleet fan-out
use std::future::Future;
use std::sync::Arc;
use futures::stream::{self, StreamExt};
use tokio::time::{sleep, Duration};
use crate::client::{GameApi, GameClient};
use crate::config::Settings;
use crate::operations::TapperOperations;
use crate::sessions::SessionManager;
use crate::telegram::{extract_web_data, TelegramTransport, WebViewTransport};
use crate::{v_error, v_info};

/// Drives one account forever: credential acquisition, then cycle after
/// cycle until something fails, then back to credential acquisition under
/// the retry budget.
#[derive(Clone)]
pub struct AccountRunner {
    session_name: String,
    settings: Arc<Settings>,
    transport: Arc<dyn WebViewTransport>,
    client: GameClient,
}

impl AccountRunner {
    pub fn new(session_name: String, settings: Arc<Settings>, transport: Arc<dyn WebViewTransport>) -> Self {
        let client = GameClient::new(&session_name, &settings);
        Self { session_name, settings, transport, client }
    }

    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let runner = self.clone();
        run_with_retries(
            &self.session_name,
            self.settings.retry.max_retries,
            self.settings.retry.retry_delay_seconds,
            move || {
                let runner = runner.clone();
                async move { runner.run_once().await }
            },
        )
        .await
    }

    /// One attempt: authenticate from scratch, then loop cycles until an
    /// error propagates. There is no partial-cycle resumption; any failure
    /// fails the whole attempt.
    async fn run_once(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        v_info!("{}: Requesting web view launch data...", self.session_name);
        let url = self.transport.request_web_view().await?;
        let web_data = extract_web_data(&url)?;

        let token = self
            .client
            .login(&web_data)
            .await?
            .ok_or_else(|| format!("{}: login failed, no auth token returned", self.session_name))?;
        v_info!("{}: Logged in.", self.session_name);

        let ops = TapperOperations::new(&self.client, &self.settings, &self.session_name);
        loop {
            ops.run_cycle(&token).await?;
        }
    }
}

/// Run `attempt` up to `max_retries` times with a fixed delay between
/// failures. The first success wins; the last error propagates once the
/// budget is spent.
pub async fn run_with_retries<F, Fut>(
    session_name: &str,
    max_retries: u32,
    retry_delay_secs: u64,
    mut attempt: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>>,
{
    let mut last_error: Box<dyn std::error::Error + Send + Sync> = "no attempts were made".into();

    for attempt_number in 1..=max_retries {
        match attempt().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                v_error!(
                    "{}: Attempt {}/{} failed with error: {}",
                    session_name,
                    attempt_number,
                    max_retries,
                    e
                );
                last_error = e;
                if attempt_number < max_retries {
                    v_info!("{}: Retrying in {} seconds...", session_name, retry_delay_secs);
                    sleep(Duration::from_secs(retry_delay_secs)).await;
                }
            }
        }
    }

    v_error!("{}: All retry attempts failed.", session_name);
    Err(last_error)
}

/// Launch one runner per persisted session and wait for all of them. An
/// aborted account never cancels its siblings.
pub async fn run_fleet(
    settings: Arc<Settings>,
    sessions: &SessionManager,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let names = sessions.session_names()?;
    if names.is_empty() {
        v_info!("No sessions found.");
        return Ok(());
    }

    v_info!("🚀 Running the bot for {} session(s)...", names.len());

    let outcomes: Vec<(String, Result<(), Box<dyn std::error::Error + Send + Sync>>)> =
        stream::iter(names)
            .map(|name| {
                let settings = Arc::clone(&settings);
                let session_path = sessions.session_path(&name);
                async move {
                    let transport: Arc<dyn WebViewTransport> = Arc::new(TelegramTransport::new(
                        session_path,
                        settings.telegram.api_id,
                        settings.telegram.api_hash.clone(),
                    ));
                    let runner = AccountRunner::new(name.clone(), settings, transport);
                    let result = runner.run().await;
                    (name, result)
                }
            })
            .buffer_unordered(settings.fleet.max_concurrent_accounts)
            .collect()
            .await;

    let mut aborted = 0;
    for (name, outcome) in &outcomes {
        if let Err(e) = outcome {
            aborted += 1;
            v_error!("{}: account loop stopped: {}", name, e);
        }
    }
    if aborted > 0 {
        v_error!(
            "⚠️  {}/{} account(s) stopped after exhausting retries.",
            aborted,
            outcomes.len()
        );
    }

    fleet_result(aborted, outcomes.len())
}

/// Verdict for a finished fleet run. Individual aborts are tolerated so one
/// bad account cannot hide the others' progress, but a run where every
/// account aborted is itself a failure the caller can observe.
pub fn fleet_result(
    aborted: usize,
    total: usize,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if total > 0 && aborted == total {
        return Err(format!("all {} account(s) stopped after exhausting retries", total).into());
    }
    Ok(())
}
