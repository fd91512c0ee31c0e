// Telegram transport - obtains the mini-app launch payload
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use grammers_client::{Client, Config, InitParams, SignInError};
use grammers_session::Session;
use grammers_tl_types as tl;
use crate::{BOT_USERNAME, GAME_URL, START_PARAM, v_debug};

/// The messaging side of credential acquisition: one request type, one
/// result. Everything downstream only sees the returned web-view URL.
#[async_trait]
pub trait WebViewTransport: Send + Sync {
    async fn request_web_view(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// MTProto-backed transport for one account. The underlying client is
/// connected lazily on first use and reused for the account's lifetime.
pub struct TelegramTransport {
    session_path: PathBuf,
    api_id: i32,
    api_hash: String,
    client: tokio::sync::Mutex<Option<Client>>,
}

impl TelegramTransport {
    pub fn new(session_path: PathBuf, api_id: i32, api_hash: String) -> Self {
        Self {
            session_path,
            api_id,
            api_hash,
            client: tokio::sync::Mutex::new(None),
        }
    }

    async fn connect_if_needed(&self) -> Result<Client, Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.client.lock().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::connect(Config {
            session: Session::load_file_or_create(&self.session_path)?,
            api_id: self.api_id,
            api_hash: self.api_hash.clone(),
            params: InitParams::default(),
        })
        .await?;

        if !client.is_authorized().await? {
            return Err(format!(
                "session {} is not authorized; create the session first",
                self.session_path.display()
            )
            .into());
        }

        v_debug!("Telegram client connected for {}", self.session_path.display());
        *guard = Some(client.clone());
        Ok(client)
    }
}

#[async_trait]
impl WebViewTransport for TelegramTransport {
    async fn request_web_view(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let client = self.connect_if_needed().await?;

        let bot = client
            .resolve_username(BOT_USERNAME)
            .await?
            .ok_or_else(|| format!("bot @{} could not be resolved", BOT_USERNAME))?;
        let packed = bot.pack();

        let input_peer = tl::enums::InputPeer::User(tl::types::InputPeerUser {
            user_id: packed.id,
            access_hash: packed.access_hash.unwrap_or_default(),
        });
        let input_user = tl::enums::InputUser::User(tl::types::InputUser {
            user_id: packed.id,
            access_hash: packed.access_hash.unwrap_or_default(),
        });

        let result = client
            .invoke(&tl::functions::messages::RequestWebView {
                from_bot_menu: false,
                silent: false,
                compact: false,
                peer: input_peer,
                bot: input_user,
                url: Some(GAME_URL.to_string()),
                start_param: Some(START_PARAM.to_string()),
                theme_params: None,
                platform: "android".to_string(),
                reply_to: None,
                send_as: None,
            })
            .await?;

        match result {
            tl::enums::WebViewResult::Url(url_result) => Ok(url_result.url),
        }
    }
}

/// Pull the launch payload out of a web-view URL. The platform places it in
/// the `tgWebAppData` parameter and percent-encodes it twice.
pub fn extract_web_data(url: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let (_, rest) = url
        .split_once("tgWebAppData=")
        .ok_or("web view URL has no tgWebAppData parameter")?;
    let raw = rest.split('&').next().unwrap_or(rest);

    let once = urlencoding::decode(raw)?.into_owned();
    let twice = urlencoding::decode(&once)?.into_owned();
    Ok(twice)
}

/// Interactive login that creates (or re-authorizes) a session file.
pub async fn create_session(
    session_path: &Path,
    api_id: i32,
    api_hash: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let client = Client::connect(Config {
        session: Session::load_file_or_create(session_path)?,
        api_id,
        api_hash: api_hash.to_string(),
        params: InitParams::default(),
    })
    .await?;

    if !client.is_authorized().await? {
        let phone = prompt("Enter the phone number (international format): ")?;
        let login_token = client.request_login_code(phone.trim()).await?;
        let code = prompt("Enter the login code: ")?;

        match client.sign_in(&login_token, code.trim()).await {
            Ok(_) => {}
            Err(SignInError::PasswordRequired(password_token)) => {
                let hint = password_token.hint().unwrap_or("none");
                let password = prompt(&format!("Enter the 2FA password (hint: {}): ", hint))?;
                client.check_password(password_token, password.trim()).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    client.session().save_to_file(session_path)?;
    Ok(())
}

/// Best-effort logout before a session file is removed.
pub async fn sign_out(
    session_path: &Path,
    api_id: i32,
    api_hash: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let client = Client::connect(Config {
        session: Session::load_file_or_create(session_path)?,
        api_id,
        api_hash: api_hash.to_string(),
        params: InitParams::default(),
    })
    .await?;

    if client.is_authorized().await? {
        client.sign_out().await?;
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}
