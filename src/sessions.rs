// Directory-backed CRUD for persisted Telegram login sessions
use std::fs;
use std::path::PathBuf;
use crate::config::Settings;
use crate::telegram;
use crate::{v_error, v_info};

pub struct SessionManager {
    session_dir: PathBuf,
    api_id: i32,
    api_hash: String,
}

impl SessionManager {
    pub fn new(settings: &Settings) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let session_dir = PathBuf::from(&settings.telegram.session_directory);
        fs::create_dir_all(&session_dir)?;

        Ok(Self {
            session_dir,
            api_id: settings.telegram.api_id,
            api_hash: settings.telegram.api_hash.clone(),
        })
    }

    pub fn session_path(&self, name: &str) -> PathBuf {
        self.session_dir.join(format!("{}.session", name))
    }

    /// Interactive login; the resulting session lands in the session
    /// directory as `<name>.session`.
    pub async fn create_session(&self, name: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        telegram::create_session(&self.session_path(name), self.api_id, &self.api_hash).await?;
        v_info!("Session '{}' created successfully.", name);
        Ok(())
    }

    pub fn session_names(&self) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.session_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_string_lossy().strip_suffix(".session") {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Log the session out when possible, then remove its file either way.
    pub async fn delete_session(&self, name: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = self.session_path(name);
        if !path.exists() {
            return Err(format!("no session named '{}'", name).into());
        }

        if let Err(e) = telegram::sign_out(&path, self.api_id, &self.api_hash).await {
            v_error!("Could not log out session '{}': {}", name, e);
        }

        fs::remove_file(&path)?;
        v_info!("Session '{}' deleted successfully.", name);
        Ok(())
    }
}
