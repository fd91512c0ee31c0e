use serde::{Deserialize, Serialize};
use crate::v_info;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub telegram: TelegramConfig,
    pub taps: TapConfig,
    pub boosts: BoostConfig,
    pub upgrades: UpgradeConfig,
    pub retry: RetryConfig,
    pub http: HttpConfig,
    pub fleet: FleetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Telegram application ID from my.telegram.org
    pub api_id: i32,
    /// Telegram application hash from my.telegram.org
    pub api_hash: String,
    /// Filesystem root for persisted login sessions
    pub session_directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Energy threshold below which the tap phase defers to energy management
    pub min_available_energy: i64,
    /// [min, max] seconds to wait when energy is depleted
    pub send_taps_wait: [u64; 2],
    /// [min, max] seconds of extra cooldown after an energy wait
    pub send_taps_cooldown: [u64; 2],
    /// [min, max] taps submitted per cycle
    pub send_taps_count: [i64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Level ceiling for non-energy boost purchases
    pub max_level_boost: i64,
    /// Buy the full-energy refill boost automatically when energy runs out
    pub apply_daily_energy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Enable the upgrade-purchasing phase
    pub auto_upgrade: bool,
    /// Level ceiling for upgrade purchases
    pub max_level_upgrade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Attempts per account before its loop is abandoned
    pub max_retries: u32,
    /// Fixed delay between attempts in seconds
    pub retry_delay_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds for game API calls
    pub request_timeout_seconds: u64,
    /// Non-2xx statuses whose responses still carry a usable JSON body.
    /// The game API answers validation-style payloads under 422.
    pub body_statuses: Vec<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Upper bound on accounts driven concurrently
    pub max_concurrent_accounts: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig {
                api_id: 0,
                api_hash: String::new(),
                session_directory: "./sessions".to_string(),
            },
            taps: TapConfig {
                min_available_energy: 250,
                send_taps_wait: [30, 60],
                send_taps_cooldown: [15, 25],
                send_taps_count: [150, 250],
            },
            boosts: BoostConfig {
                max_level_boost: 5,
                apply_daily_energy: true,
            },
            upgrades: UpgradeConfig {
                auto_upgrade: false,
                max_level_upgrade: 15,
            },
            retry: RetryConfig {
                max_retries: 3,
                retry_delay_seconds: 5,
            },
            http: HttpConfig {
                request_timeout_seconds: 30,
                body_statuses: vec![422],
            },
            fleet: FleetConfig {
                max_concurrent_accounts: 10,
            },
        }
    }
}

impl Settings {
    /// Load configuration from file, creating the default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if Path::new(config_path).exists() {
            v_info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let settings: Settings = toml::from_str(&config_str)?;
            Ok(settings)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path);
            let settings = Settings::default();
            settings.save(config_path)?;
            v_info!("💡 Edit {} to add your Telegram credentials and tune the bot", config_path);
            Ok(settings)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.taps.min_available_energy < 0 {
            return Err("min_available_energy must not be negative".to_string());
        }
        for (name, range) in [
            ("send_taps_wait", self.taps.send_taps_wait),
            ("send_taps_cooldown", self.taps.send_taps_cooldown),
        ] {
            if range[0] > range[1] {
                return Err(format!("{} must be a [min, max] pair", name));
            }
        }
        if self.taps.send_taps_count[0] > self.taps.send_taps_count[1] {
            return Err("send_taps_count must be a [min, max] pair".to_string());
        }
        if self.taps.send_taps_count[0] < 0 {
            return Err("send_taps_count must not be negative".to_string());
        }

        if self.retry.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.http.request_timeout_seconds == 0 {
            return Err("request_timeout_seconds must be greater than 0".to_string());
        }
        if self.fleet.max_concurrent_accounts == 0 {
            return Err("max_concurrent_accounts must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Telegram credentials are only needed once sessions come into play
    pub fn validate_telegram(&self) -> Result<(), String> {
        if self.telegram.api_id == 0 || self.telegram.api_hash.is_empty() {
            return Err(format!(
                "api_id/api_hash are not set; edit {} first",
                crate::CONFIG_FILE
            ));
        }
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        v_info!("📋 Configuration Summary:");
        v_info!("   ⚡ Min energy before resting: {}", self.taps.min_available_energy);
        v_info!(
            "   👆 Taps per cycle: {}-{}",
            self.taps.send_taps_count[0],
            self.taps.send_taps_count[1]
        );
        v_info!(
            "   🛠  Auto upgrade: {} (level cap {})",
            self.upgrades.auto_upgrade,
            self.upgrades.max_level_upgrade
        );
        v_info!(
            "   🔁 Retries: {} every {}s",
            self.retry.max_retries,
            self.retry.retry_delay_seconds
        );
        v_info!("   🚀 Concurrent accounts: {}", self.fleet.max_concurrent_accounts);
    }
}
