// Hamster Kombat Autonomous Tapper Library
// Modular architecture for unattended multi-account play

pub mod models;
pub mod client;
pub mod operations;
pub mod config;
pub mod sessions;
pub mod telegram;
pub mod runner;
pub mod verbosity;

// Re-export commonly used types
pub use models::{
    profile::ClickerUser,
    upgrade::Upgrade,
    boost::Boost,
    task::Task,
    responses::*,
};

pub use client::{GameApi, GameClient};
pub use config::Settings;
pub use runner::AccountRunner;
pub use sessions::SessionManager;

// Constants
pub const API_BASE_URL: &str = "https://api.hamsterkombat.io";
pub const GAME_URL: &str = "https://hamsterkombat.io/";
pub const BOT_USERNAME: &str = "hamster_kombat_bot";
pub const START_PARAM: &str = "kentId770247847";
pub const ENERGY_BOOST_ID: &str = "BoostFullAvailableTaps";
pub const STREAK_TASK_ID: &str = "streak_days";
pub const CONFIG_FILE: &str = "config.toml";
