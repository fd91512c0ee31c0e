// HTTP client for the game API

pub mod api;

pub use api::{GameApi, GameClient};
