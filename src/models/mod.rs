// Data models for the game API

pub mod profile;
pub mod upgrade;
pub mod boost;
pub mod task;
pub mod responses;

pub use profile::*;
pub use upgrade::*;
pub use boost::*;
pub use task::*;
pub use responses::*;
