// Operations module - per-cycle game logic

pub mod policy;
pub mod tapper;

pub use policy::*;
pub use tapper::*;
