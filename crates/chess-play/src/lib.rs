//! Terminal front end for the chess engine.
//!
//! A human, the engine, or both play a game through the engine's session
//! API; pawn promotions are chosen at a prompt.

pub mod config;
pub mod session;

pub use config::{ConfigError, EngineSide, PlayConfig};
pub use session::{Command, Session};
