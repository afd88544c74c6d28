//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions produce the next state
//! - End-of-game conditions

pub mod engine;

pub use engine::{GameResult, RulesEngine};
