//! Core support types shared by every engine: RNG, seats, search budgets,
//! search outcomes, and the error taxonomy.
//!
//! Nothing here knows about a particular game.

pub mod seat;
pub mod rng;
pub mod config;
pub mod outcome;
pub mod error;

pub use seat::{Seat, SeatMap};
pub use rng::{GameRng, GameRngState};
pub use config::{BudgetMeter, SearchBudget};
pub use outcome::SearchOutcome;
pub use error::{InvalidAction, MalformedState, ParseError, RuleError, RuleResult};
