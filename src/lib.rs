//! # arcade-rules
//!
//! Pure, deterministic rule engines for a collection of classic mini-games.
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation takes a state and returns a new
//!    state or a typed error. Nothing is mutated behind the caller's back,
//!    and a rejected request leaves the input untouched.
//!
//! 2. **Seeded Randomness**: Shuffles, deals and puzzle generation draw from
//!    an explicit [`GameRng`]. The same seed always gives the same game.
//!
//! 3. **Bounded Search**: Exponential searches take a [`SearchBudget`] and
//!    report [`SearchOutcome::BudgetExceeded`] instead of running forever.
//!
//! ## Games
//!
//! - `games::chess`: move generation, two-phase promotion, check, mate and
//!   draw detection with an undo history
//! - `games::doudizhu`: card combinations, play comparison, three-seat
//!   rounds and robot players
//! - `games::linkup`: two-bend tile links, hints, solver and level
//!   generation
//! - `games::points24`: expression parsing, answer checking, solver and
//!   puzzle generation
//!
//! ## Modules
//!
//! - `core`: RNG, seats, search budgets, search outcomes, errors
//! - `rules`: `RulesEngine` trait shared by the turn-based games
//! - `games`: the individual rule sets

pub mod core;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BudgetMeter, GameRng, GameRngState, InvalidAction, MalformedState, ParseError, RuleError,
    RuleResult, SearchBudget, SearchOutcome, Seat, SeatMap,
};

pub use crate::rules::{GameResult, RulesEngine};
