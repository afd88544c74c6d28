//! Doudizhu (Fight the Landlord): three-seat shedding card game.
//!
//! - [`classify`] turns a set of cards into a [`Combination`]
//! - [`beats`] / [`validate_play`] compare plays
//! - [`candidate_plays`] and [`choose_play`] enumerate hints and drive robots
//! - [`Round`] is the play state machine, wrapped by the [`Doudizhu`]
//!   rules engine

mod card;
mod combination;
mod compare;
mod hand;
mod plays;
mod round;

pub use card::{full_deck, parse_cards, Card, Rank, Suit};
pub use combination::{classify, Combination, CombinationKind};
pub use compare::{beats, validate_play};
pub use hand::{Deal, Hand, BOTTOM_SIZE, HAND_SIZE, SEAT_COUNT};
pub use plays::{candidate_plays, choose_play, Play, RobotLevel};
pub use round::{Doudizhu, Lead, Round, RoundAction};
