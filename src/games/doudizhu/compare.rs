//! Deciding whether one play beats another.

use super::card::Card;
use super::combination::{classify, Combination, CombinationKind};
use crate::core::{InvalidAction, RuleResult};

/// True if `next` may be played over `previous`.
///
/// - Rocket beats everything and nothing beats it.
/// - A Bomb beats any non-bomb; a higher Bomb beats a lower one.
/// - Otherwise kind and length must match and the rank must be higher.
#[must_use]
pub fn beats(previous: &Combination, next: &Combination) -> bool {
    use CombinationKind::{Bomb, Rocket};

    match (previous.kind, next.kind) {
        (Rocket, _) => false,
        (_, Rocket) => true,
        (Bomb, Bomb) => next.rank > previous.rank,
        (_, Bomb) => true,
        (Bomb, _) => false,
        (prev, cur) => prev == cur && previous.length == next.length && next.rank > previous.rank,
    }
}

/// Check a play of `cards` against the current lead, if any.
///
/// Returns the play's classification when it is acceptable.
pub fn validate_play(previous: Option<&Combination>, cards: &[Card]) -> RuleResult<Combination> {
    if cards.is_empty() {
        return Err(InvalidAction::EmptyPlay.into());
    }
    let combination = classify(cards).ok_or(InvalidAction::UnrecognizedCombination)?;
    match previous {
        Some(lead) if !beats(lead, &combination) => Err(InvalidAction::DoesNotBeat.into()),
        _ => Ok(combination),
    }
}
