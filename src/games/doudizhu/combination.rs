//! Classifying a set of cards into a playable combination.
//!
//! ## Precedence
//!
//! A card set that fits more than one shape takes the first match:
//! Rocket, uniform groups (Single, Pair, Triple, Bomb), Straight,
//! DoubleStraight, Plane, TripleWithSingle, TripleWithPair,
//! FourWithTwoSingles, FourWithTwoPairs, PlaneWithSingles, PlaneWithPairs.
//!
//! ## Rank and length
//!
//! `rank` is the [`Rank::value`] of the defining group; for runs it is the
//! highest rank in the run. `length` is the number of groups in the run
//! (5 for a five-card straight, 2 for a two-triple plane) and 1 otherwise.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};

const RANK_SLOTS: usize = 15;

/// Shape of a play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinationKind {
    Single,
    Pair,
    Triple,
    TripleWithSingle,
    TripleWithPair,
    Bomb,
    Rocket,
    Straight,
    DoubleStraight,
    Plane,
    PlaneWithSingles,
    PlaneWithPairs,
    FourWithTwoSingles,
    FourWithTwoPairs,
}

impl CombinationKind {
    /// True for Bomb and Rocket, the kinds that may interrupt any lead.
    #[must_use]
    pub const fn is_bomb_like(self) -> bool {
        matches!(self, CombinationKind::Bomb | CombinationKind::Rocket)
    }
}

/// A classified play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub kind: CombinationKind,
    pub rank: u8,
    pub length: u8,
}

impl Combination {
    #[must_use]
    pub const fn new(kind: CombinationKind, rank: u8, length: u8) -> Self {
        Self { kind, rank, length }
    }

    const fn single_group(kind: CombinationKind, rank: u8) -> Self {
        Self::new(kind, rank, 1)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = Rank::from_value(self.rank).map_or_else(|| "?".to_string(), |r| r.to_string());
        if self.length > 1 {
            write!(f, "{:?}x{} to {}", self.kind, self.length, rank)
        } else {
            write!(f, "{:?} of {}", self.kind, rank)
        }
    }
}

/// Card counts per rank value.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RankCounts([u8; RANK_SLOTS]);

impl RankCounts {
    pub(crate) fn of(cards: &[Card]) -> Self {
        let mut counts = [0u8; RANK_SLOTS];
        for card in cards {
            counts[card.rank.value() as usize] += 1;
        }
        Self(counts)
    }

    pub(crate) fn get(&self, value: u8) -> u8 {
        self.0[value as usize]
    }

    /// (rank value, count) for every rank present, ascending.
    fn present(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(v, &n)| (v as u8, n))
    }

    /// If every present rank has exactly `size` cards and they form one
    /// unbroken run no higher than Ace, return `(highest, run_length)`.
    fn uniform_run(&self, size: u8) -> Option<(u8, u8)> {
        let ranks: Vec<(u8, u8)> = self.present().collect();
        let (low, _) = *ranks.first()?;
        let (high, _) = *ranks.last()?;
        let contiguous = (high - low) as usize + 1 == ranks.len();
        (contiguous && high <= Rank::MAX_RUN_VALUE && ranks.iter().all(|&(_, n)| n == size))
            .then_some((high, ranks.len() as u8))
    }

    /// Highest run of `length` consecutive ranks (no higher than Ace) that
    /// each hold at least `min` cards; returns the top rank value.
    fn best_run(&self, length: u8, min: u8) -> Option<u8> {
        if length == 0 || length > Rank::MAX_RUN_VALUE + 1 {
            return None;
        }
        (length - 1..=Rank::MAX_RUN_VALUE)
            .rev()
            .find(|&top| (top + 1 - length..=top).all(|v| self.get(v) >= min))
    }
}

/// Classify `cards` into a combination, or `None` if they form no legal
/// shape.
///
/// ```
/// use arcade_rules::games::doudizhu::{classify, parse_cards, CombinationKind};
///
/// let triple = classify(&parse_cards("3S 3H 3C").unwrap()).unwrap();
/// assert_eq!(triple.kind, CombinationKind::Triple);
/// assert_eq!(triple.rank, 0);
/// ```
#[must_use]
pub fn classify(cards: &[Card]) -> Option<Combination> {
    use CombinationKind::*;

    let n = cards.len();
    if n == 0 {
        return None;
    }
    let counts = RankCounts::of(cards);

    if n == 2 && counts.get(Rank::BlackJoker.value()) == 1 && counts.get(Rank::RedJoker.value()) == 1 {
        return Some(Combination::single_group(Rocket, Rank::RedJoker.value()));
    }

    let groups: Vec<(u8, u8)> = counts.present().collect();

    if let [(rank, count)] = groups[..] {
        let kind = match count {
            1 => Single,
            2 => Pair,
            3 => Triple,
            4 => Bomb,
            _ => return None,
        };
        return Some(Combination::single_group(kind, rank));
    }

    if (5..=12).contains(&n) {
        if let Some((high, len)) = counts.uniform_run(1) {
            return Some(Combination::new(Straight, high, len));
        }
    }
    if n >= 6 && n % 2 == 0 {
        if let Some((high, len)) = counts.uniform_run(2) {
            return Some(Combination::new(DoubleStraight, high, len));
        }
    }
    if n >= 6 && n % 3 == 0 {
        if let Some((high, len)) = counts.uniform_run(3) {
            return Some(Combination::new(Plane, high, len));
        }
    }

    let mut sizes: Vec<u8> = groups.iter().map(|&(_, c)| c).collect();
    sizes.sort_unstable();
    let rank_with = |count: u8| groups.iter().find(|&&(_, c)| c == count).map(|&(r, _)| r);

    match (n, sizes.as_slice()) {
        (4, [1, 3]) => return rank_with(3).map(|r| Combination::single_group(TripleWithSingle, r)),
        (5, [2, 3]) => return rank_with(3).map(|r| Combination::single_group(TripleWithPair, r)),
        (6, _) if rank_with(4).is_some() => {
            return rank_with(4).map(|r| Combination::single_group(FourWithTwoSingles, r));
        }
        (8, [2, 2, 4]) => return rank_with(4).map(|r| Combination::single_group(FourWithTwoPairs, r)),
        _ => {}
    }

    if n >= 8 && n % 4 == 0 {
        let k = (n / 4) as u8;
        if let Some(top) = counts.best_run(k, 3) {
            return Some(Combination::new(PlaneWithSingles, top, k));
        }
    }

    if n >= 10 && n % 5 == 0 {
        let k = (n / 5) as u8;
        if let Some(top) = counts.best_run(k, 3) {
            let run = top + 1 - k..=top;
            let triples_exact = run.clone().all(|v| counts.get(v) == 3);
            let kickers: Vec<u8> = groups
                .iter()
                .filter(|(r, _)| !run.contains(r))
                .map(|&(_, c)| c)
                .collect();
            if triples_exact && kickers.len() == k as usize && kickers.iter().all(|&c| c == 2) {
                return Some(Combination::new(PlaneWithPairs, top, k));
            }
        }
    }

    None
}
