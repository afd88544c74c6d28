//! Candidate plays (hints) and robot players.
//!
//! ## Enumeration
//!
//! Every shape is built from the hand's rank groups. Kickers are the
//! lowest cards outside the defining group, one per rank for singles. Each
//! candidate is re-classified, deduplicated, filtered against the lead and
//! sorted cheapest first: non-bombs before bombs, then by rank, then by
//! card count.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};
use super::combination::{classify, Combination};
use super::compare::beats;
use super::hand::Hand;
use crate::core::GameRng;

/// A classified set of cards taken from a hand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    pub combination: Combination,
    pub cards: Vec<Card>,
}

/// Robot strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotLevel {
    /// Any legal play, uniformly at random.
    #[default]
    Easy,
    /// The cheapest legal play.
    Normal,
    /// Sheds as many cards as possible when leading; otherwise the
    /// cheapest non-bomb, and bombs only as a last resort.
    Hard,
}

/// Cards of a hand grouped by rank value.
struct Groups(Vec<Vec<Card>>);

impl Groups {
    fn of(hand: &Hand) -> Self {
        let mut groups = vec![Vec::new(); Rank::RedJoker.value() as usize + 1];
        for &card in hand.cards() {
            groups[card.rank.value() as usize].push(card);
        }
        Self(groups)
    }

    fn take(&self, value: u8, count: usize) -> Option<&[Card]> {
        self.0.get(value as usize).and_then(|g| g.get(..count))
    }

    fn count(&self, value: u8) -> usize {
        self.0.get(value as usize).map_or(0, Vec::len)
    }

    fn values(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.0.len() as u8).filter(move |&v| self.count(v) > 0)
    }

    /// Cards for `count` of each rank in `low..=high`, if all are present.
    fn run(&self, low: u8, high: u8, count: usize) -> Option<Vec<Card>> {
        let mut cards = Vec::new();
        for v in low..=high {
            cards.extend_from_slice(self.take(v, count)?);
        }
        Some(cards)
    }

    /// Lowest `needed` kickers of `size` cards each from ranks not in
    /// `exclude`, one group per rank.
    fn kickers(&self, exclude: &[u8], size: usize, needed: usize) -> Option<Vec<Card>> {
        let picked: Vec<Card> = self
            .values()
            .filter(|v| !exclude.contains(v) && self.count(*v) >= size)
            .take(needed)
            .filter_map(|v| self.take(v, size))
            .flatten()
            .copied()
            .collect();
        (picked.len() == size * needed).then_some(picked)
    }
}

/// Every distinct play from `hand` that is legal against `lead`.
///
/// With no lead every classifiable shape the hand can form is returned.
#[must_use]
pub fn candidate_plays(hand: &Hand, lead: Option<&Combination>) -> Vec<Play> {
    let groups = Groups::of(hand);
    let mut raw: Vec<Vec<Card>> = Vec::new();
    let values: Vec<u8> = groups.values().collect();

    for &v in &values {
        for size in 1..=groups.count(v) {
            if let Some(cards) = groups.take(v, size) {
                raw.push(cards.to_vec());
            }
        }

        if groups.count(v) >= 3 {
            let Some(triple) = groups.take(v, 3) else { continue };
            for (size, needed) in [(1, 1), (2, 1)] {
                if let Some(kick) = groups.kickers(&[v], size, needed) {
                    raw.push([triple, &kick[..]].concat());
                }
            }
        }
        if groups.count(v) == 4 {
            let Some(four) = groups.take(v, 4) else { continue };
            for (size, needed) in [(1, 2), (2, 2)] {
                if let Some(kick) = groups.kickers(&[v], size, needed) {
                    raw.push([four, &kick[..]].concat());
                }
            }
        }
    }

    let jokers = [Rank::BlackJoker.value(), Rank::RedJoker.value()];
    if jokers.iter().all(|&j| groups.count(j) > 0) {
        raw.push(vec![Card::BLACK_JOKER, Card::RED_JOKER]);
    }

    // runs: (cards per rank, minimum length)
    for (per_rank, min_len) in [(1usize, 5u8), (2, 3), (3, 2)] {
        for low in 0..=Rank::MAX_RUN_VALUE {
            for high in low + min_len - 1..=Rank::MAX_RUN_VALUE {
                let Some(run) = groups.run(low, high, per_rank) else { break };
                raw.push(run.clone());

                if per_rank == 3 {
                    let len = (high - low + 1) as usize;
                    let span: Vec<u8> = (low..=high).collect();
                    for size in [1, 2] {
                        if let Some(kick) = groups.kickers(&span, size, len) {
                            raw.push([&run[..], &kick[..]].concat());
                        }
                    }
                }
            }
        }
    }

    let mut seen = FxHashSet::default();
    let mut plays: Vec<Play> = raw
        .into_iter()
        .filter_map(|mut cards| {
            cards.sort_unstable();
            let combination = classify(&cards)?;
            seen.insert(cards.clone()).then_some(Play { combination, cards })
        })
        .filter(|play| lead.map_or(true, |l| beats(l, &play.combination)))
        .collect();

    plays.sort_by(|a, b| {
        let key = |p: &Play| (p.combination.kind.is_bomb_like(), p.combination.rank, p.cards.len());
        key(a).cmp(&key(b)).then_with(|| a.cards.cmp(&b.cards))
    });
    plays
}

/// Pick a robot's play, or `None` to pass.
///
/// A robot holding cards always plays when leading.
pub fn choose_play(
    hand: &Hand,
    lead: Option<&Combination>,
    level: RobotLevel,
    rng: &mut GameRng,
) -> Option<Play> {
    let candidates = candidate_plays(hand, lead);
    match level {
        RobotLevel::Easy => rng.choose(&candidates).cloned(),
        RobotLevel::Normal => candidates.into_iter().next(),
        RobotLevel::Hard => match lead {
            None => candidates
                .into_iter()
                .filter(|p| !p.combination.kind.is_bomb_like() || p.cards.len() == hand.len())
                .max_by_key(|p| (p.cards.len(), std::cmp::Reverse(p.combination.rank))),
            Some(_) => candidates.into_iter().next(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::doudizhu::card::parse_cards;
    use crate::games::doudizhu::combination::CombinationKind;

    fn hand(text: &str) -> Hand {
        Hand::new(parse_cards(text).unwrap()).unwrap()
    }

    #[test]
    fn test_leading_candidates_cover_basic_shapes() {
        let plays = candidate_plays(&hand("3S 3H 3C 4S 5S 6S 7S BJ RJ"), None);
        let kinds: FxHashSet<CombinationKind> = plays.iter().map(|p| p.combination.kind).collect();
        for kind in [
            CombinationKind::Single,
            CombinationKind::Pair,
            CombinationKind::Triple,
            CombinationKind::TripleWithSingle,
            CombinationKind::Straight,
            CombinationKind::Rocket,
        ] {
            assert!(kinds.contains(&kind), "missing {kind:?}");
        }
        // every candidate classifies to what it claims
        for play in &plays {
            assert_eq!(classify(&play.cards), Some(play.combination));
        }
    }

    #[test]
    fn test_candidates_beat_the_lead() {
        let lead = classify(&parse_cards("9S").unwrap()).unwrap();
        let plays = candidate_plays(&hand("3S 10H KS 2D"), Some(&lead));
        let ranks: Vec<u8> = plays.iter().map(|p| p.combination.rank).collect();
        assert_eq!(ranks, vec![7, 10, 12]);
    }

    #[test]
    fn test_bombs_sorted_last() {
        let lead = classify(&parse_cards("9S").unwrap()).unwrap();
        let plays = candidate_plays(&hand("3S 3H 3C 3D 10H"), Some(&lead));
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[0].combination.kind, CombinationKind::Single);
        assert_eq!(plays[1].combination.kind, CombinationKind::Bomb);
    }

    #[test]
    fn test_no_candidates_means_pass() {
        let lead = classify(&parse_cards("BJ RJ").unwrap()).unwrap();
        let mut rng = GameRng::new(3);
        let h = hand("3S 3H 3C 3D");
        assert!(candidate_plays(&h, Some(&lead)).is_empty());
        for level in [RobotLevel::Easy, RobotLevel::Normal, RobotLevel::Hard] {
            assert!(choose_play(&h, Some(&lead), level, &mut rng).is_none());
        }
    }

    #[test]
    fn test_robot_levels() {
        let h = hand("3S 4H 5C 6D 7S 9S");
        let mut rng = GameRng::new(11);

        let normal = choose_play(&h, None, RobotLevel::Normal, &mut rng).unwrap();
        assert_eq!(normal.cards, parse_cards("3S").unwrap());

        let hard = choose_play(&h, None, RobotLevel::Hard, &mut rng).unwrap();
        assert_eq!(hard.combination.kind, CombinationKind::Straight);
        assert_eq!(hard.cards.len(), 5);

        let easy = choose_play(&h, None, RobotLevel::Easy, &mut rng).unwrap();
        assert!(h.contains_all(&easy.cards));
    }

    #[test]
    fn test_hard_follows_cheaply() {
        let lead = classify(&parse_cards("5S").unwrap()).unwrap();
        let h = hand("7S 9S 9H 9C 9D KS");
        let mut rng = GameRng::new(0);
        let play = choose_play(&h, Some(&lead), RobotLevel::Hard, &mut rng).unwrap();
        assert_eq!(play.cards, parse_cards("7S").unwrap());
    }
}
