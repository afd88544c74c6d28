//! Hands and the initial deal.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::card::{full_deck, Card};
use crate::core::{GameRng, InvalidAction, MalformedState, RuleResult, Seat, SeatMap};

/// Cards dealt to each seat before the bottom is handed out.
pub const HAND_SIZE: usize = 17;
/// Cards set aside for the landlord.
pub const BOTTOM_SIZE: usize = 3;
/// Seats at a Doudizhu table.
pub const SEAT_COUNT: usize = 3;

/// A player's cards, kept sorted. Every card appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Build a hand, rejecting duplicate cards.
    pub fn new(mut cards: Vec<Card>) -> RuleResult<Self> {
        cards.sort_unstable();
        if let Some(pair) = cards.windows(2).find(|w| w[0] == w[1]) {
            return Err(MalformedState::DuplicateCard(pair[0].to_string()).into());
        }
        Ok(Self { cards })
    }

    /// Cards in ascending order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True if every card in `cards` is held, each at most once.
    #[must_use]
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut wanted = cards.to_vec();
        wanted.sort_unstable();
        wanted.windows(2).all(|w| w[0] != w[1])
            && wanted.iter().all(|c| self.cards.binary_search(c).is_ok())
    }

    /// The hand without `cards`. Fails if any card is not held.
    pub fn without(&self, cards: &[Card]) -> RuleResult<Hand> {
        if !self.contains_all(cards) {
            return Err(InvalidAction::CardsNotInHand.into());
        }
        let cards = self
            .cards
            .iter()
            .filter(|c| !cards.contains(c))
            .copied()
            .collect();
        Ok(Hand { cards })
    }

    /// The hand with `extra` added.
    pub fn with(&self, extra: &[Card]) -> RuleResult<Hand> {
        let mut cards = self.cards.clone();
        cards.extend_from_slice(extra);
        Hand::new(cards)
    }
}

/// A shuffled deck split into three hands and the bottom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub hands: SeatMap<Hand>,
    pub bottom: [Card; BOTTOM_SIZE],
}

impl Deal {
    /// Shuffle a fresh deck with `rng` and deal 17/17/17 plus 3.
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = full_deck();
        rng.shuffle(&mut deck);
        trace!(seed = rng.seed(), "dealt doudizhu deck");

        let hands = deck
            .chunks(HAND_SIZE)
            .take(SEAT_COUNT)
            .map(|chunk| {
                let mut cards = chunk.to_vec();
                cards.sort_unstable();
                Hand { cards }
            })
            .collect();
        let dealt = HAND_SIZE * SEAT_COUNT;
        let bottom = [deck[dealt], deck[dealt + 1], deck[dealt + 2]];
        let hands = SeatMap::from_vec(hands);
        Self { hands, bottom }
    }

    /// Hand the bottom cards to `landlord`, returning the final hands.
    pub fn into_hands(self, landlord: Seat) -> RuleResult<SeatMap<Hand>> {
        check_table(&self.hands, landlord)?;
        let mut hands = self.hands;
        hands[landlord] = hands[landlord].with(&self.bottom)?;
        Ok(hands)
    }
}

/// Reject tables that are not three seats, landlords outside them, and
/// cards held by more than one seat.
pub(crate) fn check_table(hands: &SeatMap<Hand>, landlord: Seat) -> RuleResult<()> {
    if hands.seat_count() != SEAT_COUNT {
        return Err(MalformedState::SeatCount {
            expected: SEAT_COUNT,
            found: hands.seat_count(),
        }
        .into());
    }
    if hands.get(landlord).is_none() {
        return Err(MalformedState::SeatOutOfRange(landlord.to_string()).into());
    }
    let mut all: Vec<Card> = hands.values().flat_map(|h| h.cards().iter().copied()).collect();
    all.sort_unstable();
    if let Some(pair) = all.windows(2).find(|w| w[0] == w[1]) {
        return Err(MalformedState::DuplicateCard(pair[0].to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::doudizhu::card::parse_cards;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_hand_rejects_duplicates() {
        let err = Hand::new(parse_cards("3S 4S 3S").unwrap()).unwrap_err();
        assert!(!err.is_invalid_action());
    }

    #[test]
    fn test_hand_is_sorted() {
        let hand = Hand::new(parse_cards("2S 3H RJ 3S").unwrap()).unwrap();
        assert_eq!(hand.cards(), parse_cards("3S 3H 2S RJ").unwrap().as_slice());
    }

    #[test]
    fn test_without_removes_exactly() {
        let hand = Hand::new(parse_cards("3S 3H 4S 5S").unwrap()).unwrap();
        let rest = hand.without(&parse_cards("3H 5S").unwrap()).unwrap();
        assert_eq!(rest.cards(), parse_cards("3S 4S").unwrap().as_slice());

        let err = hand.without(&parse_cards("6S").unwrap()).unwrap_err();
        assert_eq!(err, InvalidAction::CardsNotInHand.into());
        // the same card twice is not "in hand" twice
        assert!(!hand.contains_all(&parse_cards("3S 3S").unwrap()));
    }

    #[test]
    fn test_deal_partitions_deck() {
        let mut rng = GameRng::new(7);
        let deal = Deal::shuffled(&mut rng);

        let mut seen = FxHashSet::default();
        for hand in deal.hands.values() {
            assert_eq!(hand.len(), HAND_SIZE);
            seen.extend(hand.cards().iter().copied());
        }
        seen.extend(deal.bottom);
        assert_eq!(seen.len(), 54);
    }

    #[test]
    fn test_deal_is_reproducible() {
        let a = Deal::shuffled(&mut GameRng::new(99));
        let b = Deal::shuffled(&mut GameRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_landlord_takes_bottom() {
        let deal = Deal::shuffled(&mut GameRng::new(1));
        let bottom = deal.bottom;
        let hands = deal.into_hands(Seat(2)).unwrap();
        assert_eq!(hands[Seat(2)].len(), 20);
        assert_eq!(hands[Seat(0)].len(), 17);
        assert!(hands[Seat(2)].contains_all(&bottom));
    }

    #[test]
    fn test_landlord_must_be_seated() {
        let deal = Deal::shuffled(&mut GameRng::new(1));
        assert_eq!(
            deal.into_hands(Seat(3)).unwrap_err(),
            MalformedState::SeatOutOfRange(Seat(3).to_string()).into()
        );
    }
}
