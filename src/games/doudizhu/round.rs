//! The three-seat play round.
//!
//! ## Flow
//!
//! The landlord leads. Each turn the seat to act either beats the current
//! lead or passes; the leader of a fresh trick may not pass. Two passes in
//! a row clear the lead and the last player to play leads again. The round
//! ends as soon as a hand is empty: the landlord wins alone, the two
//! peasants win together.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::Card;
use super::combination::Combination;
use super::compare::validate_play;
use super::hand::{check_table, Deal, Hand, SEAT_COUNT};
use super::plays::candidate_plays;
use crate::core::{GameRng, InvalidAction, RuleResult, Seat, SeatMap};
use crate::rules::{GameResult, RulesEngine};

/// The play currently to be beaten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub seat: Seat,
    pub combination: Combination,
    pub cards: Vec<Card>,
}

/// A seat's turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundAction {
    Play(Vec<Card>),
    Pass,
}

/// State of a round in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    hands: SeatMap<Hand>,
    landlord: Seat,
    turn: Seat,
    lead: Option<Lead>,
    passes: u8,
}

impl Round {
    /// Start a round from a deal; `landlord` takes the bottom and leads.
    pub fn new(deal: Deal, landlord: Seat) -> RuleResult<Self> {
        let hands = deal.into_hands(landlord)?;
        Self::from_hands(hands, landlord)
    }

    /// Shuffle, deal and start a round in one step.
    pub fn deal(rng: &mut GameRng, landlord: Seat) -> RuleResult<Self> {
        Self::new(Deal::shuffled(rng), landlord)
    }

    /// Start from hands that were set up by other means.
    ///
    /// The table must have three seats, `landlord` must be one of them and
    /// no card may be held twice.
    pub fn from_hands(hands: SeatMap<Hand>, landlord: Seat) -> RuleResult<Self> {
        check_table(&hands, landlord)?;
        Ok(Self {
            hands,
            landlord,
            turn: landlord,
            lead: None,
            passes: 0,
        })
    }

    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    #[must_use]
    pub fn landlord(&self) -> Seat {
        self.landlord
    }

    /// Seat to act.
    #[must_use]
    pub fn turn(&self) -> Seat {
        self.turn
    }

    #[must_use]
    pub fn lead(&self) -> Option<&Lead> {
        self.lead.as_ref()
    }

    /// Seat whose hand is empty, if the round is over.
    #[must_use]
    pub fn finished_by(&self) -> Option<Seat> {
        self.hands
            .iter()
            .find(|(_, hand)| hand.is_empty())
            .map(|(seat, _)| seat)
    }

    /// Apply the current seat's action, returning the next state.
    pub fn apply(&self, action: &RoundAction) -> RuleResult<Round> {
        if self.finished_by().is_some() {
            return Err(InvalidAction::GameOver.into());
        }
        let mut next = self.clone();

        match action {
            RoundAction::Pass => {
                if self.lead.is_none() {
                    return Err(InvalidAction::CannotPass.into());
                }
                next.passes += 1;
                if next.passes as usize >= SEAT_COUNT - 1 {
                    next.lead = None;
                    next.passes = 0;
                }
            }
            RoundAction::Play(cards) => {
                let hand = &self.hands[self.turn];
                if !hand.contains_all(cards) {
                    return Err(InvalidAction::CardsNotInHand.into());
                }
                let lead = self.lead.as_ref().map(|l| &l.combination);
                let combination = validate_play(lead, cards)?;
                next.hands[self.turn] = hand.without(cards)?;
                next.lead = Some(Lead {
                    seat: self.turn,
                    combination,
                    cards: cards.clone(),
                });
                next.passes = 0;
                if next.hands[self.turn].is_empty() {
                    debug!(seat = %self.turn, landlord = %self.landlord, "doudizhu round over");
                }
            }
        }

        next.turn = self.turn.next(SEAT_COUNT);
        Ok(next)
    }

    /// Result once a hand is empty.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let seat = self.finished_by()?;
        if seat == self.landlord {
            Some(GameResult::Winner(seat))
        } else {
            Some(GameResult::Winners(
                Seat::all(SEAT_COUNT).filter(|&s| s != self.landlord).collect(),
            ))
        }
    }
}

/// Doudizhu play rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Doudizhu;

impl RulesEngine for Doudizhu {
    type State = Round;
    type Action = RoundAction;
    type Outcome = GameResult;

    fn legal_actions(&self, state: &Round) -> Vec<RoundAction> {
        if state.finished_by().is_some() {
            return Vec::new();
        }
        let lead = state.lead().map(|l| &l.combination);
        let mut actions: Vec<RoundAction> = candidate_plays(state.hand(state.turn()), lead)
            .into_iter()
            .map(|play| RoundAction::Play(play.cards))
            .collect();
        if lead.is_some() {
            actions.push(RoundAction::Pass);
        }
        actions
    }

    fn apply_action(&self, state: &Round, action: &RoundAction) -> RuleResult<Round> {
        state.apply(action)
    }

    fn outcome(&self, state: &Round) -> Option<GameResult> {
        state.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MalformedState;
    use crate::games::doudizhu::card::parse_cards;

    fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    fn round(hands: [&str; 3], landlord: Seat) -> Round {
        let hands = hands
            .iter()
            .map(|h| Hand::new(cards(h)).unwrap())
            .collect();
        Round::from_hands(SeatMap::from_vec(hands), landlord).unwrap()
    }

    fn play(text: &str) -> RoundAction {
        RoundAction::Play(cards(text))
    }

    #[test]
    fn test_deal_gives_landlord_twenty_cards() {
        let round = Round::deal(&mut GameRng::new(5), Seat(1)).unwrap();
        assert_eq!(round.hand(Seat(1)).len(), 20);
        assert_eq!(round.turn(), Seat(1));
        assert!(round.lead().is_none());
    }

    #[test]
    fn test_leader_cannot_pass() {
        let r = round(["3S 4S", "5S 6S", "7S 8S"], Seat(0));
        assert_eq!(r.apply(&RoundAction::Pass).unwrap_err(), InvalidAction::CannotPass.into());
    }

    #[test]
    fn test_play_must_hold_cards_and_beat_lead() {
        let r = round(["3S 4S", "5S 6S", "7S 8S"], Seat(0));
        assert_eq!(
            r.apply(&play("9S")).unwrap_err(),
            InvalidAction::CardsNotInHand.into()
        );
        let r = r.apply(&play("4S")).unwrap();
        assert_eq!(r.turn(), Seat(1));
        assert_eq!(r.hand(Seat(0)).len(), 1);

        let err = round(["3S 4S", "3H 6S", "7S 8S"], Seat(0))
            .apply(&play("4S"))
            .unwrap()
            .apply(&play("3H"))
            .unwrap_err();
        assert_eq!(err, InvalidAction::DoesNotBeat.into());
    }

    #[test]
    fn test_two_passes_return_the_lead() {
        let r = round(["3S 4S", "5S 6S", "7S 8S"], Seat(0));
        let r = r.apply(&play("4S")).unwrap();
        let r = r.apply(&RoundAction::Pass).unwrap();
        assert!(r.lead().is_some());
        let r = r.apply(&RoundAction::Pass).unwrap();
        assert!(r.lead().is_none());
        assert_eq!(r.turn(), Seat(0));
        // the leader may now play anything
        assert!(r.apply(&play("3S")).is_ok());
    }

    #[test]
    fn test_landlord_wins_alone() {
        let r = round(["3S", "5S 6S", "7S 8S"], Seat(0));
        let r = r.apply(&play("3S")).unwrap();
        assert_eq!(r.result(), Some(GameResult::Winner(Seat(0))));
        assert_eq!(r.apply(&RoundAction::Pass).unwrap_err(), InvalidAction::GameOver.into());
    }

    #[test]
    fn test_peasants_win_together() {
        let r = round(["3S 4S", "5S", "7S 8S"], Seat(0));
        let r = r.apply(&play("3S")).unwrap();
        let r = r.apply(&play("5S")).unwrap();
        let result = r.result().unwrap();
        assert_eq!(result, GameResult::Winners(vec![Seat(1), Seat(2)]));
        assert!(result.is_winner(Seat(2)));
        assert!(!result.is_winner(Seat(0)));
    }

    #[test]
    fn test_engine_actions() {
        let engine = Doudizhu;
        let r = round(["3S 4S", "5S 6S", "7S 8S"], Seat(0));
        let actions = engine.legal_actions(&r);
        assert_eq!(actions.len(), 2);
        assert!(!actions.contains(&RoundAction::Pass));

        let r = engine.apply_action(&r, &play("4S")).unwrap();
        let actions = engine.legal_actions(&r);
        assert!(actions.contains(&RoundAction::Pass));
        assert_eq!(actions.len(), 3);
    }

    #[test]
    fn test_from_hands_rejects_bad_tables() {
        let hands = |texts: &[&str]| {
            SeatMap::from_vec(texts.iter().map(|h| Hand::new(cards(h)).unwrap()).collect())
        };

        assert_eq!(
            Round::from_hands(hands(&["3S", "4S"]), Seat(0)).unwrap_err(),
            MalformedState::SeatCount { expected: 3, found: 2 }.into()
        );
        assert_eq!(
            Round::from_hands(hands(&["3S", "4S", "5S"]), Seat(3)).unwrap_err(),
            MalformedState::SeatOutOfRange(Seat(3).to_string()).into()
        );
        assert_eq!(
            Round::from_hands(hands(&["3S 4S", "3S 5S", "3S 6S"]), Seat(0)).unwrap_err(),
            MalformedState::DuplicateCard(cards("3S")[0].to_string()).into()
        );
    }

    #[test]
    fn test_new_rejects_landlord_off_table() {
        let deal = Deal::shuffled(&mut GameRng::new(2));
        let err = Round::new(deal, Seat(3)).unwrap_err();
        assert!(!err.is_invalid_action());
    }
}
