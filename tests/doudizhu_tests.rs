//! Doudizhu integration tests: dealing, classification, comparison and
//! full robot rounds.

mod common;

use std::collections::HashSet;

use arcade_rules::core::{GameRng, InvalidAction, Seat};
use arcade_rules::games::doudizhu::{
    beats, choose_play, classify, full_deck, parse_cards, validate_play, Card, CombinationKind,
    Deal, Doudizhu, Round, RoundAction, RobotLevel, BOTTOM_SIZE, HAND_SIZE, SEAT_COUNT,
};
use arcade_rules::rules::{GameResult, RulesEngine};

fn cards(text: &str) -> Vec<Card> {
    parse_cards(text).unwrap()
}

fn kind(text: &str) -> Option<CombinationKind> {
    classify(&cards(text)).map(|c| c.kind)
}

#[test]
fn test_deal_uses_every_card_once() {
    let deal = Deal::shuffled(&mut GameRng::new(9));
    let mut seen = HashSet::new();
    for hand in deal.hands.values() {
        assert_eq!(hand.len(), HAND_SIZE);
        seen.extend(hand.cards().iter().copied());
    }
    seen.extend(deal.bottom);
    assert_eq!(seen.len(), HAND_SIZE * SEAT_COUNT + BOTTOM_SIZE);
    assert_eq!(seen, full_deck().into_iter().collect());
}

#[test]
fn test_deal_is_seeded() {
    assert_eq!(
        Deal::shuffled(&mut GameRng::new(1)),
        Deal::shuffled(&mut GameRng::new(1))
    );
    assert_ne!(
        Deal::shuffled(&mut GameRng::new(1)),
        Deal::shuffled(&mut GameRng::new(2))
    );
}

#[test]
fn test_classification_table() {
    let table = [
        ("7H", Some(CombinationKind::Single)),
        ("7H 7S", Some(CombinationKind::Pair)),
        ("BJ RJ", Some(CombinationKind::Rocket)),
        ("9S 9H 9C 9D", Some(CombinationKind::Bomb)),
        ("3S 4H 5C 6D 7S", Some(CombinationKind::Straight)),
        ("3S 3H 4S 4H 5S 5H", Some(CombinationKind::DoubleStraight)),
        ("3S 3H 3C 4S 4H 4C", Some(CombinationKind::Plane)),
        ("3S 3H 3C 9D", Some(CombinationKind::TripleWithSingle)),
        ("3S 3H 3C 9D 9S", Some(CombinationKind::TripleWithPair)),
        ("3S 3H 3C 3D 9D 10S", Some(CombinationKind::FourWithTwoSingles)),
        ("3S 3H 3C 3D 9D 9S 10S 10H", Some(CombinationKind::FourWithTwoPairs)),
        ("3S 3H 3C 4S 4H 4C 9D 10S", Some(CombinationKind::PlaneWithSingles)),
        (
            "3S 3H 3C 4S 4H 4C 9D 9S 10S 10H",
            Some(CombinationKind::PlaneWithPairs),
        ),
        ("JS QS KS AS 2S", None),
        ("3S 4H", None),
        ("", None),
    ];
    for (text, expected) in table {
        assert_eq!(kind(text), expected, "{text}");
    }
}

#[test]
fn test_beats_hierarchy() {
    let c = |text: &str| classify(&cards(text)).unwrap();
    let straight = c("3S 4H 5C 6D 7S");
    let higher_straight = c("4S 5H 6C 7D 8S");
    let longer_straight = c("3S 4H 5C 6D 7S 8S");
    let bomb = c("9S 9H 9C 9D");
    let higher_bomb = c("JS JH JC JD");
    let rocket = c("BJ RJ");

    assert!(beats(&straight, &higher_straight));
    assert!(!beats(&higher_straight, &straight));
    assert!(!beats(&straight, &longer_straight));
    assert!(beats(&higher_straight, &bomb));
    assert!(beats(&bomb, &higher_bomb));
    assert!(!beats(&higher_bomb, &bomb));
    assert!(beats(&higher_bomb, &rocket));
    assert!(!beats(&rocket, &bomb));
    assert!(!beats(&rocket, &rocket));
}

#[test]
fn test_validate_play_errors() {
    let lead = classify(&cards("KS")).unwrap();
    assert_eq!(
        validate_play(None, &[]).unwrap_err(),
        InvalidAction::EmptyPlay.into()
    );
    assert_eq!(
        validate_play(None, &cards("3S 4H")).unwrap_err(),
        InvalidAction::UnrecognizedCombination.into()
    );
    assert_eq!(
        validate_play(Some(&lead), &cards("QS")).unwrap_err(),
        InvalidAction::DoesNotBeat.into()
    );
    assert_eq!(
        validate_play(Some(&lead), &cards("AS")).unwrap().kind,
        CombinationKind::Single
    );
}

fn robot_round(seed: u64, levels: [RobotLevel; 3]) -> (Round, usize) {
    let mut rng = GameRng::new(seed);
    let mut round = Round::deal(&mut rng, Seat(0)).unwrap();
    let mut turns = 0;
    while round.result().is_none() {
        let seat = round.turn();
        let lead = round.lead().map(|l| l.combination);
        let action = match choose_play(round.hand(seat), lead.as_ref(), levels[seat.index()], &mut rng) {
            Some(play) => RoundAction::Play(play.cards),
            None => RoundAction::Pass,
        };
        round = round.apply(&action).unwrap();
        turns += 1;
        assert!(turns < 1_000, "round did not finish");
    }
    (round, turns)
}

#[test]
fn test_robot_rounds_finish() {
    common::init_logging();
    let mixes = [
        [RobotLevel::Easy; 3],
        [RobotLevel::Normal; 3],
        [RobotLevel::Hard; 3],
        [RobotLevel::Hard, RobotLevel::Easy, RobotLevel::Normal],
    ];
    for (seed, levels) in mixes.into_iter().enumerate() {
        let (round, _) = robot_round(seed as u64, levels);
        let winner = round.finished_by().unwrap();
        assert!(round.hand(winner).is_empty());

        let result = round.result().unwrap();
        if winner == round.landlord() {
            assert_eq!(result, GameResult::Winner(winner));
        } else {
            assert_eq!(result, GameResult::Winners(vec![Seat(1), Seat(2)]));
        }
    }
}

#[test]
fn test_robot_rounds_are_reproducible() {
    let levels = [RobotLevel::Easy; 3];
    let (a, turns_a) = robot_round(77, levels);
    let (b, turns_b) = robot_round(77, levels);
    assert_eq!(a, b);
    assert_eq!(turns_a, turns_b);
}

#[test]
fn test_engine_offers_only_legal_actions() {
    let engine = Doudizhu;
    let mut rng = GameRng::new(4);
    let mut state = Round::deal(&mut rng, Seat(2)).unwrap();
    for _ in 0..30 {
        if engine.outcome(&state).is_some() {
            break;
        }
        let actions = engine.legal_actions(&state);
        assert!(!actions.is_empty());
        for action in &actions {
            assert!(engine.is_legal(&state, action));
        }
        let action = rng.choose(&actions).cloned().unwrap();
        state = engine.apply_action(&state, &action).unwrap();
    }
}

#[test]
fn test_playing_foreign_cards_is_rejected() {
    let round = Round::deal(&mut GameRng::new(6), Seat(0)).unwrap();
    let foreign = round.hand(Seat(1)).cards()[0];
    let err = round.apply(&RoundAction::Play(vec![foreign])).unwrap_err();
    assert_eq!(err, InvalidAction::CardsNotInHand.into());
}
