//! Cards and the 54-card deck.
//!
//! ## Notation
//!
//! Cards print as rank then suit symbol (`10♥`, `A♠`); jokers print as `BJ`
//! and `RJ`. Parsing also accepts ASCII suit letters (`10H`, `AS`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{MalformedState, RuleError, RuleResult};

/// Card ranks in ascending strength. `Two` outranks `Ace`; jokers top all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
    BlackJoker,
    RedJoker,
}

impl Rank {
    /// The thirteen suited ranks.
    pub const SUITED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Highest rank value a run (straight, double straight, plane) may reach.
    pub const MAX_RUN_VALUE: u8 = Rank::Ace as u8;

    /// Ordinal strength: `Three` is 0, `Two` is 12, `RedJoker` is 14.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Inverse of [`value`](Self::value).
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            13 => Some(Rank::BlackJoker),
            14 => Some(Rank::RedJoker),
            v => Rank::SUITED.get(v as usize).copied(),
        }
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::BlackJoker | Rank::RedJoker)
    }

    const fn label(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::BlackJoker => "BJ",
            Rank::RedJoker => "RJ",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '♠' | 'S' | 's' => Some(Suit::Spades),
            '♥' | 'H' | 'h' => Some(Suit::Hearts),
            '♣' | 'C' | 'c' => Some(Suit::Clubs),
            '♦' | 'D' | 'd' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// A single card. Jokers carry no suit.
///
/// Ordering is by rank, then suit, which is also the order hands are kept in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    /// A suited card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub const BLACK_JOKER: Card = Card {
        rank: Rank::BlackJoker,
        suit: None,
    };

    pub const RED_JOKER: Card = Card {
        rank: Rank::RedJoker,
        suit: None,
    };
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank.label(), suit.symbol()),
            None => f.write_str(self.rank.label()),
        }
    }
}

impl FromStr for Card {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || RuleError::from(MalformedState::UnknownCard(s.to_string()));
        match s {
            "BJ" => return Ok(Card::BLACK_JOKER),
            "RJ" => return Ok(Card::RED_JOKER),
            _ => {}
        }

        let suit_char = s.chars().last().ok_or_else(unknown)?;
        let suit = Suit::from_char(suit_char).ok_or_else(unknown)?;
        let label = &s[..s.len() - suit_char.len_utf8()];
        let rank = Rank::SUITED
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label))
            .ok_or_else(unknown)?;
        Ok(Card::new(rank, suit))
    }
}

/// Parse whitespace-separated cards, e.g. `"3S 3H 3C"`.
pub fn parse_cards(text: &str) -> RuleResult<Vec<Card>> {
    text.split_whitespace().map(str::parse).collect()
}

/// The 54-card deck in a fixed order: suits outer, ranks inner, then jokers.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut deck: Vec<Card> = Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::SUITED.into_iter().map(move |rank| Card::new(rank, suit)))
        .collect();
    deck.push(Card::BLACK_JOKER);
    deck.push(Card::RED_JOKER);
    deck
}
