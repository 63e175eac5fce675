use itertools::Itertools;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    Red,
    Black,
}

impl CardColor {
    pub fn class(self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Black => "black",
        }
    }
}

/// Parsing never fails; an unknown suit letter yields an empty glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFace {
    pub rank: String,
    pub suit: String,
    pub color: CardColor,
}

impl CardFace {
    pub fn parse(code: &str) -> Self {
        let mut chars = code.chars();
        let letter = chars.next_back();
        let rank = chars.as_str().to_string();
        let suit = letter.and_then(Suit::from_letter);

        Self {
            rank,
            suit: suit.map(Suit::symbol).unwrap_or_default().to_string(),
            color: match suit {
                Some(suit) if suit.is_red() => CardColor::Red,
                _ => CardColor::Black,
            },
        }
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.rank, self.suit)
    }

    pub fn render(&self, color: bool) -> String {
        let label = self.label();
        if !color {
            return label;
        }
        match self.color {
            CardColor::Red => label.bold().red().to_string(),
            CardColor::Black => label.bold().to_string(),
        }
    }
}

pub fn render_strip<S: AsRef<str>>(codes: &[S], color: bool) -> String {
    if codes.is_empty() {
        return "--".to_string();
    }
    codes
        .iter()
        .map(|code| CardFace::parse(code.as_ref()).render(color))
        .join(" ")
}
