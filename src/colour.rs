//! The colour palette and the `Item` token that occupies one container slot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

/// One value from the fixed colour palette.
///
/// The declaration order is also the `Ord` order, which structural state keys rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Colour {
    Red,
    Pink,
    Brown,
    Green,
    LightGreen,
    DarkGreen,
    Yellow,
    Blue,
    LightBlue,
    DarkBlue,
    Grey,
    Purple,
    Orange,
}

impl Colour {
    /// Every colour in palette order.
    pub const ALL: [Colour; 13] = [
        Colour::Red,
        Colour::Pink,
        Colour::Brown,
        Colour::Green,
        Colour::LightGreen,
        Colour::DarkGreen,
        Colour::Yellow,
        Colour::Blue,
        Colour::LightBlue,
        Colour::DarkBlue,
        Colour::Grey,
        Colour::Purple,
        Colour::Orange,
    ];

    /// Returns the upper-case name used in puzzle documents.
    ///
    /// # Examples
    ///
    /// ```
    /// use water_sort_solver::colour::Colour;
    /// assert_eq!(Colour::LightGreen.name(), "LIGHT_GREEN");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Colour::Red => "RED",
            Colour::Pink => "PINK",
            Colour::Brown => "BROWN",
            Colour::Green => "GREEN",
            Colour::LightGreen => "LIGHT_GREEN",
            Colour::DarkGreen => "DARK_GREEN",
            Colour::Yellow => "YELLOW",
            Colour::Blue => "BLUE",
            Colour::LightBlue => "LIGHT_BLUE",
            Colour::DarkBlue => "DARK_BLUE",
            Colour::Grey => "GREY",
            Colour::Purple => "PURPLE",
            Colour::Orange => "ORANGE",
        }
    }

    /// Converts the colour to the single letter used by the compact puzzle notation.
    pub fn to_char(&self) -> char {
        match self {
            Colour::Red => 'R',
            Colour::Pink => 'P',
            Colour::Brown => 'N',
            Colour::Green => 'G',
            Colour::LightGreen => 'L',
            Colour::DarkGreen => 'D',
            Colour::Yellow => 'Y',
            Colour::Blue => 'B',
            Colour::LightBlue => 'C',
            Colour::DarkBlue => 'K',
            Colour::Grey => 'E',
            Colour::Purple => 'U',
            Colour::Orange => 'O',
        }
    }

    /// Inverse of [`Colour::to_char`]. Lower-case letters are accepted.
    pub fn from_char(ch: char) -> Option<Colour> {
        let up = ch.to_ascii_uppercase();
        Colour::ALL.iter().copied().find(|c| c.to_char() == up)
    }

    /// Returns the ANSI escape sequence selecting this colour as the foreground.
    fn to_ansi_fg(&self) -> &'static str {
        match self {
            Colour::Red => "\x1b[31m",
            Colour::Pink => "\x1b[38;2;255;153;204m",
            Colour::Brown => "\x1b[38;2;110;79;43m",
            Colour::Green => "\x1b[38;2;102;153;0m",
            Colour::LightGreen => "\x1b[38;2;153;255;153m",
            Colour::DarkGreen => "\x1b[32m",
            Colour::Yellow => "\x1b[33m",
            Colour::Blue => "\x1b[34m",
            Colour::LightBlue => "\x1b[38;2;102;255;255m",
            Colour::DarkBlue => "\x1b[38;5;18m",
            Colour::Grey => "\x1b[38;5;245m",
            Colour::Purple => "\x1b[38;5;93m",
            Colour::Orange => "\x1b[38;2;255;150;50m",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colour {
    type Err = PuzzleError;

    /// Parses a palette name, ignoring case and treating `-` and spaces as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|ch| match ch {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        Colour::ALL
            .iter()
            .copied()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| PuzzleError::UnknownColour(s.to_string()))
    }
}

/// A single coloured unit occupying one slot of a container.
///
/// Equality, ordering and hashing are by colour only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    colour: Colour,
}

impl Item {
    pub fn new(colour: Colour) -> Self {
        Item { colour }
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }
}

impl From<Colour> for Item {
    fn from(colour: Colour) -> Self {
        Item::new(colour)
    }
}

impl PartialEq<Colour> for Item {
    fn eq(&self, other: &Colour) -> bool {
        self.colour == *other
    }
}

impl fmt::Display for Item {
    /// Renders the item as a square glyph in its own colour.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{25A0}\x1b[39m", self.colour.to_ansi_fg())
    }
}
