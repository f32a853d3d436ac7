//! Move representation.

use crate::{PromotionChoice, Square};
use std::fmt;

/// A move as a `(from, to)` square pair.
///
/// Special moves are not flagged: castling is a two-column king move, en
/// passant is a diagonal pawn move onto an empty square, and promotion is any
/// pawn move onto its final row. The board infers each from its own state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinate(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses coordinate notation, with an optional trailing promotion
    /// letter (e.g., "e2e4", "e7e8n").
    pub fn from_coordinate(s: &str) -> Option<(Self, Option<PromotionChoice>)> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            Some(c) => Some(PromotionChoice::from_char(c)?),
            None => None,
        };
        Some((Move::new(from, to), promotion))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
