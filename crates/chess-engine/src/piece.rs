//! Piece records.
//!
//! A [`Piece`] is a plain value: team, position, and a [`PieceState`] tagged
//! variant carrying only the flags its kind needs for rule correctness.

use chess_core::{PieceKind, Square, Team};

use crate::movegen;
use crate::Board;

/// Kind-specific state of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceState {
    Pawn {
        /// A pawn that has never moved may advance two rows.
        has_moved: bool,
        /// Set for exactly one ply after a two-row advance; enables en passant.
        just_advanced_two: bool,
    },
    Knight,
    Bishop,
    Rook {
        /// A rook that has never moved may take part in castling.
        has_moved: bool,
    },
    Queen,
    King {
        /// A king that has never moved may castle.
        has_moved: bool,
    },
}

impl PieceState {
    /// Returns the state of a piece of the given kind that has never moved.
    pub const fn unmoved(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => PieceState::Pawn {
                has_moved: false,
                just_advanced_two: false,
            },
            PieceKind::Knight => PieceState::Knight,
            PieceKind::Bishop => PieceState::Bishop,
            PieceKind::Rook => PieceState::Rook { has_moved: false },
            PieceKind::Queen => PieceState::Queen,
            PieceKind::King => PieceState::King { has_moved: false },
        }
    }

    /// Returns the state of a piece of the given kind that has already moved.
    pub const fn moved(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => PieceState::Pawn {
                has_moved: true,
                just_advanced_two: false,
            },
            PieceKind::Rook => PieceState::Rook { has_moved: true },
            PieceKind::King => PieceState::King { has_moved: true },
            other => PieceState::unmoved(other),
        }
    }

    /// Returns the kind this state belongs to.
    pub const fn kind(self) -> PieceKind {
        match self {
            PieceState::Pawn { .. } => PieceKind::Pawn,
            PieceState::Knight => PieceKind::Knight,
            PieceState::Bishop => PieceKind::Bishop,
            PieceState::Rook { .. } => PieceKind::Rook,
            PieceState::Queen => PieceKind::Queen,
            PieceState::King { .. } => PieceKind::King,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub team: Team,
    pub position: Square,
    pub state: PieceState,
}

impl Piece {
    /// Creates a piece that has never moved.
    pub const fn new(team: Team, kind: PieceKind, position: Square) -> Self {
        Piece {
            team,
            position,
            state: PieceState::unmoved(kind),
        }
    }

    /// Returns the kind of this piece.
    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.state.kind()
    }

    /// Returns true if this is a pawn, rook or king that has moved.
    ///
    /// Kinds without a movement flag always report `false`.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        match self.state {
            PieceState::Pawn { has_moved, .. }
            | PieceState::Rook { has_moved }
            | PieceState::King { has_moved } => has_moved,
            _ => false,
        }
    }

    /// Returns true if this is a pawn that advanced two rows on the last ply.
    #[inline]
    pub const fn just_advanced_two(&self) -> bool {
        matches!(
            self.state,
            PieceState::Pawn {
                just_advanced_two: true,
                ..
            }
        )
    }

    /// Squares reachable by this piece's movement pattern, before king-safety
    /// filtering. Castling destinations are included for an eligible king.
    pub fn geometric_moves(&self, board: &Board) -> Vec<Square> {
        movegen::geometric_moves(board, self)
    }

    /// Squares this piece may legally move to.
    pub fn legal_moves(&self, board: &Board) -> Vec<Square> {
        movegen::legal_moves(board, self.position)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind().to_fen_char(self.team))
    }
}
