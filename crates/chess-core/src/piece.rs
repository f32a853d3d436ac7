//! Piece kinds and promotion choices.

use crate::Team;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the FEN character for this kind on the given team.
    pub const fn to_fen_char(self, team: Team) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match team {
            Team::White => c.to_ascii_uppercase(),
            Team::Black => c,
        }
    }

    /// Parses a FEN character into a kind and team.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Team)> {
        let team = if c.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, team))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The piece a pawn may become on reaching its final row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PromotionChoice {
    #[default]
    Queen,
    Bishop,
    Rook,
    Knight,
}

impl PromotionChoice {
    /// All choices, in the order offered to a player.
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Bishop,
        PromotionChoice::Rook,
        PromotionChoice::Knight,
    ];

    /// Returns the piece kind the pawn is replaced with.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionChoice::Queen => PieceKind::Queen,
            PromotionChoice::Bishop => PieceKind::Bishop,
            PromotionChoice::Rook => PieceKind::Rook,
            PromotionChoice::Knight => PieceKind::Knight,
        }
    }

    /// Parses a promotion letter (`q`, `b`, `r`, `n`, either case).
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionChoice::Queen),
            'b' => Some(PromotionChoice::Bishop),
            'r' => Some(PromotionChoice::Rook),
            'n' => Some(PromotionChoice::Knight),
            _ => None,
        }
    }

    /// Returns the lowercase promotion letter.
    pub const fn to_char(self) -> char {
        match self {
            PromotionChoice::Queen => 'q',
            PromotionChoice::Bishop => 'b',
            PromotionChoice::Rook => 'r',
            PromotionChoice::Knight => 'n',
        }
    }
}
