//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! [`Fen`] is the typed, syntactically validated form of a FEN record. It
//! makes no claim that the position is reachable or even has kings; the
//! engine checks that when it builds a board from it.

use crate::{PieceKind, Square, Team};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active team: expected 'w' or 'b', got '{0}'")]
    InvalidActiveTeam(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Castling availability as written in the FEN castling field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingFlags {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingFlags {
    pub const ALL: CastlingFlags = CastlingFlags {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Returns the kingside flag for a team.
    #[inline]
    pub const fn kingside(self, team: Team) -> bool {
        match team {
            Team::White => self.white_kingside,
            Team::Black => self.black_kingside,
        }
    }

    /// Returns the queenside flag for a team.
    #[inline]
    pub const fn queenside(self, team: Team) -> bool {
        match team {
            Team::White => self.white_queenside,
            Team::Black => self.black_queenside,
        }
    }

    /// Returns true if no side may castle.
    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside)
    }

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut flags = CastlingFlags::default();
        if field == "-" {
            return Ok(flags);
        }
        for c in field.chars() {
            let slot = match c {
                'K' => &mut flags.white_kingside,
                'Q' => &mut flags.white_queenside,
                'k' => &mut flags.black_kingside,
                'q' => &mut flags.black_queenside,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if *slot {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate character '{}'",
                    c
                )));
            }
            *slot = true;
        }
        Ok(flags)
    }
}

impl fmt::Display for CastlingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (set, c) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Piece placement indexed as `[row][col]`.
pub type Placement = [[Option<(PieceKind, Team)>; 8]; 8];

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Pieces by `[row][col]`, row 0 being rank 8.
    pub placement: Placement,
    /// The team to move.
    pub side_to_move: Team,
    /// Castling availability.
    pub castling: CastlingFlags,
    /// Square passed over by a pawn that just advanced two rows.
    pub en_passant: Option<Square>,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1.
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string. The clock fields may be omitted, in which case
    /// they default to `0 1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = Self::parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Team::White,
            "b" => Team::Black,
            other => return Err(FenError::InvalidActiveTeam(other.to_string())),
        };

        let castling = CastlingFlags::parse(fields[2])?;
        let en_passant = Self::parse_en_passant(fields[3])?;

        let (halfmove_clock, fullmove_number) = if fields.len() == 6 {
            let halfmove = fields[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;
            let fullmove = fields[5]
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(field: &str) -> Result<Placement, FenError> {
        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut placement: Placement = [[None; 8]; 8];
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += skip as usize;
                } else if let Some(piece) = PieceKind::from_fen_char(c) {
                    if col < 8 {
                        placement[row][col] = Some(piece);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }
        Ok(placement)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(field) {
            // Only rank 3 (row 5) or rank 6 (row 2) can be passed over.
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, pieces) in self.placement.iter().enumerate() {
            let mut empty = 0;
            for square in pieces {
                match square {
                    Some((kind, team)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", kind.to_fen_char(*team))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if row < 7 {
                write!(f, "/")?;
            }
        }

        let side = match self.side_to_move {
            Team::White => 'w',
            Team::Black => 'b',
        };
        write!(f, " {} {} ", side, self.castling)?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Team::White);
        assert_eq!(fen.castling, CastlingFlags::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.placement[0][4], Some((PieceKind::King, Team::Black)));
        assert_eq!(fen.placement[7][4], Some((PieceKind::King, Team::White)));
        assert_eq!(fen.placement[6][0], Some((PieceKind::Pawn, Team::White)));
        assert_eq!(fen.placement[4][4], None);
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = Fen::parse(original).unwrap();
        assert_eq!(parsed.en_passant, Some(Square::at(5, 4)));
        assert_eq!(parsed.to_string(), original);
    }

    #[test]
    fn clocks_are_optional() {
        let fen = Fen::parse("8/8/8/8/8/8/8/K6k w - -").unwrap();
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.to_string(), "8/8/8/8/8/8/8/K6k w - - 0 1");
    }

    #[test]
    fn invalid_field_count() {
        assert!(matches!(
            Fen::parse("invalid"),
            Err(FenError::InvalidFieldCount(1))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0"),
            Err(FenError::InvalidFieldCount(5))
        ));
    }

    #[test]
    fn invalid_active_team() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveTeam(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("0/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w KK - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn partial_castling() {
        let fen = Fen::parse("8/8/8/8/8/8/8/8 w Kq - 0 1").unwrap();
        assert!(fen.castling.kingside(Team::White));
        assert!(!fen.castling.queenside(Team::White));
        assert!(!fen.castling.kingside(Team::Black));
        assert!(fen.castling.queenside(Team::Black));
        assert_eq!(fen.castling.to_string(), "Kq");
    }

    #[test]
    fn invalid_en_passant() {
        for field in ["abc", "x3", "e4"] {
            let text = format!("8/8/8/8/8/8/8/8 w - {} 0 1", field);
            assert!(matches!(
                Fen::parse(&text),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn invalid_clocks() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 0"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn fen_default_is_startpos() {
        assert_eq!(Fen::default().to_string(), Fen::STARTPOS);
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidFieldCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidActiveTeam("x".to_string());
        assert!(format!("{}", err).contains("x"));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
