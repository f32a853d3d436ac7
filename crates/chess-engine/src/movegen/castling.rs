//! Castling eligibility.

use crate::Board;
use chess_core::{PieceKind, Square, Team};

use super::is_square_attacked;

const KING_HOME_COL: u8 = 4;

/// Which wing a king castles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column of the rook that takes part.
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the king lands on.
    pub const fn king_dest_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Column the king crosses, which is also where the rook lands.
    pub const fn rook_dest_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Columns that must be empty between king and rook.
    const fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }

    /// The side a king move from its home column to `to_col` castles toward,
    /// if it is a two-column king move.
    pub const fn from_king_move(from_col: u8, to_col: u8) -> Option<CastleSide> {
        if from_col != KING_HOME_COL {
            return None;
        }
        match to_col {
            6 => Some(CastleSide::Kingside),
            2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// Returns true if the team still holds the right to castle toward `side`:
/// its king and that corner's rook are both home and have never moved.
///
/// Says nothing about whether castling is playable right now.
pub(crate) fn castling_right(board: &Board, team: Team, side: CastleSide) -> bool {
    let home = team.back_row();
    let unmoved = |col: u8, kind: PieceKind| {
        board
            .piece_at(Square::at(home, col))
            .is_some_and(|p| p.team == team && p.kind() == kind && !p.has_moved())
    };
    unmoved(KING_HOME_COL, PieceKind::King) && unmoved(side.rook_col(), PieceKind::Rook)
}

/// King destinations for castling moves the team may attempt now.
///
/// Requires the right, empty squares between king and rook, the king not in
/// check, and the crossed square not attacked. Safety of the landing square
/// is left to the legality filter.
pub fn castling_destinations(board: &Board, team: Team) -> Vec<Square> {
    let home = team.back_row();
    let enemy = team.opposite();
    let mut out = Vec::new();
    for side in CastleSide::ALL {
        if !castling_right(board, team, side) {
            continue;
        }
        let clear = side
            .between_cols()
            .iter()
            .all(|&col| board.piece_at(Square::at(home, col)).is_none());
        if !clear {
            continue;
        }
        let king = Square::at(home, KING_HOME_COL);
        let crossed = Square::at(home, side.rook_dest_col());
        if is_square_attacked(board, king, enemy) || is_square_attacked(board, crossed, enemy) {
            continue;
        }
        out.push(Square::at(home, side.king_dest_col()));
    }
    out
}
