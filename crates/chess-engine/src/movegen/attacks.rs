//! Direction tables and reverse attack lookup.

use crate::Board;
use chess_core::{PieceKind, Square, Team};

/// Orthogonal ray directions as `(d_row, d_col)`.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions as `(d_row, d_col)`.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Diagonals first, then orthogonals.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (1, -2),
    (-2, 1),
    (-1, 2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

/// Returns true if any piece of team `by` attacks `sq`.
///
/// Looks outward from the target: a knight on a knight offset, a king on a
/// king offset, a pawn on one of its capture squares, or a slider as the first
/// piece along a matching ray. Castling and pushes never attack.
pub fn is_square_attacked(board: &Board, sq: Square, by: Team) -> bool {
    let holds = |target: Option<Square>, kind: PieceKind| {
        target
            .and_then(|t| board.piece_at(t))
            .is_some_and(|p| p.team == by && p.kind() == kind)
    };

    // A pawn of `by` attacks forward diagonally, so it sits one row behind.
    let pawn_row = -by.pawn_direction();
    if holds(sq.offset(pawn_row, 1), PieceKind::Pawn)
        || holds(sq.offset(pawn_row, -1), PieceKind::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(r, c)| holds(sq.offset(r, c), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(r, c)| holds(sq.offset(r, c), PieceKind::King))
    {
        return true;
    }

    let first_hit = |d_row: i8, d_col: i8| {
        let mut current = sq;
        while let Some(next) = current.offset(d_row, d_col) {
            if let Some(piece) = board.piece_at(next) {
                return Some(*piece);
            }
            current = next;
        }
        None
    };

    let diagonal = BISHOP_DIRECTIONS.iter().any(|&(r, c)| {
        first_hit(r, c).is_some_and(|p| {
            p.team == by && matches!(p.kind(), PieceKind::Bishop | PieceKind::Queen)
        })
    });
    if diagonal {
        return true;
    }

    ROOK_DIRECTIONS.iter().any(|&(r, c)| {
        first_hit(r, c)
            .is_some_and(|p| p.team == by && matches!(p.kind(), PieceKind::Rook | PieceKind::Queen))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attacked(fen: &str, sq: &str, by: Team) -> bool {
        let board = Board::from_fen(fen).unwrap();
        is_square_attacked(&board, Square::from_algebraic(sq).unwrap(), by)
    }

    #[test]
    fn pawn_attacks_diagonally_forward_only() {
        let fen = "4k3/8/8/8/8/8/4P3/7K w - - 0 1";
        assert!(attacked(fen, "d3", Team::White));
        assert!(attacked(fen, "f3", Team::White));
        assert!(!attacked(fen, "e3", Team::White));
        assert!(!attacked(fen, "d1", Team::White));

        let fen = "4k3/4p3/8/8/8/8/8/4K3 w - - 0 1";
        assert!(attacked(fen, "d6", Team::Black));
        assert!(!attacked(fen, "d8", Team::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let fen = "4k3/8/8/8/R2p3K/8/8/8 w - - 0 1";
        assert!(attacked(fen, "c4", Team::White));
        assert!(attacked(fen, "d4", Team::White));
        assert!(!attacked(fen, "e4", Team::White));
        assert!(attacked(fen, "a8", Team::White));
    }

    #[test]
    fn bishop_does_not_attack_orthogonally() {
        let fen = "4k3/8/8/8/3B4/8/8/4K3 w - - 0 1";
        assert!(attacked(fen, "g7", Team::White));
        assert!(!attacked(fen, "d7", Team::White));
    }

    #[test]
    fn knight_and_king_attacks() {
        let fen = "4k3/8/8/8/3N4/8/8/K7 w - - 0 1";
        assert!(attacked(fen, "e6", Team::White));
        assert!(attacked(fen, "b3", Team::White));
        assert!(!attacked(fen, "d5", Team::White));
        assert!(attacked(fen, "b2", Team::White));
        assert!(attacked(fen, "d7", Team::Black));
    }

    #[test]
    fn startpos_third_rank_is_covered() {
        let board = Board::new();
        for col in 0..8 {
            assert!(is_square_attacked(&board, Square::at(5, col), Team::White));
            assert!(is_square_attacked(&board, Square::at(2, col), Team::Black));
            assert!(!is_square_attacked(&board, Square::at(4, col), Team::White));
        }
    }
}
