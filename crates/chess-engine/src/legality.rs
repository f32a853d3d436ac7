//! King-safety filtering of geometric moves.
//!
//! Every candidate is played on a disposable copy of the board; the candidate
//! survives only if the mover's king is not attacked on that copy. For a king
//! move this is the same as asking whether the destination square is attacked
//! once the king stands on it.

use chess_core::{PieceKind, PromotionChoice, Square};

use crate::movegen;
use crate::Board;

/// Legal destinations for the piece on `from`, each paired with the board the
/// move produces (promotions resolve to a queen).
///
/// Works for either team's pieces, not only the side to move. The input board
/// is never modified.
pub(crate) fn legal_successors(board: &Board, from: Square) -> Vec<(Square, Board)> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };

    movegen::geometric_moves(board, &piece)
        .into_iter()
        .filter(|&to| {
            // Kings are never captured in legal play.
            board
                .piece_at(to)
                .map_or(true, |target| target.kind() != PieceKind::King)
        })
        .filter_map(|to| {
            let next = board.apply_unchecked(from, to, PromotionChoice::Queen);
            (!next.is_in_check(piece.team)).then_some((to, next))
        })
        .collect()
}

/// Returns true if moving the piece on `from` to `to` is legal.
pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    movegen::legal_moves(board, from).contains(&to)
}
