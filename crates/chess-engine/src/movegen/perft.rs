//! Perft (performance test) for move generator validation.
//!
//! Perft counts leaf nodes of the legal-move tree at a given depth, for
//! comparison against well-known node counts. A move onto the final row
//! counts once per promotion choice.

use chess_core::{Move, PieceKind, PromotionChoice};

use crate::Board;

/// Counts leaf nodes at `depth`.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for (mv, next) in board.successors() {
        if is_promotion(board, mv) {
            if depth == 1 {
                nodes += PromotionChoice::ALL.len() as u64;
                continue;
            }
            for choice in PromotionChoice::ALL {
                let promoted = if choice == PromotionChoice::Queen {
                    next.clone()
                } else {
                    board.make_move(mv.from, mv.to, choice)
                };
                nodes += perft(&promoted, depth - 1);
            }
        } else if depth == 1 {
            nodes += 1;
        } else {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}

/// Per-root-move node counts at `depth`, sorted by coordinate notation.
/// Promotions appear once per choice with the promotion letter appended.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();
    for (mv, next) in board.successors() {
        if is_promotion(board, mv) {
            for choice in PromotionChoice::ALL {
                let promoted = board.make_move(mv.from, mv.to, choice);
                let nodes = perft(&promoted, depth.saturating_sub(1));
                results.push((format!("{}{}", mv, choice.to_char()), nodes));
            }
        } else {
            results.push((mv.to_coordinate(), perft(&next, depth.saturating_sub(1))));
        }
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn is_promotion(board: &Board, mv: Move) -> bool {
    board.piece_at(mv.from).is_some_and(|piece| {
        piece.kind() == PieceKind::Pawn && mv.to.row() == piece.team.promotion_row()
    })
}
