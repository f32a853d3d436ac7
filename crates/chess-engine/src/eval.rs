//! Static evaluation.
//!
//! Search delegates leaf scoring to an [`Evaluator`], so other heuristics can
//! be swapped in without touching the search code.

use chess_core::{PieceKind, Team};

use crate::Board;

/// Scores a board from a fixed team's point of view.
pub trait Evaluator {
    /// Higher is better for `perspective`.
    fn evaluate(&self, board: &Board, perspective: Team) -> i32;
}

/// Material difference with fixed piece values and no positional terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// Fixed value of a piece kind.
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::King => 100,
            PieceKind::Queen => 20,
            PieceKind::Rook => 8,
            PieceKind::Bishop => 6,
            PieceKind::Knight => 6,
            PieceKind::Pawn => 1,
        }
    }

    /// Sum of piece values for one team.
    pub fn material(board: &Board, team: Team) -> i32 {
        board
            .pieces(team)
            .map(|piece| Self::piece_value(piece.kind()))
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, perspective: Team) -> i32 {
        Self::material(board, perspective) - Self::material(board, perspective.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        let board = Board::new();
        assert_eq!(MaterialEvaluator::material(&board, Team::White), 100 + 20 + 16 + 12 + 12 + 8);
        assert_eq!(MaterialEvaluator.evaluate(&board, Team::White), 0);
        assert_eq!(MaterialEvaluator.evaluate(&board, Team::Black), 0);
    }

    #[test]
    fn score_is_antisymmetric() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2Q w - - 0 1").unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&board, Team::White), 28);
        assert_eq!(MaterialEvaluator.evaluate(&board, Team::Black), -28);
    }
}
