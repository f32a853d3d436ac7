//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The side to move at the root is the maximizing player; every score is
//! from its point of view. Children are visited in successor order (roster
//! order, then per-piece generation order) and only a strictly better score
//! replaces the current best, so the earliest of equally good moves wins and
//! repeated searches of one board return the same move.

use chess_core::{Move, Team};
use tracing::{debug, trace};

use crate::eval::{Evaluator, MaterialEvaluator};
use crate::Board;

/// Score of a checkmate found at the root; deeper mates score less.
pub const MATE_SCORE: i32 = 100_000;

/// Search depth used when none is given.
pub const DEFAULT_DEPTH: u32 = 4;

const INFINITY: i32 = i32::MAX;

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,
    /// Score from the root side's point of view.
    pub score: i32,
    /// Boards visited, root included.
    pub nodes: u64,
}

/// Alpha-beta searcher over an [`Evaluator`].
#[derive(Debug, Clone)]
pub struct Searcher<E = MaterialEvaluator> {
    evaluator: E,
    perspective: Team,
    nodes: u64,
}

impl Default for Searcher<MaterialEvaluator> {
    fn default() -> Self {
        Self::new(MaterialEvaluator)
    }
}

impl<E: Evaluator> Searcher<E> {
    pub fn new(evaluator: E) -> Self {
        Searcher {
            evaluator,
            perspective: Team::White,
            nodes: 0,
        }
    }

    /// Searches `depth` plies (at least one) and returns the best move for
    /// the side to move.
    pub fn search(&mut self, board: &Board, depth: u32) -> SearchResult {
        let depth = depth.max(1);
        self.perspective = board.turn();
        self.nodes = 0;

        let (best_move, score) = self.max_value(board, depth, 0, -INFINITY, INFINITY);

        debug!(
            depth,
            nodes = self.nodes,
            score,
            best_move = ?best_move,
            side = %self.perspective,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    fn max_value(
        &mut self,
        board: &Board,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
    ) -> (Option<Move>, i32) {
        self.nodes += 1;
        if depth == 0 {
            return (None, self.evaluator.evaluate(board, self.perspective));
        }
        let children = board.successors();
        if children.is_empty() {
            return (None, self.terminal_score(board, ply));
        }

        let mut best = -INFINITY;
        let mut best_move = None;
        for (mv, child) in &children {
            let (_, score) = self.min_value(child, depth - 1, ply + 1, alpha, beta);
            if ply == 0 {
                trace!(%mv, score, "root move scored");
            }
            if score > best {
                best = score;
                best_move = Some(*mv);
            }
            if best >= beta {
                return (best_move, best);
            }
            alpha = alpha.max(best);
        }
        (best_move, best)
    }

    fn min_value(
        &mut self,
        board: &Board,
        depth: u32,
        ply: u32,
        alpha: i32,
        mut beta: i32,
    ) -> (Option<Move>, i32) {
        self.nodes += 1;
        if depth == 0 {
            return (None, self.evaluator.evaluate(board, self.perspective));
        }
        let children = board.successors();
        if children.is_empty() {
            return (None, self.terminal_score(board, ply));
        }

        let mut best = INFINITY;
        let mut best_move = None;
        for (mv, child) in &children {
            let (_, score) = self.max_value(child, depth - 1, ply + 1, alpha, beta);
            if score < best {
                best = score;
                best_move = Some(*mv);
            }
            if best <= alpha {
                return (best_move, best);
            }
            beta = beta.min(best);
        }
        (best_move, best)
    }

    /// Score of a board whose side to move has no legal move.
    fn terminal_score(&self, board: &Board, ply: u32) -> i32 {
        let mover = board.turn();
        if board.is_in_check(mover) {
            let mate = MATE_SCORE - ply as i32;
            if mover == self.perspective {
                -mate
            } else {
                mate
            }
        } else {
            self.evaluator.evaluate(board, self.perspective)
        }
    }
}

/// Searches with material evaluation.
pub fn search(board: &Board, depth: u32) -> SearchResult {
    Searcher::default().search(board, depth)
}

/// Searches with a caller-supplied evaluator.
pub fn search_with<E: Evaluator>(board: &Board, depth: u32, evaluator: E) -> SearchResult {
    Searcher::new(evaluator).search(board, depth)
}

/// Best move for the side to move, or `None` if it has no legal move.
pub fn search_best_move(board: &Board, depth: u32) -> Option<Move> {
    search(board, depth).best_move
}
