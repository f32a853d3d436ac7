//! Chess rules engine with a minimax opponent.
//!
//! This crate provides:
//! - [`Board`] - value-type board state: grid, piece arena, rosters, counters
//! - [`Piece`] - piece records whose per-kind flags drive castling and en passant
//! - Legal move generation with king-safety filtering
//! - [`Game`] - a session with repetition history and draw detection
//! - [`Searcher`] - fixed-depth alpha-beta search over an [`Evaluator`]
//!
//! # Architecture
//!
//! Boards are never mutated from the caller's point of view: applying a move
//! clones the board and returns the clone. The king-safety filter leans on
//! this by playing every candidate on a copy and discarding it if the mover's
//! king ends up attacked. Search walks the same successor boards.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{legal_moves, new_game, search_best_move, Game};
//!
//! let board = new_game();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! assert_eq!(legal_moves(&board, e2).len(), 2);
//!
//! let mut game = Game::new();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let outcome = game.apply_move(e2, e4).unwrap();
//! assert!(!outcome.game_over());
//!
//! let reply = search_best_move(game.board(), 2);
//! assert!(reply.is_some());
//! ```

mod apply;
mod board;
pub mod eval;
mod game;
mod history;
mod legality;
pub mod movegen;
mod piece;
pub mod rules;
pub mod search;
mod zobrist;

pub use board::{Board, BoardError, PieceId, Roster, SnapshotSquare};
pub use eval::{Evaluator, MaterialEvaluator};
pub use game::{apply_move, FixedPromotion, Game, GameError, MoveOutcome, PromotionStrategy};
pub use history::RepetitionHistory;
pub use legality::is_legal;
pub use piece::{Piece, PieceState};
pub use rules::{DrawReason, GameResult, Status};
pub use search::{search, search_best_move, search_with, SearchResult, Searcher};

use chess_core::Square;

/// Creates a board in the standard starting position.
pub fn new_game() -> Board {
    Board::new()
}

/// Legal destinations for the piece on `sq`; empty if the square is empty.
pub fn legal_moves(board: &Board, sq: Square) -> Vec<Square> {
    board.legal_moves(sq)
}
