//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the engine and its front ends:
//! - [`Team`] and [`PieceKind`] for piece identity
//! - [`Square`] for `(row, col)` board coordinates
//! - [`Move`] and [`PromotionChoice`] for move description
//! - FEN parsing and serialization

mod fen;
mod mov;
mod piece;
mod square;
mod team;

pub use fen::{CastlingFlags, Fen, FenError, Placement};
pub use mov::Move;
pub use piece::{PieceKind, PromotionChoice};
pub use square::Square;
pub use team::Team;
