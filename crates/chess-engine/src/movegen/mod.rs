//! Move generation.
//!
//! Geometric moves follow each kind's movement pattern on a mailbox grid:
//! sliders ray-cast outward, knights and kings try a fixed offset set, and
//! pawns combine pushes, captures and en passant. Legal moves are the
//! geometric moves that survive the king-safety filter in [`crate::legality`].

mod attacks;
mod castling;
pub mod perft;

use crate::legality;
use crate::piece::Piece;
use crate::Board;
use chess_core::{Move, PieceKind, Square, Team};

pub use attacks::{
    is_square_attacked, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
pub(crate) use castling::castling_right;
pub use castling::{castling_destinations, CastleSide};

/// Squares reachable by a piece's movement pattern, respecting blockers and
/// excluding own-occupied squares, before king-safety filtering.
pub fn geometric_moves(board: &Board, piece: &Piece) -> Vec<Square> {
    let mut moves = Vec::new();
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece, &mut moves),
        PieceKind::Knight => leaper_moves(board, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slider_moves(board, piece, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => slider_moves(board, piece, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => slider_moves(board, piece, &QUEEN_DIRECTIONS, &mut moves),
        PieceKind::King => {
            leaper_moves(board, piece, &KING_OFFSETS, &mut moves);
            moves.extend(castling_destinations(board, piece.team));
        }
    }
    moves
}

/// Legal destinations for the piece on `sq`; empty if the square is empty.
pub fn legal_moves(board: &Board, sq: Square) -> Vec<Square> {
    legality::legal_successors(board, sq)
        .into_iter()
        .map(|(to, _)| to)
        .collect()
}

/// Every legal move for a team, in roster order then per-piece move order.
pub fn all_legal_moves(board: &Board, team: Team) -> Vec<Move> {
    board
        .pieces(team)
        .flat_map(|piece| {
            let from = piece.position;
            legal_moves(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Every legal move of the side to move paired with the board it produces.
///
/// Pieces are visited in roster order and each piece's moves in generation
/// order; promotions resolve to a queen.
pub fn successors(board: &Board) -> Vec<(Move, Board)> {
    let mut out = Vec::new();
    for &id in board.roster(board.turn()).as_slice() {
        let Some(piece) = board.piece(id) else {
            continue;
        };
        let from = piece.position;
        out.extend(
            legality::legal_successors(board, from)
                .into_iter()
                .map(|(to, next)| (Move::new(from, to), next)),
        );
    }
    out
}

/// Returns true if the team has at least one legal move.
pub fn has_legal_move(board: &Board, team: Team) -> bool {
    board
        .pieces(team)
        .any(|piece| !legal_moves(board, piece.position).is_empty())
}

/// Walks each direction until the edge or the first occupied square,
/// including that square only when it holds an enemy.
fn slider_moves(board: &Board, piece: &Piece, directions: &[(i8, i8)], moves: &mut Vec<Square>) {
    for &(d_row, d_col) in directions {
        let mut current = piece.position;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => moves.push(next),
                Some(other) => {
                    if other.team != piece.team {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

fn leaper_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)], moves: &mut Vec<Square>) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = piece.position.offset(d_row, d_col) {
            if board.piece_at(to).map_or(true, |other| other.team != piece.team) {
                moves.push(to);
            }
        }
    }
}

fn pawn_moves(board: &Board, piece: &Piece, moves: &mut Vec<Square>) {
    let dir = piece.team.pawn_direction();
    let from = piece.position;

    // Pushes
    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.piece_at(sq).is_none()) {
        moves.push(one);
        let on_start_row = from.row() == piece.team.pawn_row();
        if on_start_row && !piece.has_moved() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| board.piece_at(sq).is_none()) {
                moves.push(two);
            }
        }
    }

    // Captures
    for d_col in [1, -1] {
        if let Some(to) = from.offset(dir, d_col) {
            if board.piece_at(to).is_some_and(|other| other.team != piece.team) {
                moves.push(to);
            }
        }
    }

    // En passant: an enemy pawn beside us advanced two rows on the last ply.
    for d_col in [1, -1] {
        let passed = from
            .offset(0, d_col)
            .and_then(|side| board.piece_at(side))
            .filter(|other| {
                other.team != piece.team
                    && other.kind() == PieceKind::Pawn
                    && other.just_advanced_two()
            });
        if passed.is_some() {
            if let Some(to) = from.offset(dir, d_col).filter(|&sq| board.piece_at(sq).is_none()) {
                moves.push(to);
            }
        }
    }
}
