//! Board state: grid, piece arena, rosters, turn and move counters.

use chess_core::{CastlingFlags, Fen, FenError, Move, PieceKind, Placement, Square, Team};
use std::fmt;
use thiserror::Error;

use crate::movegen::{self, CastleSide};
use crate::piece::{Piece, PieceState};

/// Index of a piece record in the board's arena.
pub type PieceId = u8;

/// Errors for positions that parse but cannot be played from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{team} has {count} kings, expected exactly 1")]
    KingCount { team: Team, count: usize },

    #[error("{0} has more than 16 pieces")]
    TooManyPieces(Team),

    #[error("pawn on final row at {0}")]
    PawnOnFinalRow(Square),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Team),
}

/// Ordered, fixed-capacity list of one team's live pieces.
///
/// A team never has more than 16 pieces, so the ids live inline and the
/// roster is `Copy`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Roster {
    ids: [PieceId; Self::CAPACITY],
    len: u8,
}

impl Roster {
    /// Maximum number of pieces one team can own.
    pub const CAPACITY: usize = 16;

    const fn new() -> Self {
        Roster {
            ids: [0; Self::CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, id: PieceId) {
        debug_assert!((self.len as usize) < Self::CAPACITY);
        self.ids[self.len as usize] = id;
        self.len += 1;
    }

    /// Removes `id`, keeping the order of the remaining pieces.
    fn remove(&mut self, id: PieceId) {
        let len = self.len as usize;
        let index = self.ids[..len]
            .iter()
            .position(|&i| i == id)
            .unwrap_or_else(|| panic!("piece {} is not on the roster", id));
        self.ids.copy_within(index + 1..len, index);
        self.len -= 1;
    }

    /// Returns the number of live pieces.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if the roster is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the piece ids in roster order.
    #[inline]
    pub fn as_slice(&self) -> &[PieceId] {
        &self.ids[..self.len as usize]
    }
}

impl fmt::Debug for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// One square of a [`Board::snapshot`].
pub type SnapshotSquare = Option<(Team, PieceKind)>;

/// Complete board state.
///
/// The grid holds arena ids, the arena holds piece records, and each team's
/// roster lists its live ids in a stable order. `Board` is a value type:
/// cloning it is a flat copy, and every move produces a new board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: [[Option<PieceId>; 8]; 8],
    pub(crate) arena: [Option<Piece>; Self::MAX_PIECES],
    pub(crate) rosters: [Roster; 2],
    pub(crate) turn: Team,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// Arena capacity: both full rosters.
    pub const MAX_PIECES: usize = 2 * Roster::CAPACITY;

    fn empty(turn: Team) -> Self {
        Board {
            grid: [[None; 8]; 8],
            arena: [None; Self::MAX_PIECES],
            rosters: [Roster::new(); 2],
            turn,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn new() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = Fen::parse(fen)?;
        Self::from_parsed_fen(&parsed)
    }

    /// Creates a board from a parsed FEN record.
    ///
    /// Movement flags are derived from the record: pawns off their starting
    /// row have moved, kings and rooks are unmoved only when the castling
    /// field still grants them a right, and the pawn standing beyond the
    /// en-passant square is marked as having just advanced two rows.
    ///
    /// Rosters list pieces in grid scan order: row 0 first, columns left to
    /// right. The standard position reads Black's back rank before its
    /// pawns and White's pawns before its back rank.
    pub fn from_parsed_fen(fen: &Fen) -> Result<Self, BoardError> {
        let mut board = Board::empty(fen.side_to_move);
        board.halfmove_clock = fen.halfmove_clock;
        board.fullmove_number = fen.fullmove_number;

        for team in Team::ALL {
            let squares = team_squares(&fen.placement, team);
            let kings = squares
                .iter()
                .filter(|(kind, _)| *kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(BoardError::KingCount { team, count: kings });
            }
            if squares.len() > Roster::CAPACITY {
                return Err(BoardError::TooManyPieces(team));
            }

            for &(kind, sq) in &squares {
                if kind == PieceKind::Pawn && (sq.row() == 0 || sq.row() == 7) {
                    return Err(BoardError::PawnOnFinalRow(sq));
                }
                let state = initial_state(kind, team, sq, fen);
                board.insert(Piece {
                    team,
                    position: sq,
                    state,
                });
            }
        }

        let waiting = fen.side_to_move.opposite();
        if board.is_in_check(waiting) {
            return Err(BoardError::OpponentInCheck(waiting));
        }

        debug_assert!(board.is_consistent());
        Ok(board)
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement: Placement = [[None; 8]; 8];
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                placement[sq.row() as usize][sq.col() as usize] = Some((piece.kind(), piece.team));
            }
        }

        let castling = CastlingFlags {
            white_kingside: movegen::castling_right(self, Team::White, CastleSide::Kingside),
            white_queenside: movegen::castling_right(self, Team::White, CastleSide::Queenside),
            black_kingside: movegen::castling_right(self, Team::Black, CastleSide::Kingside),
            black_queenside: movegen::castling_right(self, Team::Black, CastleSide::Queenside),
        };

        Fen {
            placement,
            side_to_move: self.turn,
            castling,
            en_passant: self.en_passant_square(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    /// Adds a piece to the arena, grid and roster.
    pub(crate) fn insert(&mut self, piece: Piece) -> PieceId {
        let id = self
            .arena
            .iter()
            .position(Option::is_none)
            .expect("piece arena is full") as PieceId;
        let sq = piece.position;
        debug_assert!(self.grid[sq.row() as usize][sq.col() as usize].is_none());
        self.arena[id as usize] = Some(piece);
        self.grid[sq.row() as usize][sq.col() as usize] = Some(id);
        self.rosters[piece.team.index()].push(id);
        id
    }

    /// Removes the piece with the given id from the arena, grid and roster.
    pub(crate) fn remove(&mut self, id: PieceId) -> Piece {
        let piece = self.arena[id as usize]
            .take()
            .unwrap_or_else(|| panic!("piece {} is not in the arena", id));
        let sq = piece.position;
        self.grid[sq.row() as usize][sq.col() as usize] = None;
        self.rosters[piece.team.index()].remove(id);
        piece
    }

    /// Moves the piece with the given id to an empty square.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        let piece = self.arena[id as usize]
            .as_mut()
            .unwrap_or_else(|| panic!("piece {} is not in the arena", id));
        let from = piece.position;
        debug_assert!(self.grid[to.row() as usize][to.col() as usize].is_none());
        piece.position = to;
        self.grid[from.row() as usize][from.col() as usize] = None;
        self.grid[to.row() as usize][to.col() as usize] = Some(id);
    }

    /// Rebuilds both rosters by scanning the grid from row 0, column by
    /// column. Called after every applied move, so a moved piece takes the
    /// roster slot of its new square.
    pub(crate) fn reorder_rosters(&mut self) {
        let mut rosters = [Roster::new(); 2];
        for &id in self.grid.iter().flatten().flatten() {
            if let Some(piece) = &self.arena[id as usize] {
                rosters[piece.team.index()].push(id);
            }
        }
        self.rosters = rosters;
    }

    /// Returns the arena id of the piece on a square.
    #[inline]
    pub fn id_at(&self, sq: Square) -> Option<PieceId> {
        self.grid[sq.row() as usize][sq.col() as usize]
    }

    /// Returns the piece record for an id, if it is live.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.arena.get(id as usize).and_then(Option::as_ref)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        self.arena[id as usize]
            .as_mut()
            .unwrap_or_else(|| panic!("piece {} is not in the arena", id))
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.id_at(sq).and_then(|id| self.piece(id))
    }

    /// Returns `Some(true)` if the square is empty, `Some(false)` if it is
    /// occupied, and `None` if `(row, col)` is off the board.
    pub fn is_empty(&self, row: i8, col: i8) -> Option<bool> {
        Square::new(row, col).map(|sq| self.id_at(sq).is_none())
    }

    /// Returns the team occupying `(row, col)`, or `None` if the square is
    /// empty or off the board.
    pub fn team_at(&self, row: i8, col: i8) -> Option<Team> {
        Square::new(row, col)
            .and_then(|sq| self.piece_at(sq))
            .map(|piece| piece.team)
    }

    /// Returns the team to move.
    #[inline]
    pub fn turn(&self) -> Team {
        self.turn
    }

    /// Returns the number of plies since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the fullmove number (starts at 1, increments after Black moves).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns a team's roster.
    #[inline]
    pub fn roster(&self, team: Team) -> &Roster {
        &self.rosters[team.index()]
    }

    /// Iterates over a team's live pieces in roster order.
    pub fn pieces(&self, team: Team) -> impl Iterator<Item = &Piece> + '_ {
        self.rosters[team.index()]
            .as_slice()
            .iter()
            .filter_map(move |&id| self.piece(id))
    }

    /// Returns the square of a team's king.
    ///
    /// # Panics
    /// Panics if the team has no king, which legal play never produces.
    pub fn king_square(&self, team: Team) -> Square {
        self.pieces(team)
            .find(|piece| piece.kind() == PieceKind::King)
            .map(|piece| piece.position)
            .unwrap_or_else(|| panic!("{} has no king", team))
    }

    /// Returns true if `sq` is attacked by any piece of team `by`.
    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by: Team) -> bool {
        movegen::is_square_attacked(self, sq, by)
    }

    /// Returns true if the given team's king is attacked.
    pub fn is_in_check(&self, team: Team) -> bool {
        self.is_square_attacked(self.king_square(team), team.opposite())
    }

    /// Legal destinations for the piece on `sq`; empty if there is none.
    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        movegen::legal_moves(self, sq)
    }

    /// Every legal move of the side to move with the board it produces, in
    /// roster order then per-piece generation order.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        movegen::successors(self)
    }

    /// Returns the square behind a pawn that advanced two rows on the last
    /// ply, if there is one.
    pub fn en_passant_square(&self) -> Option<Square> {
        Team::ALL
            .iter()
            .flat_map(|&team| self.pieces(team))
            .find(|piece| piece.just_advanced_two())
            .and_then(|pawn| pawn.position.offset(-pawn.team.pawn_direction(), 0))
    }

    /// Returns a plain `[row][col]` view of the board for display.
    pub fn snapshot(&self) -> [[SnapshotSquare; 8]; 8] {
        let mut view = [[None; 8]; 8];
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                view[sq.row() as usize][sq.col() as usize] = Some((piece.team, piece.kind()));
            }
        }
        view
    }

    /// Checks that grid, arena and rosters agree with each other.
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0usize;
        for team in Team::ALL {
            for &id in self.rosters[team.index()].as_slice() {
                let Some(piece) = self.piece(id) else {
                    return false;
                };
                if piece.team != team || self.id_at(piece.position) != Some(id) {
                    return false;
                }
                seen += 1;
            }
        }
        let on_grid = Square::all().filter(|&sq| self.id_at(sq).is_some()).count();
        let in_arena = self.arena.iter().filter(|slot| slot.is_some()).count();
        seen == on_grid && seen == in_arena
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                match self.piece_at(Square::at(row, col)) {
                    Some(piece) => write!(f, " {}", piece)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in 'a'..='h' {
            write!(f, " {}", file)?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

/// A team's `(kind, square)` pairs in row-major order from row 0.
fn team_squares(placement: &Placement, team: Team) -> Vec<(PieceKind, Square)> {
    let mut squares = Vec::new();
    for row in 0..8u8 {
        for col in 0..8u8 {
            if let Some((kind, owner)) = placement[row as usize][col as usize] {
                if owner == team {
                    squares.push((kind, Square::at(row, col)));
                }
            }
        }
    }
    squares
}

fn initial_state(kind: PieceKind, team: Team, sq: Square, fen: &Fen) -> PieceState {
    let home = team.back_row();
    match kind {
        PieceKind::Pawn => {
            let passed = fen.side_to_move != team
                && fen.en_passant == sq.offset(-team.pawn_direction(), 0);
            PieceState::Pawn {
                has_moved: sq.row() != team.pawn_row(),
                just_advanced_two: passed,
            }
        }
        PieceKind::King => {
            let at_home = sq == Square::at(home, 4);
            let right = fen.castling.kingside(team) || fen.castling.queenside(team);
            PieceState::King {
                has_moved: !(at_home && right),
            }
        }
        PieceKind::Rook => {
            let right = (sq == Square::at(home, 7) && fen.castling.kingside(team))
                || (sq == Square::at(home, 0) && fen.castling.queenside(team));
            PieceState::Rook { has_moved: !right }
        }
        other => PieceState::unmoved(other),
    }
}
