//! Position signatures via Zobrist hashing.
//!
//! A signature XORs fixed pseudo-random keys for:
//! - every piece on its square (6 kinds x 2 teams x 64 squares)
//! - Black to move
//! - each castling right still held (4)
//! - the en-passant file, only when a capture there is available (8)
//!
//! Two boards with the same placement, side to move and rights share a
//! signature; move counters and unused en-passant flags do not contribute.

use chess_core::{PieceKind, Square, Team};

use crate::movegen::{self, CastleSide};
use crate::Board;

/// Zobrist keys, generated at compile time from a fixed seed.
struct ZobristKeys {
    /// `[kind][team][square]`
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    /// White kingside, white queenside, black kingside, black queenside.
    castling: [u64; 4],
    en_passant: [u64; 8],
}

impl ZobristKeys {
    const fn new() -> Self {
        // xorshift64
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut kind = 0;
        while kind < 6 {
            let mut team = 0;
            while team < 2 {
                let mut sq = 0;
                while sq < 64 {
                    state = next_random(state);
                    pieces[kind][team][sq] = state;
                    sq += 1;
                }
                team += 1;
            }
            kind += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    fn piece_key(&self, kind: PieceKind, team: Team, sq: Square) -> u64 {
        self.pieces[kind.index()][team.index()][sq.index()]
    }
}

static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Board {
    /// Returns the position signature used for repetition detection.
    pub fn signature(&self) -> u64 {
        let mut hash = 0u64;

        for team in Team::ALL {
            for piece in self.pieces(team) {
                hash ^= ZOBRIST.piece_key(piece.kind(), team, piece.position);
            }
        }

        if self.turn == Team::Black {
            hash ^= ZOBRIST.black_to_move;
        }

        let rights = [
            (Team::White, CastleSide::Kingside),
            (Team::White, CastleSide::Queenside),
            (Team::Black, CastleSide::Kingside),
            (Team::Black, CastleSide::Queenside),
        ];
        for (i, (team, side)) in rights.into_iter().enumerate() {
            if movegen::castling_right(self, team, side) {
                hash ^= ZOBRIST.castling[i];
            }
        }

        if let Some(file) = self.capturable_en_passant_file() {
            hash ^= ZOBRIST.en_passant[file as usize];
        }

        hash
    }

    /// File of the en-passant square when a pawn of the side to move stands
    /// beside the pawn that just advanced two rows.
    fn capturable_en_passant_file(&self) -> Option<u8> {
        let target = self.en_passant_square()?;
        let passed_row = target.row() as i8 - self.turn.pawn_direction();
        let col = target.col() as i8;
        let capturer_beside = [col - 1, col + 1].into_iter().any(|c| {
            Square::new(passed_row, c)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p.team == self.turn && p.kind() == PieceKind::Pawn)
        });
        capturer_beside.then_some(target.col())
    }
}
