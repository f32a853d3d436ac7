//! Move application.
//!
//! Applying a move never touches the board it is called on: the board is
//! cloned, the clone is updated, and the clone is returned.

use chess_core::{PieceKind, PromotionChoice, Square, Team};

use crate::legality;
use crate::movegen::CastleSide;
use crate::piece::PieceState;
use crate::Board;

impl Board {
    /// Plays a legal move and returns the resulting board.
    ///
    /// `(from, to)` must come from [`Board::legal_moves`]; this is checked in
    /// debug builds only. `promotion` is used when a pawn reaches its final
    /// row and ignored otherwise.
    ///
    /// # Panics
    /// Panics if the move would capture a king or an own piece, or if `from`
    /// is empty.
    pub fn make_move(&self, from: Square, to: Square, promotion: PromotionChoice) -> Board {
        debug_assert!(
            self.piece_at(from).is_some_and(|p| p.team == self.turn)
                && legality::is_legal(self, from, to),
            "illegal move {}{} on {:?}",
            from,
            to,
            self
        );
        self.apply_unchecked(from, to, promotion)
    }

    /// Applies a geometric move without king-safety checks.
    ///
    /// Handles captures, en passant, promotion, castling, flag updates,
    /// clocks and the turn. The turn passes to the mover's opponent, which
    /// lets the legality filter probe moves for either team.
    pub(crate) fn apply_unchecked(
        &self,
        from: Square,
        to: Square,
        promotion: PromotionChoice,
    ) -> Board {
        let mut next = self.clone();
        let id = next
            .id_at(from)
            .unwrap_or_else(|| panic!("no piece on {} to move", from));
        let mover = *next.piece_mut(id);
        let kind = mover.kind();

        let mut captured = false;
        if let Some(target_id) = next.id_at(to) {
            let target = *next.piece_mut(target_id);
            assert!(
                target.kind() != PieceKind::King,
                "{}{} captures the {} king",
                from,
                to,
                target.team
            );
            assert!(
                target.team != mover.team,
                "{}{} captures a {} piece of its own team",
                from,
                to,
                target.kind()
            );
            next.remove(target_id);
            captured = true;
        } else if kind == PieceKind::Pawn && from.col() != to.col() {
            // Diagonal onto an empty square: en passant.
            let passed = Square::at(from.row(), to.col());
            let passed_id = next
                .id_at(passed)
                .unwrap_or_else(|| panic!("{}{} has no pawn to take en passant", from, to));
            next.remove(passed_id);
            captured = true;
        }

        clear_double_advances(&mut next);

        next.relocate(id, to);
        next.piece_mut(id).state = match kind {
            PieceKind::Pawn if to.row() == mover.team.promotion_row() => {
                PieceState::moved(promotion.kind())
            }
            PieceKind::Pawn => PieceState::Pawn {
                has_moved: true,
                just_advanced_two: from.row().abs_diff(to.row()) == 2,
            },
            other => PieceState::moved(other),
        };

        if kind == PieceKind::King {
            if let Some(side) = CastleSide::from_king_move(from.col(), to.col()) {
                let home = from.row();
                let rook_id = next
                    .id_at(Square::at(home, side.rook_col()))
                    .unwrap_or_else(|| panic!("{}{} castles without a rook", from, to));
                next.relocate(rook_id, Square::at(home, side.rook_dest_col()));
                next.piece_mut(rook_id).state = PieceState::moved(PieceKind::Rook);
            }
        }

        if captured || kind == PieceKind::Pawn {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if mover.team == Team::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.turn = mover.team.opposite();
        next.reorder_rosters();

        debug_assert!(next.is_consistent(), "grid and rosters disagree: {:?}", next);
        next
    }
}

/// En passant eligibility lasts one ply.
fn clear_double_advances(board: &mut Board) {
    for piece in board.arena.iter_mut().flatten() {
        if let PieceState::Pawn {
            just_advanced_two, ..
        } = &mut piece.state
        {
            *just_advanced_two = false;
        }
    }
}
