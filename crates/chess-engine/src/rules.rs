//! Game-ending conditions.
//!
//! Check, checkmate and stalemate are facts about a single board and are
//! recomputed on every query. Repetition needs the session's history, so the
//! full result is decided by [`game_result`].

use chess_core::Team;

use crate::movegen;
use crate::{Board, RepetitionHistory};

/// Plies without a capture or pawn move after which the game is drawn.
pub const HALFMOVE_DRAW_LIMIT: u32 = 50;

/// Occurrences of one position that draw the game.
pub const REPETITION_DRAW_COUNT: u32 = 3;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The team delivered checkmate.
    Win(Team),
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the winning team, if any.
    pub fn winner(self) -> Option<Team> {
        match self {
            GameResult::Win(team) => Some(team),
            GameResult::Draw(_) => None,
        }
    }

    /// Returns true for any draw.
    pub fn is_draw(self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win(team) => write!(f, "{} wins by checkmate", team),
            GameResult::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// Fifty plies without a capture or pawn move.
    FiftyMoveRule,
}

impl std::fmt::Display for DrawReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "fifty-move rule",
        };
        f.write_str(text)
    }
}

/// Threat state of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl Board {
    /// Derives the threat state of the side to move.
    pub fn status(&self) -> Status {
        let team = self.turn();
        let in_check = self.is_in_check(team);
        let can_move = movegen::has_legal_move(self, team);
        match (in_check, can_move) {
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check,
            (false, true) => Status::Ongoing,
        }
    }
}

/// Decides whether the game is over on `board`, given the session history
/// (which must already include `board`).
///
/// Checkmate takes precedence over stalemate, stalemate over repetition, and
/// repetition over the halfmove clock.
pub fn game_result(board: &Board, history: &RepetitionHistory) -> Option<GameResult> {
    match board.status() {
        Status::Checkmate => return Some(GameResult::Win(board.turn().opposite())),
        Status::Stalemate => return Some(GameResult::Draw(DrawReason::Stalemate)),
        Status::Check | Status::Ongoing => {}
    }
    if history.count(board) >= REPETITION_DRAW_COUNT {
        return Some(GameResult::Draw(DrawReason::ThreefoldRepetition));
    }
    if board.halfmove_clock() >= HALFMOVE_DRAW_LIMIT {
        return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn startpos_is_ongoing() {
        assert_eq!(Board::new().status(), Status::Ongoing);
    }

    #[test]
    fn check_with_escape() {
        let b = board("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert_eq!(b.status(), Status::Check);
    }

    #[test]
    fn back_rank_mate() {
        let b = board("4R1k1/5ppp/8/8/8/8/8/4K3 b - - 1 1");
        assert_eq!(b.status(), Status::Checkmate);
        let history = RepetitionHistory::new();
        assert_eq!(
            game_result(&b, &history),
            Some(GameResult::Win(Team::White))
        );
    }

    #[test]
    fn cornered_king_stalemate() {
        let b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(b.status(), Status::Stalemate);
        assert_eq!(
            game_result(&b, &RepetitionHistory::new()),
            Some(GameResult::Draw(DrawReason::Stalemate))
        );
    }

    #[test]
    fn halfmove_limit() {
        let history = RepetitionHistory::new();
        let b = board("4k3/8/8/8/8/8/8/4K2R w - - 49 80");
        assert_eq!(game_result(&b, &history), None);
        let b = board("4k3/8/8/8/8/8/8/4K2R w - - 50 80");
        assert_eq!(
            game_result(&b, &history),
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        );
    }

    #[test]
    fn checkmate_beats_halfmove_clock() {
        let b = board("4R1k1/5ppp/8/8/8/8/8/4K3 b - - 60 90");
        assert_eq!(
            game_result(&b, &RepetitionHistory::new()),
            Some(GameResult::Win(Team::White))
        );
    }

    #[test]
    fn repetition_needs_three() {
        let b = Board::new();
        let mut history = RepetitionHistory::new();
        history.record(&b);
        history.record(&b);
        assert_eq!(game_result(&b, &history), None);
        history.record(&b);
        assert_eq!(
            game_result(&b, &history),
            Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        );
    }

    #[test]
    fn result_accessors() {
        assert_eq!(GameResult::Win(Team::Black).winner(), Some(Team::Black));
        assert!(!GameResult::Win(Team::Black).is_draw());
        let draw = GameResult::Draw(DrawReason::Stalemate);
        assert!(draw.is_draw());
        assert_eq!(draw.winner(), None);
        assert_eq!(draw.to_string(), "draw by stalemate");
    }
}
