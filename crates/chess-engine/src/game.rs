//! Game sessions.
//!
//! A [`Game`] owns the current board, the repetition history for this game,
//! the moves played so far, and the result once the game ends. It is the
//! validated front door for interactive play; [`apply_move`] is the raw
//! collaborator entry point that trusts its caller.

use chess_core::{Move, PieceKind, PromotionChoice, Square, Team};
use thiserror::Error;
use tracing::{info, warn};

use crate::rules::{self, GameResult};
use crate::search::{self, SearchResult};
use crate::{Board, BoardError, RepetitionHistory};

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("game has already ended")]
    GameAlreadyOver,

    #[error("invalid position: {0}")]
    InvalidPosition(#[from] BoardError),
}

/// Picks the piece a pawn becomes on its final row.
///
/// Closures `FnMut(Team, Square) -> PromotionChoice` implement this, so a
/// front end can prompt the user while automated play passes a
/// [`FixedPromotion`].
pub trait PromotionStrategy {
    /// Called only for promoting moves; `square` is the pawn's destination.
    fn choose(&mut self, team: Team, square: Square) -> PromotionChoice;
}

impl<F> PromotionStrategy for F
where
    F: FnMut(Team, Square) -> PromotionChoice,
{
    fn choose(&mut self, team: Team, square: Square) -> PromotionChoice {
        self(team, square)
    }
}

/// Always promotes to the same kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPromotion(pub PromotionChoice);

impl PromotionStrategy for FixedPromotion {
    fn choose(&mut self, _team: Team, _square: Square) -> PromotionChoice {
        self.0
    }
}

/// The board after a move and the game-status flags it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub result: Option<GameResult>,
}

impl MoveOutcome {
    /// Returns true if the game ended with this move.
    pub fn game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns true if the game ended in a draw.
    pub fn draw(&self) -> bool {
        self.result.is_some_and(GameResult::is_draw)
    }

    /// Returns the winner, if the move delivered checkmate.
    pub fn winner(&self) -> Option<Team> {
        self.result.and_then(GameResult::winner)
    }
}

/// Plays a move, records the new position in `history`, and reports the
/// game status for the side now to move.
///
/// `(from, to)` must be a legal move of `board`; only debug builds check.
/// `promotion` defaults to a queen.
pub fn apply_move(
    board: &Board,
    history: &mut RepetitionHistory,
    from: Square,
    to: Square,
    promotion: Option<PromotionChoice>,
) -> MoveOutcome {
    let next = board.make_move(from, to, promotion.unwrap_or_default());
    history.record(&next);
    let result = rules::game_result(&next, history);
    MoveOutcome {
        board: next,
        result,
    }
}

/// Returns true if moving the piece on `from` to `to` promotes a pawn.
fn is_promotion(board: &Board, from: Square, to: Square) -> bool {
    board.piece_at(from).is_some_and(|piece| {
        piece.kind() == PieceKind::Pawn && to.row() == piece.team.promotion_row()
    })
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    start: Board,
    history: RepetitionHistory,
    moves: Vec<Move>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::from_fen(fen)?))
    }

    /// Creates a game starting from `board`, which may already be decided.
    pub fn from_board(board: Board) -> Self {
        let mut history = RepetitionHistory::new();
        history.record(&board);
        let result = rules::game_result(&board, &history);
        Game {
            start: board.clone(),
            board,
            history,
            moves: Vec::new(),
            result,
        }
    }

    /// Starts over from the original position with an empty history.
    pub fn restart(&mut self) {
        *self = Self::from_board(self.start.clone());
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board the game started from.
    pub fn start_board(&self) -> &Board {
        &self.start
    }

    /// Returns the team to move.
    pub fn turn(&self) -> Team {
        self.board.turn()
    }

    /// Legal destinations for the piece on `sq`.
    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        self.board.legal_moves(sq)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.board.turn())
    }

    /// Returns the result, if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Moves played so far.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the number of plies played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Counts how many times the current position has occurred.
    pub fn position_count(&self) -> u32 {
        self.history.count(&self.board)
    }

    /// Returns the repetition history.
    pub fn history(&self) -> &RepetitionHistory {
        &self.history
    }

    /// Returns the current position as FEN.
    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Plays a move, promoting to a queen.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        self.apply_move_with(from, to, &mut FixedPromotion::default())
    }

    /// Plays a move, asking `promotion` for the new piece if a pawn reaches
    /// its final row.
    pub fn apply_move_with<P>(
        &mut self,
        from: Square,
        to: Square,
        promotion: &mut P,
    ) -> Result<MoveOutcome, GameError>
    where
        P: PromotionStrategy + ?Sized,
    {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }
        let on_move = self
            .board
            .piece_at(from)
            .is_some_and(|piece| piece.team == self.board.turn());
        if !on_move || !self.board.legal_moves(from).contains(&to) {
            warn!(%from, %to, fen = %self.board.to_fen(), "rejected illegal move");
            return Err(GameError::IllegalMove { from, to });
        }

        let choice = if is_promotion(&self.board, from, to) {
            Some(promotion.choose(self.board.turn(), to))
        } else {
            None
        };

        let outcome = apply_move(&self.board, &mut self.history, from, to, choice);
        self.board = outcome.board.clone();
        self.moves.push(Move::new(from, to));
        self.result = outcome.result;

        if let Some(result) = self.result {
            info!(%result, plies = self.moves.len(), "game over");
        }
        Ok(outcome)
    }

    /// Searches the current position for the side to move.
    ///
    /// Returns `None` once the game is over.
    pub fn search_best_move(&self, depth: u32) -> Option<SearchResult> {
        if self.result.is_some() {
            return None;
        }
        Some(search::search(&self.board, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DrawReason;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn play(game: &mut Game, coordinate: &str) -> MoveOutcome {
        let (mv, _) = Move::from_coordinate(coordinate).unwrap();
        game.apply_move(mv.from, mv.to).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.position_count(), 1);
        assert!(!game.is_game_over());
        assert!(!game.is_check());
        assert_eq!(game.turn(), Team::White);
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.apply_move(sq("e2"), sq("e5")),
            Err(GameError::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(game.ply_count(), 0);
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn moving_out_of_turn_is_illegal() {
        let mut game = Game::new();
        assert_eq!(
            game.apply_move(sq("e7"), sq("e5")),
            Err(GameError::IllegalMove {
                from: sq("e7"),
                to: sq("e5")
            })
        );
        assert_eq!(game.turn(), Team::White);
        assert_eq!(*game.board(), Board::new());

        play(&mut game, "e2e4");
        assert!(game.apply_move(sq("d2"), sq("d4")).is_err());
        assert_eq!(game.turn(), Team::Black);
        assert_eq!(game.ply_count(), 1);
        play(&mut game, "e7e5");
        assert_eq!(game.turn(), Team::White);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        play(&mut game, "f2f3");
        play(&mut game, "e7e5");
        play(&mut game, "g2g4");
        let outcome = play(&mut game, "d8h4");
        assert!(outcome.game_over());
        assert!(!outcome.draw());
        assert_eq!(outcome.winner(), Some(Team::Black));
        assert_eq!(game.result(), Some(GameResult::Win(Team::Black)));
        assert_eq!(
            game.apply_move(sq("a2"), sq("a3")),
            Err(GameError::GameAlreadyOver)
        );
    }

    #[test]
    fn stalemate_start() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));
        assert!(game.search_best_move(2).is_none());
    }

    #[test]
    fn threefold_repetition_on_third_occurrence() {
        let mut game = Game::new();
        for _ in 0..2 {
            for m in ["g1f3", "g8f6", "f3g1"] {
                assert!(!play(&mut game, m).game_over());
            }
            let outcome = play(&mut game, "f6g8");
            if game.position_count() < 3 {
                assert!(!outcome.draw());
            } else {
                assert!(outcome.draw());
            }
        }
        assert_eq!(game.position_count(), 3);
        assert_eq!(
            game.result(),
            Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        );
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 49 60").unwrap();
        assert!(!game.is_game_over());
        let outcome = play(&mut game, "a1a2");
        assert_eq!(outcome.board.halfmove_clock(), 50);
        assert_eq!(
            outcome.result,
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        );
    }

    #[test]
    fn promotion_strategy_is_consulted_only_for_promotions() {
        let mut game = Game::from_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut asked = Vec::new();
        let mut prompt = |team: Team, square: Square| {
            asked.push((team, square));
            PromotionChoice::Rook
        };
        game.apply_move_with(sq("e1"), sq("d1"), &mut prompt).unwrap();
        game.apply_move_with(sq("e7"), sq("e6"), &mut prompt).unwrap();
        game.apply_move_with(sq("a7"), sq("a8"), &mut prompt).unwrap();
        assert_eq!(asked, vec![(Team::White, sq("a8"))]);
        assert_eq!(
            game.board().piece_at(sq("a8")).map(|p| p.kind()),
            Some(PieceKind::Rook)
        );
    }

    #[test]
    fn fixed_promotion() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
        game.apply_move_with(sq("a2"), sq("a1"), &mut FixedPromotion(PromotionChoice::Knight))
            .unwrap();
        assert_eq!(
            game.board().piece_at(sq("a1")).map(|p| (p.team, p.kind())),
            Some((Team::Black, PieceKind::Knight))
        );
    }

    #[test]
    fn raw_apply_move_records_history() {
        let board = Board::new();
        let mut history = RepetitionHistory::new();
        history.record(&board);
        let outcome = apply_move(&board, &mut history, sq("e2"), sq("e4"), None);
        assert_eq!(history.count(&outcome.board), 1);
        assert_eq!(history.len(), 2);
        assert!(!outcome.game_over());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn restart_clears_history() {
        let mut game = Game::new();
        play(&mut game, "e2e4");
        game.restart();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.history().len(), 1);
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn invalid_fen_is_reported() {
        assert!(matches!(
            Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(GameError::InvalidPosition(BoardError::KingCount { .. }))
        ));
    }

    #[test]
    fn search_from_session() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let result = game.search_best_move(2).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq("a1"), sq("a8"))));
    }
}
