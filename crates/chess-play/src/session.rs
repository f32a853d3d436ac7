//! Interactive session loop.
//!
//! Reads commands line by line, plays human moves through [`Game`], and lets
//! the engine move for the sides it controls. Generic over the input and
//! output streams so the loop can be driven from tests.

use std::io::{self, BufRead, Write};

use chess_core::{Move, PromotionChoice, Square, Team};
use chess_engine::{FixedPromotion, Game, GameError, PromotionStrategy};
use tracing::warn;

use crate::config::EngineSide;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Coordinate move with an optional promotion letter.
    Play(Move, Option<PromotionChoice>),
    /// List legal destinations for the piece on a square.
    Moves(Square),
    Board,
    Fen,
    /// Let the engine move once for the side to move.
    Hint,
    Restart,
    Help,
    Quit,
}

impl Command {
    /// Parses a command; `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let first = words.next()?;
        let command = match first {
            "board" => Command::Board,
            "fen" => Command::Fen,
            "go" | "hint" => Command::Hint,
            "new" | "restart" => Command::Restart,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "moves" => Command::Moves(Square::from_algebraic(words.next()?)?),
            text => {
                let (mv, promotion) = Move::from_coordinate(text)?;
                Command::Play(mv, promotion)
            }
        };
        match words.next() {
            Some(_) => None,
            None => Some(command),
        }
    }
}

const HELP: &str = "\
commands:
  e2e4, e7e8n   play a move (optional promotion letter q/r/b/n)
  moves e2      list legal destinations for the piece on e2
  go            let the engine move for the side to move
  board         print the board
  fen           print the position as FEN
  new           start over
  quit          leave";

/// Asks on the session's streams which piece a pawn becomes.
///
/// Re-prompts on unrecognised input and falls back to a queen at end of input.
struct PromptPromotion<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> PromotionStrategy for PromptPromotion<'_, R, W> {
    fn choose(&mut self, team: Team, square: Square) -> PromotionChoice {
        loop {
            let prompt = write!(self.output, "promote {} pawn on {} to [q/r/b/n]: ", team, square)
                .and_then(|()| self.output.flush());
            if let Err(err) = prompt {
                warn!(%err, "failed to write promotion prompt");
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return PromotionChoice::Queen,
                Err(err) => {
                    warn!(%err, "failed to read promotion choice, promoting to a queen");
                    return PromotionChoice::Queen;
                }
                Ok(_) => {}
            }
            let mut chars = line.trim().chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if let Some(choice) = PromotionChoice::from_char(c) {
                    return choice;
                }
            }
        }
    }
}

/// A terminal game between a human and/or the engine.
pub struct Session<R, W> {
    game: Game,
    engine: EngineSide,
    depth: u32,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Game, engine: EngineSide, depth: u32, input: R, output: W) -> Self {
        Session {
            game,
            engine,
            depth,
            input,
            output,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Consumes the session, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the game ends, the user quits, or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.game.board())?;
        loop {
            if self.game.is_game_over() {
                self.report_result()?;
                return Ok(());
            }

            if self.engine.plays(self.game.turn()) {
                self.engine_move()?;
                continue;
            }

            write!(self.output, "{} to move> ", self.game.turn())?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Command::parse(line) {
                Some(Command::Quit) => return Ok(()),
                Some(command) => self.execute(command)?,
                None => writeln!(self.output, "unrecognised command: {} (try help)", line)?,
            }
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Play(mv, promotion) => self.human_move(mv, promotion),
            Command::Moves(sq) => {
                let moves: Vec<String> = self
                    .game
                    .legal_moves(sq)
                    .iter()
                    .map(|sq| sq.to_algebraic())
                    .collect();
                if moves.is_empty() {
                    writeln!(self.output, "no legal moves from {}", sq)
                } else {
                    writeln!(self.output, "{}: {}", sq, moves.join(" "))
                }
            }
            Command::Board => writeln!(self.output, "{}", self.game.board()),
            Command::Fen => writeln!(self.output, "{}", self.game.to_fen()),
            Command::Hint => self.engine_move(),
            Command::Restart => {
                self.game.restart();
                writeln!(self.output, "{}", self.game.board())
            }
            Command::Help => writeln!(self.output, "{}", HELP),
            Command::Quit => Ok(()),
        }
    }

    fn human_move(&mut self, mv: Move, promotion: Option<PromotionChoice>) -> io::Result<()> {
        let result = match promotion {
            Some(choice) => {
                self.game
                    .apply_move_with(mv.from, mv.to, &mut FixedPromotion(choice))
            }
            None => {
                let mut prompt = PromptPromotion {
                    input: &mut self.input,
                    output: &mut self.output,
                };
                self.game.apply_move_with(mv.from, mv.to, &mut prompt)
            }
        };

        match result {
            Ok(_) => self.after_move(),
            Err(GameError::IllegalMove { .. }) => {
                writeln!(self.output, "illegal move: {}", mv)?;
                let targets = self.game.legal_moves(mv.from);
                if !targets.is_empty() {
                    let list: Vec<String> = targets.iter().map(|sq| sq.to_algebraic()).collect();
                    writeln!(self.output, "{} can move to: {}", mv.from, list.join(" "))?;
                }
                Ok(())
            }
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn engine_move(&mut self) -> io::Result<()> {
        let Some(result) = self.game.search_best_move(self.depth) else {
            return Ok(());
        };
        let Some(mv) = result.best_move else {
            return Ok(());
        };
        match self
            .game
            .apply_move_with(mv.from, mv.to, &mut FixedPromotion::default())
        {
            Ok(_) => {
                writeln!(
                    self.output,
                    "engine plays {} (score {}, {} nodes)",
                    mv, result.score, result.nodes
                )?;
                self.after_move()
            }
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn after_move(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.game.board())?;
        if !self.game.is_game_over() && self.game.is_check() {
            writeln!(self.output, "{} is in check", self.game.turn())?;
        }
        Ok(())
    }

    fn report_result(&mut self) -> io::Result<()> {
        if let Some(result) = self.game.result() {
            writeln!(self.output, "game over: {}", result)?;
        }
        Ok(())
    }
}
