//! Property tests over random legal playouts.

use chess_core::{PieceKind, PromotionChoice, Team};
use chess_engine::{search, Board, Status};
use proptest::prelude::*;

const STARTS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
    "4k3/1P6/8/3pP3/8/8/6p1/4K3 w - d6 0 1",
];

fn start_position() -> impl Strategy<Value = Board> {
    prop::sample::select(STARTS.to_vec()).prop_map(|fen| Board::from_fen(fen).unwrap())
}

/// Boards reached by playing `choices` as indices into each successor list.
fn playout(start: &Board, choices: &[usize]) -> Vec<Board> {
    let mut boards = vec![start.clone()];
    let mut board = start.clone();
    for &choice in choices {
        let mut successors = board.successors();
        if successors.is_empty() {
            break;
        }
        let (_, next) = successors.swap_remove(choice % successors.len());
        board = next;
        boards.push(board.clone());
    }
    boards
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn legal_moves_never_leave_own_king_attacked(
        start in start_position(),
        choices in prop::collection::vec(any::<usize>(), 0..24),
    ) {
        for board in playout(&start, &choices) {
            for team in Team::ALL {
                for piece in board.pieces(team) {
                    for to in board.legal_moves(piece.position) {
                        let target = board.piece_at(to);
                        prop_assert!(target.map_or(true, |p| p.kind() != PieceKind::King));
                        if team == board.turn() {
                            let next = board.make_move(piece.position, to, PromotionChoice::Queen);
                            prop_assert!(!next.is_in_check(team), "{:?} {} {}", board, piece.position, to);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn grid_and_rosters_stay_consistent(
        start in start_position(),
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        for board in playout(&start, &choices) {
            prop_assert!(board.is_consistent());
            for team in Team::ALL {
                let kings = board.pieces(team).filter(|p| p.kind() == PieceKind::King).count();
                prop_assert_eq!(kings, 1);
                prop_assert!(board.roster(team).len() <= 16);
            }
        }
    }

    #[test]
    fn halfmove_clock_resets_on_capture_or_pawn_move(
        start in start_position(),
        choices in prop::collection::vec(any::<usize>(), 1..30),
    ) {
        let boards = playout(&start, &choices);
        for pair in boards.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            let pieces_before = before.roster(Team::White).len() + before.roster(Team::Black).len();
            let pieces_after = after.roster(Team::White).len() + after.roster(Team::Black).len();
            let pawns_before: Vec<_> = Team::ALL
                .iter()
                .flat_map(|&t| before.pieces(t))
                .filter(|p| p.kind() == PieceKind::Pawn)
                .map(|p| p.position)
                .collect();
            let pawn_moved = pawns_before.iter().any(|&sq| after.piece_at(sq).is_none());
            if pieces_after < pieces_before || pawn_moved {
                prop_assert_eq!(after.halfmove_clock(), 0);
            } else {
                prop_assert_eq!(after.halfmove_clock(), before.halfmove_clock() + 1);
            }
            prop_assert_eq!(after.turn(), before.turn().opposite());
        }
    }

    #[test]
    fn en_passant_lasts_one_ply(
        start in start_position(),
        choices in prop::collection::vec(any::<usize>(), 1..30),
    ) {
        for board in playout(&start, &choices) {
            let flagged = Team::ALL
                .iter()
                .flat_map(|&t| board.pieces(t))
                .filter(|p| p.just_advanced_two())
                .collect::<Vec<_>>();
            prop_assert!(flagged.len() <= 1);
            if let Some(pawn) = flagged.first() {
                // Only the side that did not just move can be flagged.
                prop_assert_eq!(pawn.team, board.turn().opposite());
            }
        }
    }

    #[test]
    fn search_is_deterministic(
        start in start_position(),
        choices in prop::collection::vec(any::<usize>(), 0..8),
    ) {
        let boards = playout(&start, &choices);
        let board = boards.last().unwrap();
        let first = search(board, 2);
        let second = search(board, 2);
        prop_assert_eq!(first, second);
        if board.status() == Status::Checkmate || board.status() == Status::Stalemate {
            prop_assert!(first.best_move.is_none());
        } else {
            let mv = first.best_move.unwrap();
            prop_assert!(board.legal_moves(mv.from).contains(&mv.to));
        }
    }
}
