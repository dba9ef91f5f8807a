use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::Rng;

use camelot::model::board::{self, Board};
use camelot::model::charge::charge_reachable;
use camelot::model::game::{Match, Refusal};
use camelot::model::legality::{apply, ruling};
use camelot::model::occupancy::{can_capture_anywhere, can_capture_from};
use camelot::model::turn::{Obligation, TurnState};
use camelot::model::{Cell, Color, Echelon, GRID, GameResult, Man};

fn cell(row: u8, col: u8) -> Cell {
    Cell::from_coords(row, col)
}

#[test]
fn white_opens_with_a_pawn_step_and_black_is_to_move() {
    let mut game = Match::new();
    let from = Cell::new(112);
    let to = Cell::new(100); // one row forward

    let verdict = game.move_man(Color::WHITE, from, to).unwrap();
    assert!(!verdict.canter && !verdict.is_capture());
    // A basic move is the whole turn.
    assert_eq!(
        game.move_man(Color::WHITE, to, Cell::new(88)),
        Err(Refusal::InvalidMove)
    );
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
    assert_eq!(game.to_move(), Color::BLACK);
    assert_eq!(game.last_turn_trail(), &[from, to]);
}

#[test]
fn mandatory_capture_locks_out_quiet_moves() {
    let mut b = Board::empty();
    b.place(cell(8, 5), Man::WHITE_PAWN);
    b.place(cell(8, 6), Man::BLACK_PAWN);
    b.place(cell(12, 2), Man::WHITE_PAWN);
    b.place(cell(2, 3), Man::BLACK_PAWN);
    b.place(cell(2, 4), Man::BLACK_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);
    assert!(game.turn().mandatory_capture);

    // A quiet step with the other pawn is refused outright.
    assert_eq!(
        game.move_man(Color::WHITE, cell(12, 2), cell(12, 3)),
        Err(Refusal::InvalidMove)
    );

    // The capture goes through and completes the obligation.
    let verdict = game
        .move_man(Color::WHITE, cell(8, 5), cell(8, 7))
        .unwrap();
    assert_eq!(verdict.captured, Some(cell(8, 6)));
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
    assert_eq!(game.captured_men(), &[Man::BLACK_PAWN]);
}

#[test]
fn knight_may_not_stop_short_of_a_reachable_capture() {
    let mut b = Board::empty();
    b.place(cell(8, 2), Man::WHITE_KNIGHT);
    b.place(cell(8, 3), Man::WHITE_PAWN);
    b.place(cell(8, 5), Man::BLACK_PAWN);
    b.place(cell(2, 2), Man::BLACK_PAWN);
    b.place(cell(2, 3), Man::BLACK_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);
    assert!(!game.turn().mandatory_capture);

    // Free canter to the cell from which a capture opens up.
    let verdict = game
        .move_man(Color::WHITE, cell(8, 2), cell(8, 4))
        .unwrap();
    assert!(verdict.canter);

    // Ending the turn here misses the charge.
    assert_eq!(
        game.submit_turn(Color::WHITE),
        Err(Refusal::ObligationUnmet(Obligation::MissedCharge))
    );

    // Completing the charge settles the turn.
    let verdict = game
        .move_man(Color::WHITE, cell(8, 4), cell(8, 6))
        .unwrap();
    assert_eq!(verdict.captured, Some(cell(8, 5)));
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
}

#[test]
fn mid_capture_chain_must_be_finished_or_undone() {
    let mut b = Board::empty();
    b.place(cell(8, 5), Man::WHITE_PAWN);
    b.place(cell(12, 10), Man::WHITE_PAWN);
    b.place(cell(8, 6), Man::BLACK_PAWN);
    b.place(cell(9, 7), Man::BLACK_PAWN);
    b.place(cell(2, 2), Man::BLACK_PAWN);
    b.place(cell(2, 3), Man::BLACK_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);
    game.move_man(Color::WHITE, cell(8, 5), cell(8, 7)).unwrap();
    assert_eq!(
        game.submit_turn(Color::WHITE),
        Err(Refusal::ObligationUnmet(Obligation::MustKeepCapturing))
    );

    // Undo rewinds to the start of the turn, replay takes the chain
    // to its end.
    game.undo(Color::WHITE).unwrap();
    game.move_man(Color::WHITE, cell(8, 5), cell(8, 7)).unwrap();
    game.move_man(Color::WHITE, cell(8, 7), cell(10, 7)).unwrap();
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
    assert_eq!(game.captured_men().len(), 2);
}

#[test]
fn castle_shuffle_is_capped_across_the_whole_game() {
    let mut b = Board::empty();
    b.place(board::WHITE_CASTLE[0], Man::WHITE_PAWN);
    b.place(cell(8, 1), Man::WHITE_PAWN);
    b.place(cell(4, 9), Man::BLACK_PAWN);
    b.place(cell(4, 10), Man::BLACK_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);

    // First shuffle.
    game.move_man(Color::WHITE, board::WHITE_CASTLE[0], board::WHITE_CASTLE[1])
        .unwrap();
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
    game.move_man(Color::BLACK, cell(4, 9), cell(3, 9)).unwrap();
    assert_eq!(game.submit_turn(Color::BLACK), Ok(None));

    // Second shuffle.
    game.move_man(Color::WHITE, board::WHITE_CASTLE[1], board::WHITE_CASTLE[0])
        .unwrap();
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
    game.move_man(Color::BLACK, cell(3, 9), cell(4, 9)).unwrap();
    assert_eq!(game.submit_turn(Color::BLACK), Ok(None));

    // The third is refused for the rest of the game.
    assert_eq!(
        game.move_man(Color::WHITE, board::WHITE_CASTLE[0], board::WHITE_CASTLE[1]),
        Err(Refusal::InvalidMove)
    );
}

#[test]
fn occupying_both_enemy_castle_cells_wins_outright() {
    let mut b = Board::empty();
    b.place(board::BLACK_CASTLE[0], Man::WHITE_KNIGHT);
    b.place(cell(1, 6), Man::WHITE_PAWN);
    // Black keeps plenty of material; it does not matter.
    for col in 2..8 {
        b.place(cell(10, col), Man::BLACK_PAWN);
    }

    let mut game = Match::with_board(b, Color::WHITE);
    game.move_man(Color::WHITE, cell(1, 6), board::BLACK_CASTLE[1])
        .unwrap();
    assert_eq!(
        game.submit_turn(Color::WHITE),
        Ok(Some(GameResult::Winner(Color::WHITE)))
    );
    assert_eq!(
        game.move_man(Color::BLACK, cell(10, 2), cell(11, 2)),
        Err(Refusal::GameOver)
    );
}

#[test]
fn lone_men_on_both_sides_draw_at_the_next_completed_turn() {
    let mut b = Board::empty();
    b.place(cell(8, 3), Man::WHITE_PAWN);
    b.place(cell(3, 8), Man::BLACK_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);
    game.move_man(Color::WHITE, cell(8, 3), cell(8, 4)).unwrap();
    assert_eq!(game.submit_turn(Color::WHITE), Ok(Some(GameResult::Draw)));
}

#[test]
fn shuffling_does_not_discharge_a_mandatory_capture() {
    let mut b = Board::empty();
    let castle = board::WHITE_CASTLE[0];
    b.place(castle, Man::WHITE_PAWN);
    b.place(cell(8, 5), Man::WHITE_PAWN);
    b.place(cell(8, 6), Man::BLACK_PAWN);
    b.place(cell(2, 2), Man::BLACK_PAWN);
    b.place(cell(2, 3), Man::BLACK_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);
    assert!(game.turn().mandatory_capture);
    assert!(game.turn().must_leave_castle);
    assert!(!game.turn().capture_out_of_castle);

    // The shuffle is a legal move, but it neither leaves the castle
    // nor takes the capture owed elsewhere.
    game.move_man(Color::WHITE, castle, board::WHITE_CASTLE[1])
        .unwrap();
    assert_eq!(
        game.submit_turn(Color::WHITE),
        Err(Refusal::ObligationUnmet(Obligation::MustCapture))
    );

    // Stepping out instead is the one exception that overrides the
    // capture requirement.
    game.undo(Color::WHITE).unwrap();
    game.move_man(Color::WHITE, castle, cell(14, 4)).unwrap();
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
}

#[test]
fn forced_castle_exit_with_a_capture_available_must_take_it() {
    let mut b = Board::empty();
    let castle = board::WHITE_CASTLE[0];
    b.place(castle, Man::WHITE_PAWN);
    let victim = cell(14, 5);
    b.place(victim, Man::BLACK_PAWN);
    b.place(cell(2, 2), Man::BLACK_PAWN);
    b.place(cell(2, 3), Man::BLACK_PAWN);
    b.place(cell(8, 9), Man::WHITE_PAWN);

    let mut game = Match::with_board(b, Color::WHITE);
    assert!(game.turn().must_leave_castle);
    assert!(game.turn().capture_out_of_castle);

    // Stepping out sideways instead of capturing is a legal move but
    // an unacceptable turn.
    game.move_man(Color::WHITE, castle, cell(14, 4)).unwrap();
    assert_eq!(
        game.submit_turn(Color::WHITE),
        Err(Refusal::ObligationUnmet(Obligation::MustCaptureOutOfCastle))
    );

    game.undo(Color::WHITE).unwrap();
    let verdict = game.move_man(Color::WHITE, castle, cell(13, 5)).unwrap();
    assert_eq!(verdict.captured, Some(victim));
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
}

fn random_board(rng: &mut SmallRng) -> Board {
    let mut board = Board::empty();
    for _ in 0..24 {
        let target = Cell::new(rng.random_range(0..GRID));
        if target.is_off_board() || board.get(target).is_some() {
            continue;
        }
        let man = match rng.random_range(0..4u8) {
            0 => Man::WHITE_PAWN,
            1 => Man::WHITE_KNIGHT,
            2 => Man::BLACK_PAWN,
            _ => Man::BLACK_KNIGHT,
        };
        board.place(target, man);
    }
    board
}

#[test]
fn capture_scan_agrees_with_per_man_queries_on_random_positions() {
    let mut rng = SmallRng::seed_from_u64(0x1337);
    for _ in 0..200 {
        let board = random_board(&mut rng);
        for col in [Color::WHITE, Color::BLACK] {
            let scan = can_capture_anywhere(&board, col);
            let any = board
                .men(col)
                .any(|(at, _)| can_capture_from(&board, col, at));
            assert_eq!(scan, any);
        }
    }
}

#[test]
fn charge_search_is_stable_on_random_positions() {
    let mut rng = SmallRng::seed_from_u64(0xCA47E);
    for _ in 0..100 {
        let board = random_board(&mut rng);
        for col in [Color::WHITE, Color::BLACK] {
            for (at, man) in board.men(col).collect::<Vec<_>>() {
                if man.ech() != Echelon::KNIGHT || board::is_own_castle_cell(col, at) {
                    continue;
                }
                let once = charge_reachable(&board, col, at);
                let twice = charge_reachable(&board, col, at);
                assert!(once.iter().eq(twice.iter()));
            }
        }
    }
}

#[test]
fn first_legal_move_applies_and_undoes_cleanly_on_random_positions() {
    let mut rng = SmallRng::seed_from_u64(0xB0A2D);
    for _ in 0..100 {
        let mut board = random_board(&mut rng);
        let col = Color::WHITE;
        let mut turn = TurnState::open(&board, col, [0, 0]);
        let before_board = board.clone();
        let before_turn = turn.clone();

        let candidate = board
            .men(col)
            .flat_map(|(from, _)| (0..GRID).map(move |ix| (from, Cell::new(ix))))
            .find(|&(from, to)| ruling(&board, &turn, col, from, to).legal);

        if let Some((from, to)) = candidate {
            assert!(apply(&mut board, &mut turn, col, from, to).legal);
            assert!(turn.undo(&mut board));
            assert_eq!(board, before_board);
            assert_eq!(turn, before_turn);
        }
    }
}
