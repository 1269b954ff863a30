//! Full-game scenario tests
//!
//! Drives whole games through the public click API and checks the
//! aggregate results: phase transitions, mill/removal sequencing, wins by
//! attrition, and state invariants under random play.

use morris_core::{
    Board, Event, Game, HandCounts, MoveOutcome, Phase, Player, Point, RemoveOutcome,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Feed a click script through the engine, asserting each expected event.
fn run_script(game: &mut Game, script: &[(u8, Event)]) {
    for (i, &(point, expected)) in script.iter().enumerate() {
        let event = game
            .handle_point(Point(point))
            .unwrap_or_else(|e| panic!("click {} at point {}: {}", i, point, e));
        assert_eq!(event, expected, "click {} at point {}", i, point);
    }
}

#[test]
fn quiet_placement_reaches_movement_phase() {
    // Both players place all nine pieces without ever lining up a triple
    let fill: [u8; 18] = [0, 1, 2, 3, 8, 5, 10, 7, 16, 9, 18, 13, 21, 15, 23, 19, 4, 20];

    let mut game = Game::new();
    for &p in &fill {
        assert_eq!(game.handle_point(Point(p)), Ok(Event::Placed));
    }

    assert_eq!(game.phase(), Phase::Movement);
    assert_eq!(game.in_hand(Player::White), 0);
    assert_eq!(game.in_hand(Player::Black), 0);
    assert_eq!(game.current_player(), Player::White);

    let snap = game.snapshot();
    let occupied = snap.board.iter().filter(|o| o.is_some()).count();
    assert_eq!(occupied, 18);
}

#[test]
fn opening_mill_and_removal() {
    let mut game = Game::new();
    run_script(
        &mut game,
        &[
            (0, Event::Placed),     // white
            (3, Event::Placed),     // black
            (1, Event::Placed),     // white
            (5, Event::Placed),     // black
            (2, Event::MillFormed), // white completes 0-1-2
        ],
    );

    assert!(game.pending_removal());
    assert_eq!(game.current_player(), Player::White);

    run_script(&mut game, &[(3, Event::Removed)]);
    assert!(!game.pending_removal());
    assert_eq!(game.current_player(), Player::Black);
    assert!(!game.is_occupied(Point(3)));
    assert_eq!(game.in_hand(Player::White), 7);
    assert_eq!(game.in_hand(Player::Black), 8);
}

#[test]
fn mill_on_the_final_placement_resolves_in_movement_phase() {
    // Black's last piece lands on 7 and closes 5-6-7 just as the hands
    // empty out, so the removal happens with the movement phase already
    // under way.
    let script: [(u8, Event); 18] = [
        (0, Event::Placed),  // white
        (3, Event::Placed),  // black
        (2, Event::Placed),  // white
        (5, Event::Placed),  // black
        (8, Event::Placed),  // white
        (6, Event::Placed),  // black
        (10, Event::Placed), // white
        (9, Event::Placed),  // black
        (16, Event::Placed), // white
        (13, Event::Placed), // black
        (18, Event::Placed), // white
        (15, Event::Placed), // black
        (21, Event::Placed), // white
        (17, Event::Placed), // black
        (23, Event::Placed), // white
        (20, Event::Placed), // black
        (12, Event::Placed), // white
        (7, Event::MillFormed), // black closes 5-6-7
    ];

    let mut game = Game::new();
    run_script(&mut game, &script);

    assert_eq!(game.phase(), Phase::Movement);
    assert!(game.pending_removal());
    assert_eq!(game.current_player(), Player::Black);

    // No white piece sits in a mill, so any of them may go
    run_script(&mut game, &[(0, Event::Removed)]);
    assert_eq!(game.current_player(), Player::White);

    // Play continues normally: 2 -> 1 is an ordinary slide
    run_script(&mut game, &[(2, Event::Selected), (1, Event::Moved)]);
    assert_eq!(game.current_player(), Player::Black);
}

#[test]
fn oscillating_mill_grinds_the_opponent_down() {
    // White swings a piece out of the 0-1-2 mill and back in, removing a
    // black piece each time it re-forms, until black drops below three.
    let mut board = Board::new();
    for p in [0, 1, 4, 10] {
        board.set(Point(p), Player::White);
    }
    for p in [5, 6, 7, 8] {
        board.set(Point(p), Player::Black);
    }
    let mut game = Game::with_position(
        board,
        HandCounts { white: 0, black: 0 },
        Player::White,
        Phase::Movement,
    );

    // First mill: 4 -> 2 closes 0-1-2; the loose piece at 8 is the only
    // legal target while 5-6-7 stands
    game.select_for_movement(Point(4)).unwrap();
    assert_eq!(game.attempt_move(Point(2)), Ok(MoveOutcome::MillFormed));
    assert_eq!(game.removable_points(), vec![Point(8)]);
    assert_eq!(game.remove_piece(Point(8)), Ok(RemoveOutcome::Removed));

    // Black (flying at three) steps out of its own mill
    game.select_for_movement(Point(5)).unwrap();
    assert_eq!(game.attempt_move(Point(11)), Ok(MoveOutcome::Moved));

    // White swings out...
    game.select_for_movement(Point(2)).unwrap();
    assert_eq!(game.attempt_move(Point(4)), Ok(MoveOutcome::Moved));

    // ...black shuffles...
    game.select_for_movement(Point(11)).unwrap();
    assert_eq!(game.attempt_move(Point(19)), Ok(MoveOutcome::Moved));

    // ...and the swing back re-forms the mill and ends it
    game.select_for_movement(Point(4)).unwrap();
    assert_eq!(game.attempt_move(Point(2)), Ok(MoveOutcome::MillFormed));
    assert_eq!(game.remove_piece(Point(19)), Ok(RemoveOutcome::Won));

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Player::White));
    assert_eq!(game.total_pieces(Player::Black), 2);
}

/// Random clicks must never corrupt the state machine: rejected inputs
/// leave it untouched and accepted ones keep every invariant.
#[test]
fn random_play_preserves_invariants() {
    for seed in [7u64, 1234, 987654321] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();
        let mut prev_total = [9u8, 9u8];

        for _ in 0..3000 {
            if game.phase() == Phase::GameOver {
                break;
            }
            let point = Point(rng.random_range(0..24u8));
            let _ = game.handle_point(point);

            let snap = game.snapshot();
            let on_board = |player: Player| {
                snap.board.iter().filter(|&&o| o == Some(player)).count() as u8
            };

            // Material only ever shrinks, never past the starting nine
            for (i, player) in [Player::White, Player::Black].into_iter().enumerate() {
                let total = match player {
                    Player::White => snap.in_hand.white,
                    Player::Black => snap.in_hand.black,
                } + on_board(player);
                assert!(total <= prev_total[i], "seed {}: material grew", seed);
                prev_total[i] = total;
            }

            // A pending removal only exists in a live game
            if snap.pending_removal {
                assert_ne!(snap.phase, Phase::GameOver, "seed {}", seed);
            }

            // A selection only exists in the movement phase, on a piece
            // of the player to move
            if let Some(sel) = snap.selection {
                assert_eq!(snap.phase, Phase::Movement, "seed {}", seed);
                assert_eq!(
                    snap.board[sel.0 as usize],
                    Some(snap.current_player),
                    "seed {}",
                    seed
                );
            }

            // Winner and game-over phase always travel together
            assert_eq!(
                snap.winner.is_some(),
                snap.phase == Phase::GameOver,
                "seed {}",
                seed
            );
        }
    }
}
