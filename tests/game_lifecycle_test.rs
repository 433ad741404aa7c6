//! End-to-end game scenarios driven through the public command API.

use term_tetris::core::{gravity_interval_ms, Game, ResumePolicy, Rules};
use term_tetris::types::{GameCommand, GameStatus, PieceKind, BOARD_HEIGHT};

/// Drop an O piece so its left column lands on `column`.
fn drop_o_at(game: &mut Game, column: i8) {
    assert!(game.spawn(PieceKind::O));
    let (x, _) = game.anchor();
    for _ in column..x {
        assert!(game.apply(GameCommand::MoveLeft));
    }
    for _ in x..column {
        assert!(game.apply(GameCommand::MoveRight));
    }
    assert!(game.apply(GameCommand::Fall));
}

/// Five O pieces side by side fill the two bottom rows.
fn clear_two_rows(game: &mut Game) {
    for column in [0, 2, 4, 6, 8] {
        drop_o_at(game, column);
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(Rules::new(12345));
    assert_eq!(game.status(), GameStatus::Intro);
    assert!(game.piece().is_none());

    assert!(game.apply(GameCommand::Start));
    assert_eq!(game.status(), GameStatus::Started);
    assert!(game.piece().is_some());
    assert_eq!(game.board().falling_count(), 4);

    // Starting again while running is a no-op.
    assert!(!game.apply(GameCommand::Start));

    assert!(game.apply(GameCommand::Pause));
    assert_eq!(game.status(), GameStatus::Paused);
    assert!(!game.timer().is_armed());

    // Start also resumes a paused game.
    assert!(game.apply(GameCommand::Start));
    assert_eq!(game.status(), GameStatus::Started);
    assert!(game.timer().is_armed());
}

#[test]
fn test_filled_rows_are_cleared() {
    let mut game = Game::new(Rules::new(3));
    game.start();

    clear_two_rows(&mut game);

    assert_eq!(game.num_lines(), 2);
    assert_eq!(game.board().settled_count(), 0);
    assert_eq!(game.board().falling_count(), 4);
    assert_eq!(game.status(), GameStatus::Started);
}

#[test]
fn test_level_and_speed_follow_cleared_lines() {
    let mut game = Game::new(Rules::new(3));
    game.start();
    assert_eq!(game.gravity_interval_ms(), 640);

    clear_two_rows(&mut game);
    clear_two_rows(&mut game);
    assert_eq!(game.level(), 1);

    clear_two_rows(&mut game);
    assert_eq!(game.num_lines(), 6);
    assert_eq!(game.level(), 2);
    assert_eq!(game.gravity_interval_ms(), gravity_interval_ms(2));
    assert_eq!(game.timer().interval_ms(), 580);
}

#[test]
fn test_start_level_applies_to_every_new_game() {
    let mut game = Game::new(Rules::new(5).with_start_level(7));
    game.start();
    assert_eq!(game.level(), 7);
    assert_eq!(game.timer().interval_ms(), 280);
}

#[test]
fn test_game_over_and_restart() {
    let mut game = Game::new(Rules::new(8));
    game.start();

    for _ in 0..1_000 {
        if game.status() != GameStatus::Started {
            break;
        }
        if !game.apply(GameCommand::Fall) {
            game.play();
        }
    }
    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(!game.timer().is_armed());
    assert!(!game.apply(GameCommand::MoveLeft));
    assert!(!game.apply(GameCommand::Pause));

    assert!(game.apply(GameCommand::Start));
    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(game.num_lines(), 0);
    assert_eq!(game.board().settled_count(), 0);
    assert_eq!(game.skyline(), BOARD_HEIGHT as i8 - 1);
}

#[test]
fn test_gravity_moves_piece_one_row_per_interval() {
    let mut game = Game::new(Rules::new(1));
    game.start();
    game.spawn(PieceKind::I);
    let interval = game.gravity_interval_ms();

    for row in 1..=3 {
        for _ in 0..interval / 10 {
            game.tick(10);
        }
        assert_eq!(game.anchor().1, row);
    }
}

#[test]
fn test_piece_locks_on_the_tick_after_landing() {
    let mut game = Game::new(Rules::new(1));
    game.start();
    game.spawn(PieceKind::T);

    let mut steps = 0;
    while game.apply(GameCommand::MoveDown) {
        steps += 1;
    }
    assert_eq!(steps, 14);
    assert_eq!(game.board().settled_count(), 0);

    let interval = game.timer().remaining_ms().unwrap_or(0);
    assert!(game.tick(interval));
    assert_eq!(game.board().settled_count(), 4);
    assert_eq!(game.board().falling_count(), 4);
}

#[test]
fn test_resume_policies() {
    for (policy, expected_row) in [(ResumePolicy::ImmediateFall, 1), (ResumePolicy::Rearm, 0)] {
        let mut game = Game::new(Rules::new(1).with_resume(policy));
        game.start();
        game.spawn(PieceKind::O);

        game.apply(GameCommand::Pause);
        game.apply(GameCommand::Pause);
        assert_eq!(game.anchor().1, expected_row, "policy {}", policy.as_str());
        assert!(game.timer().is_armed());
    }
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut game = Game::new(Rules::new(seed));
        game.start();
        let mut pieces = Vec::new();
        for _ in 0..20 {
            pieces.push(game.piece());
            game.apply(GameCommand::Fall);
        }
        pieces
    };
    assert_eq!(run(42), run(42));
}
