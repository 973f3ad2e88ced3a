//! Integration tests for a full session driven the way a frame loop drives it

use tetris_engine::core::{GameConfig, GameSession, Shape};
use tetris_engine::types::{Direction, GameAction, Outcome, SessionState};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn i_only() -> GameConfig {
    GameConfig::new().with_shapes(vec![Shape::i()])
}

fn drop_to_floor(game: &mut GameSession) {
    while !game.move_piece(Direction::Down).landed {}
}

#[test]
fn test_horizontal_piece_stops_at_right_wall() {
    init_tracing();
    let mut game = GameSession::new(i_only()).unwrap();
    assert_eq!(game.active().x, 3);

    for _ in 0..3 {
        assert!(game.apply_action(GameAction::Move(Direction::Right)).moved);
    }
    let out = game.apply_action(GameAction::Move(Direction::Right));
    assert!(!out.moved);
    assert!(!out.landed);
    assert_eq!(game.active().x, 6);
    assert_eq!(game.active().cells().map(|(x, _)| x).max(), Some(9));
}

#[test]
fn test_hold_once_per_piece() {
    init_tracing();
    let mut game = GameSession::new(GameConfig::default().with_seed(3)).unwrap();
    let first = game.active().clone();

    assert!(game.hold().moved);
    assert_eq!(game.held(), Some(&first));
    assert!(!game.swap_allowed());

    let active = game.active().clone();
    let snapshot = game.snapshot();
    assert_eq!(game.hold(), Outcome::default());
    assert_eq!(game.active(), &active);
    assert_eq!(game.snapshot(), snapshot);
}

#[test]
fn test_gravity_locks_grounded_piece_in_one_tick() {
    init_tracing();
    let mut game = GameSession::new(i_only().with_fall_ms(500)).unwrap();
    drop_to_floor(&mut game);
    let landed = game.active().clone();

    let out = game.tick(600);
    assert!(out.locked);
    assert_eq!(out.lines_cleared, 0);
    assert!(!out.game_over);
    for (x, y) in landed.cells() {
        assert_eq!(game.board().locked_at(x, y), Some(landed.color));
    }
    assert_eq!(game.active().y, 0);
}

#[test]
fn test_gravity_lock_clears_full_row() {
    init_tracing();
    // A 4-wide board: every horizontal I fills a whole row.
    let config = i_only().with_board_size(4, 10).with_fall_ms(100);
    let mut game = GameSession::new(config).unwrap();
    assert_eq!(game.active().x, 0);
    drop_to_floor(&mut game);

    let out = game.tick(101);
    assert!(out.locked);
    assert_eq!(out.lines_cleared, 1);
    assert_eq!(out.score_delta, 40);
    assert_eq!(game.score(), 40);
    assert!(game.board().locked_positions().is_empty());
}

#[test]
fn test_gravity_walks_piece_to_floor() {
    init_tracing();
    let mut game = GameSession::new(i_only().with_fall_ms(10)).unwrap();
    let mut steps = 0;
    loop {
        let out = game.tick(11);
        if out.locked {
            break;
        }
        assert!(out.moved);
        steps += 1;
    }
    assert_eq!(steps, 19);
    assert_eq!(game.board().locked_positions().len(), 4);
}

#[test]
fn test_soft_drop_speeds_up_gravity() {
    let mut game = GameSession::new(i_only().with_fall_ms(1000).with_soft_drop_ms(20)).unwrap();
    assert_eq!(game.tick(100), Outcome::default());

    game.set_soft_drop(true);
    assert!(game.tick(100).moved);
    assert_eq!(game.active().y, 1);

    game.set_soft_drop(false);
    assert_eq!(game.tick(100), Outcome::default());
    assert_eq!(game.active().y, 1);
}

#[test]
fn test_play_until_game_over() {
    init_tracing();
    let mut game = GameSession::new(GameConfig::default().with_seed(99)).unwrap();

    let mut drops = 0;
    while !game.is_game_over() {
        let out = game.apply_action(GameAction::HardDrop);
        assert!(out.locked);
        drops += 1;
        assert!(drops < 500, "stacking in the middle must end the game");
    }

    assert_eq!(game.state(), SessionState::GameOver);
    let frozen = game.snapshot();
    assert_eq!(game.apply_action(GameAction::Rotate), Outcome::default());
    assert_eq!(game.tick(5_000), Outcome::default());
    assert_eq!(game.snapshot(), frozen);

    game.restart();
    assert_eq!(game.state(), SessionState::Running);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::Move(Direction::Left),
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::Move(Direction::Right),
        GameAction::HardDrop,
        GameAction::HardDrop,
    ];

    let play = || {
        let mut game = GameSession::new(GameConfig::default().with_seed(4242)).unwrap();
        for action in script {
            game.apply_action(action);
            game.tick(16);
        }
        game.snapshot()
    };

    assert_eq!(play(), play());
}

#[test]
fn test_snapshot_serializes() {
    let game = GameSession::new(i_only()).unwrap();
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["width"], 10);
    assert_eq!(json["height"], 20);
    assert_eq!(json["state"], "Running");
    assert_eq!(json["active"]["cells"].as_array().map(|c| c.len()), Some(4));
    assert!(json["held"].is_null());
}

#[test]
fn test_config_from_json() {
    let config: GameConfig = serde_json::from_str(
        r#"{
            "board_width": 8,
            "board_height": 16,
            "fall_ms": 250,
            "palette": [{"r": 1, "g": 2, "b": 3}],
            "seed": 5
        }"#,
    )
    .unwrap();

    let game = GameSession::new(config).unwrap();
    assert_eq!(game.board().width(), 8);
    assert_eq!(game.board().height(), 16);
    assert_eq!(game.fall_interval_ms(), 250);
    assert_eq!(game.active().color.b, 3);
}
