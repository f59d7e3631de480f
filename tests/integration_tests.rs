//! Integration tests for the tick-driven game loop

use blockfall::core::{Field, Game, GameOverReason, PieceSource, TickEvent};
use blockfall::types::{Control, Controls, FieldCell, PieceKind, ENTRY_X};

fn scripted(kinds: &[PieceKind]) -> Game {
    Game::with_source(PieceSource::scripted(kinds).unwrap())
}

fn held(control: Control) -> Controls {
    Controls::NONE.with(control)
}

/// Soft drop until the piece stops falling; returns the first non-idle event.
fn drop_piece(game: &mut Game) -> TickEvent {
    for _ in 0..100 {
        let event = game.tick(held(Control::SoftDrop));
        if event != TickEvent::Idle {
            return event;
        }
    }
    panic!("piece never settled");
}

/// Spawn the next piece, walk it to anchor column `x`, then drop it.
fn place_at(game: &mut Game, x: i32) -> TickEvent {
    if game.active().is_none() {
        assert_eq!(game.tick(Controls::NONE), TickEvent::Idle);
    }
    while let Some(piece) = game.active() {
        let control = match piece.x().cmp(&x) {
            std::cmp::Ordering::Less => Control::MoveRight,
            std::cmp::Ordering::Greater => Control::MoveLeft,
            std::cmp::Ordering::Equal => break,
        };
        game.tick(held(control));
        game.tick(Controls::NONE);
    }
    drop_piece(game)
}

#[test]
fn test_line_falls_and_locks_on_the_floor() {
    let mut game = scripted(&[PieceKind::Line]);
    assert_eq!(drop_piece(&mut game), TickEvent::Locked);

    // The vertical Line sits in column 6 on the four bottom interior rows.
    for y in 13..=16 {
        assert_eq!(game.field().get(6, y), Some(FieldCell::Locked(PieceKind::Line)));
        assert_eq!(game.field().get(6, y).unwrap().glyph(), 'A');
    }
    assert_eq!(game.field().get(6, 12), Some(FieldCell::Empty));
    assert_eq!(game.score(), 25);
    assert_eq!(game.pieces_placed(), 1);
    assert!(game.active().is_none());
}

#[test]
fn test_line_falls_under_plain_gravity() {
    let mut game = scripted(&[PieceKind::Line]);
    let mut ticks = 0;
    let event = loop {
        ticks += 1;
        let event = game.tick(Controls::NONE);
        if event != TickEvent::Idle {
            break event;
        }
    };
    assert_eq!(event, TickEvent::Locked);
    // 15 drops from y = -2 to y = 13, then one more period to find the floor.
    assert_eq!(ticks, 16 * 20);
}

#[test]
fn test_completing_four_rows_scores_and_collapses() {
    let field = Field::from_rows(&[
        "B         ",
        "AAAAA AAAA",
        "AAAAA AAAA",
        "AAAAA AAAA",
        "AAAAA AAAA",
    ])
    .unwrap();
    let mut game = Game::from_parts(field, PieceSource::scripted(&[PieceKind::Line]).unwrap());

    let TickEvent::LinesCompleted(rows) = drop_piece(&mut game) else {
        panic!("expected completed rows");
    };
    assert_eq!(rows.as_slice(), &[13, 14, 15, 16]);
    assert_eq!(game.score(), 1625);
    for y in 13..=16 {
        assert_eq!(game.field().get(1, y), Some(FieldCell::Completed));
    }

    assert_eq!(game.collapse_completed_rows(), 4);
    assert_eq!(game.field().get(1, 16), Some(FieldCell::Locked(PieceKind::Tee)));
    for y in 12..=15 {
        for x in 1..=10 {
            assert_eq!(game.field().get(x, y), Some(FieldCell::Empty), "({}, {})", x, y);
        }
    }
}

#[test]
fn test_two_rows_score_425() {
    let field = Field::from_rows(&["AAAAA AAAA", "AAAAA AAAA"]).unwrap();
    let mut game = Game::from_parts(field, PieceSource::scripted(&[PieceKind::Line]).unwrap());
    assert!(matches!(drop_piece(&mut game), TickEvent::LinesCompleted(ref rows) if rows.len() == 2));
    assert_eq!(game.score(), 425);
    game.collapse_completed_rows();
    // Two Line cells remain above the cleared rows and fall by two.
    assert_eq!(game.field().get(6, 16), Some(FieldCell::Locked(PieceKind::Line)));
    assert_eq!(game.field().get(6, 15), Some(FieldCell::Locked(PieceKind::Line)));
    assert_eq!(game.field().get(6, 14), Some(FieldCell::Empty));
}

#[test]
fn test_speed_ramp_after_ten_locks() {
    let mut game = scripted(&[PieceKind::Cube]);
    assert_eq!(game.gravity_period(), 20);

    let mut lines = 0;
    // Cube fills mask columns 1..=2, so these anchors tile the interior.
    for x in [0, 2, 4, 6, 8, 0, 2, 4, 6, 8] {
        match place_at(&mut game, x) {
            TickEvent::LinesCompleted(rows) => {
                lines += rows.len();
                game.collapse_completed_rows();
            }
            TickEvent::Locked => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    assert_eq!(lines, 4);
    assert_eq!(game.pieces_placed(), 10);
    assert_eq!(game.gravity_period(), 19);
    assert_eq!(game.score(), 8 * 25 + 2 * 425);
    assert_eq!(game.field(), &Field::new());
}

#[test]
fn test_held_rotate_fires_once_until_released() {
    let mut game = scripted(&[PieceKind::Tee]);
    game.tick(Controls::NONE);
    let start = game.active().unwrap().rotation();

    for _ in 0..5 {
        game.tick(held(Control::Rotate));
    }
    let once = game.active().unwrap().rotation();
    assert_eq!(once, start.rotate_cw());

    game.tick(Controls::NONE);
    game.tick(held(Control::Rotate));
    assert_eq!(game.active().unwrap().rotation(), once.rotate_cw());
}

#[test]
fn test_held_move_does_not_repeat() {
    let mut game = scripted(&[PieceKind::Cube]);
    game.tick(Controls::NONE);
    for _ in 0..6 {
        game.tick(held(Control::MoveRight));
    }
    assert_eq!(game.active().unwrap().x(), ENTRY_X + 1);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut game = scripted(&[PieceKind::Cube]);
    let mut placed = 0;
    let reason = loop {
        match drop_piece(&mut game) {
            TickEvent::Locked => placed += 1,
            TickEvent::GameOver(reason) => break reason,
            other => panic!("unexpected {:?}", other),
        }
    };
    // Eight cubes fill rows 1..=16 of two columns; the ninth cannot enter.
    assert_eq!(placed, 8);
    assert_eq!(reason, GameOverReason::RestedAboveField);
    assert_eq!(game.score(), 200);
    assert!(game.is_game_over());
    assert_eq!(game.tick(Controls::NONE), TickEvent::GameOver(reason));
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut field = Field::new();
    field.set(5, 0, FieldCell::Locked(PieceKind::Tee));
    let mut game = Game::from_parts(field, PieceSource::scripted(&[PieceKind::Cube]).unwrap());
    assert_eq!(
        game.tick(Controls::NONE),
        TickEvent::GameOver(GameOverReason::BlockedSpawn)
    );
    assert!(game.active().is_none());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Controls::NONE,
        held(Control::MoveLeft),
        Controls::NONE,
        held(Control::Rotate),
        held(Control::SoftDrop),
        held(Control::SoftDrop),
        Controls::NONE,
        held(Control::MoveRight),
    ];
    let mut a = Game::new(2024);
    let mut b = Game::new(2024);
    for step in 0..2000 {
        let controls = script[step % script.len()];
        assert_eq!(a.tick(controls), b.tick(controls), "step {}", step);
        assert_eq!(a.snapshot(), b.snapshot(), "step {}", step);
        if a.is_game_over() {
            break;
        }
    }
}

#[test]
fn test_restart_keeps_playing() {
    let mut game = scripted(&[PieceKind::Cube]);
    while !game.is_game_over() {
        drop_piece(&mut game);
    }
    game.restart();
    assert!(!game.is_game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(drop_piece(&mut game), TickEvent::Locked);
}
