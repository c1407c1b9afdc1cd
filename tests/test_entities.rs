use dodger::config::*;
use dodger::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!(r.left(), 10);
    assert_eq!(r.right(), 40);
    assert_eq!(r.top(), 20);
    assert_eq!(r.bottom(), 60);
}

#[test]
fn rect_overlap_is_symmetric() {
    let a = Rect::new(0, 0, 50, 50);
    let b = Rect::new(49, 49, 40, 40);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn rect_touching_edges_do_not_intersect() {
    let a = Rect::new(0, 0, 50, 50);
    assert!(!a.intersects(&Rect::new(50, 0, 40, 40))); // right edge
    assert!(!a.intersects(&Rect::new(-40, 0, 40, 40))); // left edge
    assert!(!a.intersects(&Rect::new(0, 50, 40, 40))); // bottom edge
    assert!(!a.intersects(&Rect::new(0, -40, 40, 40))); // top edge
}

#[test]
fn rect_contained_intersects() {
    let outer = Rect::new(0, 0, 50, 50);
    let inner = Rect::new(5, 5, 40, 40);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_centred_above_bottom() {
    let p = Player::new();
    let r = p.rect();
    assert_eq!(r.left() + r.width / 2, SCREEN_WIDTH / 2);
    assert_eq!(r.bottom(), SCREEN_HEIGHT - 10);
    assert_eq!((r.width, r.height), (PLAYER_WIDTH, PLAYER_HEIGHT));
    assert_eq!(p.kind(), SpriteKind::Player);
}

#[test]
fn player_moves_by_speed_without_clamping() {
    let mut p = Player { x: 2, y: 540 };
    p.move_left();
    assert_eq!(p.x, 2 - PLAYER_SPEED); // negative until update
    p.move_right();
    p.move_right();
    assert_eq!(p.x, 2 + PLAYER_SPEED);
}

#[test]
fn player_update_clamps_left() {
    let mut p = Player { x: -100, y: 540 };
    assert_eq!(p.update(), Fate::Alive);
    assert_eq!(p.x, 0);
}

#[test]
fn player_update_clamps_right() {
    let mut p = Player { x: SCREEN_WIDTH - 10, y: 540 };
    p.update();
    assert_eq!(p.rect().right(), SCREEN_WIDTH);
}

#[test]
fn player_update_is_idempotent_and_keeps_y() {
    let mut p = Player { x: 300, y: 540 };
    p.update();
    p.update();
    assert_eq!(p, Player { x: 300, y: 540 });
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn random_enemy_within_spawn_ranges() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let e = Enemy::random(&mut rng);
        assert!((0..SCREEN_WIDTH - ENEMY_WIDTH).contains(&e.x), "x={}", e.x);
        assert!((-100..-40).contains(&e.y), "y={}", e.y);
        assert!((1..8).contains(&e.speed_y), "speed={}", e.speed_y);
    }
}

#[test]
fn enemy_falls_by_its_speed() {
    let mut e = Enemy { x: 100, y: -50, speed_y: 5 };
    assert_eq!(e.update(), Fate::Alive);
    assert_eq!(e.y, -45);
    assert_eq!(e.x, 100);
    assert_eq!(e.kind(), SpriteKind::Enemy);
}

#[test]
fn enemy_expires_only_past_despawn_line() {
    // Lands exactly on the line: still alive
    let mut e = Enemy { x: 0, y: ENEMY_DESPAWN_Y - 3, speed_y: 3 };
    assert_eq!(e.update(), Fate::Alive);
    assert_eq!(e.y, ENEMY_DESPAWN_Y);

    // One more step crosses it
    assert_eq!(e.update(), Fate::Expired);
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn sprites_lists_player_then_enemies() {
    let state = GameState {
        player: Player::new(),
        enemies: vec![
            Enemy { x: 0, y: 0, speed_y: 1 },
            Enemy { x: 60, y: 0, speed_y: 2 },
        ],
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    };
    let kinds: Vec<SpriteKind> = state.sprites().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![SpriteKind::Player, SpriteKind::Enemy, SpriteKind::Enemy]
    );
    assert!(!state.is_game_over());
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    };
    let mut cloned = original.clone();

    cloned.player.x = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy { x: 5, y: 5, speed_y: 1 });

    assert_eq!(original.player, Player::new());
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
