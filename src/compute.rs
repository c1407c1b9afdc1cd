/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::ENEMY_POPULATION;
use crate::entities::{Enemy, Fate, GameState, GameStatus, Player, Sprite};
use crate::input::{Controls, GameKey};

/// Result of a discrete key press.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Continue(GameState),
    Quit,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh round: score 0, player centred, a full population of enemies.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    let mut state = GameState {
        player: Player::new(),
        enemies: Vec::with_capacity(ENEMY_POPULATION),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    };
    for _ in 0..ENEMY_POPULATION {
        state = spawn_enemy(&state, rng);
    }
    log::info!("new round with {} enemies", state.enemies.len());
    state
}

/// Add exactly one randomly placed enemy.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    let enemy = Enemy::random(rng);
    log::trace!(
        "spawn enemy at ({}, {}) falling {}px/tick",
        enemy.x,
        enemy.y,
        enemy.speed_y
    );
    let mut enemies = state.enemies.clone();
    enemies.push(enemy);
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.move_left();
    GameState {
        player,
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.move_right();
    GameState {
        player,
        ..state.clone()
    }
}

/// React to a fresh key-down.
///
/// The interrupt key ends the program in any state.  While the round is
/// over, Escape quits and every other key starts a new round; during play
/// discrete presses change nothing (movement comes from held keys).
pub fn handle_key_press(state: &GameState, key: GameKey, rng: &mut impl Rng) -> Flow {
    match (state.status, key) {
        (_, GameKey::Interrupt) => Flow::Quit,
        (GameStatus::GameOver, GameKey::Escape) => Flow::Quit,
        (GameStatus::GameOver, _) => {
            log::info!("restart requested");
            Flow::Continue(init_state(rng))
        }
        (GameStatus::Playing, _) => Flow::Continue(state.clone()),
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// True if the player overlaps any live enemy.
pub fn detect_collision(state: &GameState) -> bool {
    let player = state.player.rect();
    state.enemies.iter().any(|e| player.intersects(&e.rect()))
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished round is frozen: the state comes back unchanged.
pub fn tick(state: &GameState, controls: Controls, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    // ── 1. Movement: each held key applies independently ────────────────────
    let mut next = state.clone();
    if controls.left {
        next = move_player_left(&next);
    }
    if controls.right {
        next = move_player_right(&next);
    }

    // ── 2. Update every sprite ───────────────────────────────────────────────
    next.player.update();
    next.enemies.retain_mut(|enemy| match enemy.update() {
        Fate::Alive => true,
        Fate::Expired => {
            log::trace!("enemy left the screen at y={}", enemy.y);
            false
        }
    });

    // ── 3. At most one replacement per tick ──────────────────────────────────
    if next.enemies.len() < ENEMY_POPULATION {
        next = spawn_enemy(&next, rng);
    }

    // ── 4. Collision ─────────────────────────────────────────────────────────
    if detect_collision(&next) {
        next.status = GameStatus::GameOver;
    }

    // ── 5. Score counts the tick even when it ended the round ────────────────
    next.score += 1;
    next.frame += 1;

    if next.status == GameStatus::GameOver {
        log::info!("game over with score {}", next.score);
    }
    next
}
