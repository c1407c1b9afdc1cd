/// Fixed game constants.  Nothing here is user-configurable.
///
/// All geometry is in logical pixels on an 800×600 canvas; the renderer
/// scales it to whatever the terminal offers.

use std::time::Duration;

// ── Canvas ────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

pub const FPS: u32 = 60;
pub const FRAME: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 50;
/// Horizontal pixels per tick for each held direction key.
pub const PLAYER_SPEED: i32 = 8;
/// Gap between the player's bottom edge and the bottom of the canvas.
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 40;
/// Spawn height range, half-open.
pub const ENEMY_SPAWN_Y: std::ops::Range<i32> = -100..-40;
/// Fall speed range in pixels per tick, half-open.
pub const ENEMY_SPEED: std::ops::Range<i32> = 1..8;
/// An enemy whose top edge passes this line is discarded.
pub const ENEMY_DESPAWN_Y: i32 = SCREEN_HEIGHT + 10;

/// Population floor: one replacement is spawned per tick while below it.
pub const ENEMY_POPULATION: usize = 8;
