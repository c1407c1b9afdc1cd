/// Game entity types and the per-entity update rules.

use rand::Rng;

use crate::config::{
    ENEMY_DESPAWN_Y, ENEMY_HEIGHT, ENEMY_SPAWN_Y, ENEMY_SPEED, ENEMY_WIDTH, PLAYER_BOTTOM_MARGIN,
    PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
}

/// What a sprite's update decided about its own lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Expired,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the two rectangles share a positive-area region.
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }
}

// ── Sprite capability ─────────────────────────────────────────────────────────

/// Shared surface of everything that is drawn and advanced each tick.
pub trait Sprite {
    fn rect(&self) -> Rect;
    fn kind(&self) -> SpriteKind;
    /// Advance one tick.
    fn update(&mut self) -> Fate;
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    /// Centred horizontally, resting just above the bottom edge.
    pub fn new() -> Self {
        Player {
            x: SCREEN_WIDTH / 2 - PLAYER_WIDTH / 2,
            y: SCREEN_HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT,
        }
    }

    /// No bounds check here; `update` clamps.
    pub fn move_left(&mut self) {
        self.x -= PLAYER_SPEED;
    }

    pub fn move_right(&mut self) {
        self.x += PLAYER_SPEED;
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Sprite for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn kind(&self) -> SpriteKind {
        SpriteKind::Player
    }

    /// Keep the player inside the canvas horizontally.
    fn update(&mut self) -> Fate {
        if self.x < 0 {
            self.x = 0;
        }
        if self.x + PLAYER_WIDTH > SCREEN_WIDTH {
            self.x = SCREEN_WIDTH - PLAYER_WIDTH;
        }
        Fate::Alive
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    /// Pixels fallen per tick.
    pub speed_y: i32,
}

impl Enemy {
    /// A new enemy somewhere above the visible area, falling at a random speed.
    pub fn random(rng: &mut impl Rng) -> Self {
        Enemy {
            x: rng.gen_range(0..SCREEN_WIDTH - ENEMY_WIDTH),
            y: rng.gen_range(ENEMY_SPAWN_Y),
            speed_y: rng.gen_range(ENEMY_SPEED),
        }
    }
}

impl Sprite for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    fn kind(&self) -> SpriteKind {
        SpriteKind::Enemy
    }

    fn update(&mut self) -> Fate {
        self.y += self.speed_y;
        if self.y > ENEMY_DESPAWN_Y {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Live enemies; order carries no meaning.
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub status: GameStatus,
    /// Active ticks since the last reset.
    pub frame: u64,
}

impl GameState {
    /// Every drawable entity, player first.
    pub fn sprites(&self) -> impl Iterator<Item = &dyn Sprite> + '_ {
        std::iter::once(&self.player as &dyn Sprite)
            .chain(self.enemies.iter().map(|e| e as &dyn Sprite))
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
