//! All game entity types: pure data, no logic.

use crate::terrain::Terrain;

// ── Gameplay constants ───────────────────────────────────────────────────────

pub const PLAYER_START_X: f32 = 50.0;
pub const PLAYER_START_Y: f32 = 0.0;
pub const PLAYER_SIZE: f32 = 30.0;
pub const PLAYER_SPEED: f32 = 5.0;

/// Ticks between two shots.
pub const SHOOT_COOLDOWN: i32 = 10;

pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 5.0;
pub const BULLET_SPEED: f32 = 8.0;

pub const ENEMY_SIZE: f32 = 30.0;
pub const ENEMY_MIN_SPEED: f32 = 2.0;
pub const ENEMY_MAX_SPEED: f32 = 5.0;
/// Vertical distance an enemy moves toward the player each tick.
pub const ZIGZAG_SPEED: f32 = 2.0;

/// Ticks between two enemy spawns.
pub const SPAWN_COOLDOWN: i32 = 60;

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What ended the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// The ship's bottom edge dipped under the ground of this segment.
    Terrain { segment: usize },
    /// The ship touched an enemy.
    Enemy,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Bullet {
    /// A standard bullet with its top-left corner at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed: BULLET_SPEED,
        }
    }
}

// ── Player & enemy ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Bullets fired by this ship that are still on screen.
    pub bullets: Vec<Bullet>,
    /// Ticks until the next shot is allowed. Can go negative; only `<= 0`
    /// matters.
    pub shoot_cooldown: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            bullets: Vec::new(),
            shoot_cooldown: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward distance per tick.
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed,
        }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub terrain: Terrain,
    /// Ticks until the next enemy appears.
    pub spawn_cooldown: i32,
    pub status: GameStatus,
    /// Enemies destroyed since the last reset.
    pub score: u32,
    /// Ticks simulated since the last reset.
    pub frame: u64,
    /// Logical field size.
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
