//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::collision;
use crate::entities::{
    Bullet, Enemy, GameOverCause, GameState, GameStatus, Player, ENEMY_MAX_SPEED,
    ENEMY_MIN_SPEED, ENEMY_SIZE, SHOOT_COOLDOWN, SPAWN_COOLDOWN, ZIGZAG_SPEED,
};
use crate::input::InputState;
use crate::terrain::Terrain;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a `width` x `height` field.
pub fn init_state(width: f32, height: f32, rng: &mut impl Rng) -> GameState {
    GameState {
        player: Player::default(),
        enemies: Vec::new(),
        terrain: Terrain::generate(width, height, rng),
        spawn_cooldown: SPAWN_COOLDOWN,
        status: GameStatus::Running,
        score: 0,
        frame: 0,
        width,
        height,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply directional intent.  Each axis moves at full speed on its own, so a
/// diagonal covers `speed` on both axes.  The result is clamped to the field.
pub fn move_player(state: &GameState, input: &InputState) -> GameState {
    let p = &state.player;
    let mut x = p.x;
    let mut y = p.y;
    if input.up {
        y -= p.speed;
    }
    if input.down {
        y += p.speed;
    }
    if input.left {
        x -= p.speed;
    }
    if input.right {
        x += p.speed;
    }

    GameState {
        player: Player {
            x: x.clamp(0.0, (state.width - p.width).max(0.0)),
            y: y.clamp(0.0, (state.height - p.height).max(0.0)),
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Fire from the ship's right edge, halfway down, unless still cooling down.
pub fn player_shoot(state: &GameState) -> GameState {
    let p = &state.player;
    if p.shoot_cooldown > 0 {
        return state.clone();
    }

    let mut bullets = p.bullets.clone();
    bullets.push(Bullet::new(p.x + p.width, p.y + p.height / 2.0));
    GameState {
        player: Player {
            bullets,
            shoot_cooldown: SHOOT_COOLDOWN,
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Move, tick the shot cooldown, then fire if asked to.
pub fn step_player(state: &GameState, input: &InputState) -> GameState {
    let mut next = move_player(state, input);
    next.player.shoot_cooldown -= 1;
    if input.fire {
        next = player_shoot(&next);
    }
    next
}

// ── Bullets ──────────────────────────────────────────────────────────────────

pub fn step_bullets(state: &GameState) -> GameState {
    let bullets: Vec<Bullet> = state
        .player
        .bullets
        .iter()
        .map(|b| Bullet {
            x: b.x + b.speed,
            ..b.clone()
        })
        .filter(|b| b.x <= state.width)
        .collect();

    GameState {
        player: Player {
            bullets,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Vertical step toward `target_y`.  Enemies never settle: once level with the
/// player they keep flipping direction every tick.
fn zigzag(enemy_y: f32, target_y: f32) -> f32 {
    if enemy_y < target_y {
        enemy_y + ZIGZAG_SPEED
    } else {
        enemy_y - ZIGZAG_SPEED
    }
}

/// Move every enemy, drop the ones that left the field, then count down to
/// the next spawn.
pub fn step_enemies(state: &GameState, rng: &mut impl Rng) -> GameState {
    let player_y = state.player.y;
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| Enemy {
            x: e.x - e.speed,
            y: zigzag(e.y, player_y),
            ..e.clone()
        })
        .filter(|e| e.x + e.width >= 0.0)
        .collect();

    let mut spawn_cooldown = state.spawn_cooldown - 1;
    if spawn_cooldown <= 0 {
        let y = rng.gen_range(0.0..state.height - ENEMY_SIZE);
        let speed = rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
        log::debug!("enemy spawned at y={y:.1} speed={speed:.2}");
        enemies.push(Enemy::new(state.width, y, speed));
        spawn_cooldown = SPAWN_COOLDOWN;
    }

    GameState {
        enemies,
        spawn_cooldown,
        ..state.clone()
    }
}

// ── Terrain ──────────────────────────────────────────────────────────────────

pub fn step_terrain(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut terrain = state.terrain.clone();
    terrain.scroll(state.height, rng);
    GameState {
        terrain,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ─────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished game is returned as-is: only a reset brings it back.
pub fn tick(
    state: &GameState,
    input: &InputState,
    rng: &mut impl Rng,
) -> (GameState, Option<GameOverCause>) {
    if state.is_over() {
        return (state.clone(), None);
    }

    let next = step_terrain(state, rng);
    let next = step_player(&next, input);
    let next = step_enemies(&next, rng);
    let next = step_bullets(&next);
    let (next, report) = collision::resolve(&next);

    let status = if report.game_over.is_some() {
        GameStatus::GameOver
    } else {
        GameStatus::Running
    };

    let next = GameState {
        status,
        score: next.score + report.kills,
        frame: next.frame + 1,
        ..next
    };
    (next, report.game_over)
}
