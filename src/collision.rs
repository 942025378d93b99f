//! Axis-aligned collision checks between the ship, the ground, enemies and
//! bullets.

use crate::entities::{Bullet, Enemy, GameOverCause, GameState, Player};
use crate::terrain::{Terrain, STEP};

/// Anything with an axis-aligned bounding box.
pub trait Bounds {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

macro_rules! impl_bounds {
    ($($ty:ty),*) => {$(
        impl Bounds for $ty {
            fn x(&self) -> f32 { self.x }
            fn y(&self) -> f32 { self.y }
            fn width(&self) -> f32 { self.width }
            fn height(&self) -> f32 { self.height }
        }
    )*};
}

impl_bounds!(Player, Enemy, Bullet);

/// Strict overlap test: boxes that only share an edge do not collide.
pub fn collides(a: &impl Bounds, b: &impl Bounds) -> bool {
    a.x() < b.x() + b.width()
        && a.x() + a.width() > b.x()
        && a.y() < b.y() + b.height()
        && a.y() + a.height() > b.y()
}

/// First segment whose ground the ship has sunk into, if any.
///
/// Segment `i` spans `[i * STEP, (i + 1) * STEP)` regardless of the current
/// scroll offset.  Only the ground below the ship is tested; there is no
/// ceiling.
pub fn terrain_hit(player: &Player, terrain: &Terrain, field_height: f32) -> Option<usize> {
    let bottom = player.y + player.height;
    terrain.samples().enumerate().find_map(|(i, sample)| {
        let left = i as f32 * STEP;
        let over_segment = player.x < left + STEP && player.x + player.width > left;
        (over_segment && field_height - sample < bottom).then_some(i)
    })
}

/// Outcome of one collision pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub game_over: Option<GameOverCause>,
    /// Enemies destroyed by bullets.
    pub kills: u32,
}

/// Run every collision rule against `state` and return the state with hit
/// enemies and spent bullets removed.
///
/// Each enemy consumes at most one bullet: the first one overlapping it that
/// no earlier enemy has already used.
pub fn resolve(state: &GameState) -> (GameState, CollisionReport) {
    let mut report = CollisionReport::default();

    if let Some(segment) = terrain_hit(&state.player, &state.terrain, state.height) {
        report.game_over = Some(GameOverCause::Terrain { segment });
    }

    let bullets = &state.player.bullets;
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (ei, enemy) in state.enemies.iter().enumerate() {
        if report.game_over.is_none() && collides(&state.player, enemy) {
            report.game_over = Some(GameOverCause::Enemy);
        }

        let hit = bullets
            .iter()
            .enumerate()
            .find(|(bi, bullet)| !used_bullets.contains(bi) && collides(*bullet, enemy));
        if let Some((bi, _)) = hit {
            killed_enemies.push(ei);
            used_bullets.push(bi);
        }
    }

    report.kills = killed_enemies.len() as u32;

    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e.clone())
        .collect();

    let bullets: Vec<Bullet> = bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    let next = GameState {
        player: Player {
            bullets,
            ..state.player.clone()
        },
        enemies,
        ..state.clone()
    };
    (next, report)
}
