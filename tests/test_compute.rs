use scroll_shooter::compute::*;
use scroll_shooter::config::GameConfig;
use scroll_shooter::entities::*;
use scroll_shooter::input::InputState;
use scroll_shooter::terrain::Terrain;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Flat low ground, no spawn for a long while.
fn make_state() -> GameState {
    GameState {
        player: Player::default(),
        enemies: Vec::new(),
        terrain: Terrain::from_samples(vec![60.0; 81]),
        spawn_cooldown: 1000,
        status: GameStatus::Running,
        score: 0,
        frame: 0,
        width: 800.0,
        height: 600.0,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn held(f: impl FnOnce(&mut InputState)) -> InputState {
    let mut input = InputState::default();
    f(&mut input);
    input
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(800.0, 600.0, &mut seeded_rng());
    assert_eq!((s.player.x, s.player.y), (50.0, 0.0));
    assert_eq!(s.player.shoot_cooldown, 0);
}

#[test]
fn init_state_counters_and_collections() {
    let s = init_state(800.0, 600.0, &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert!(s.player.bullets.is_empty());
    assert_eq!(s.spawn_cooldown, 60);
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn init_state_generates_terrain_window() {
    let s = init_state(800.0, 600.0, &mut seeded_rng());
    assert_eq!(s.terrain.len(), 81);
    assert_eq!(s.terrain.sample(0), Some(240.0));
    assert_eq!(s.terrain.offset(), 0.0);
    assert_eq!((s.width, s.height), (800.0, 600.0));
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_each_direction() {
    let mut s = make_state();
    s.player.x = 100.0;
    s.player.y = 100.0;

    assert_eq!(move_player(&s, &held(|i| i.left = true)).player.x, 95.0);
    assert_eq!(move_player(&s, &held(|i| i.right = true)).player.x, 105.0);
    assert_eq!(move_player(&s, &held(|i| i.up = true)).player.y, 95.0);
    assert_eq!(move_player(&s, &held(|i| i.down = true)).player.y, 105.0);
}

#[test]
fn diagonal_is_full_speed_on_both_axes() {
    let mut s = make_state();
    s.player.x = 100.0;
    s.player.y = 100.0;
    let input = held(|i| {
        i.right = true;
        i.down = true;
    });
    let s2 = move_player(&s, &input);
    assert_eq!((s2.player.x, s2.player.y), (105.0, 105.0));
}

#[test]
fn opposite_directions_cancel() {
    let mut s = make_state();
    s.player.x = 100.0;
    let input = held(|i| {
        i.left = true;
        i.right = true;
    });
    assert_eq!(move_player(&s, &input).player.x, 100.0);
}

#[test]
fn move_clamps_to_field() {
    let mut s = make_state();
    s.player.x = 2.0;
    s.player.y = 2.0;
    let s2 = move_player(&s, &held(|i| {
        i.left = true;
        i.up = true;
    }));
    assert_eq!((s2.player.x, s2.player.y), (0.0, 0.0));

    s.player.x = 768.0;
    s.player.y = 568.0;
    let s3 = move_player(&s, &held(|i| {
        i.right = true;
        i.down = true;
    }));
    assert_eq!((s3.player.x, s3.player.y), (770.0, 570.0));
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player(&s, &held(|i| i.right = true));
    assert_eq!(s.player.x, 50.0);
}

proptest! {
    #[test]
    fn player_stays_in_field(moves in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 0..300)) {
        let mut s = make_state();
        for (up, down, left, right) in moves {
            let input = InputState { up, down, left, right, fire: false };
            s = move_player(&s, &input);
            prop_assert!(s.player.x >= 0.0 && s.player.x <= s.width - s.player.width);
            prop_assert!(s.player.y >= 0.0 && s.player.y <= s.height - s.player.height);
        }
    }
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shoot_from_right_centre_edge() {
    let s = make_state();
    let s2 = player_shoot(&s);
    assert_eq!(s2.player.bullets.len(), 1);
    let b = &s2.player.bullets[0];
    assert_eq!((b.x, b.y), (80.0, 15.0));
    assert_eq!(b.speed, 8.0);
    assert_eq!(s2.player.shoot_cooldown, 10);
}

#[test]
fn shoot_blocked_while_cooling_down() {
    let mut s = make_state();
    s.player.shoot_cooldown = 1;
    let s2 = player_shoot(&s);
    assert!(s2.player.bullets.is_empty());
    assert_eq!(s2.player.shoot_cooldown, 1);
}

#[test]
fn shoot_allowed_with_negative_cooldown() {
    let mut s = make_state();
    s.player.shoot_cooldown = -7;
    assert_eq!(player_shoot(&s).player.bullets.len(), 1);
}

#[test]
fn step_player_decrements_cooldown_without_fire() {
    let s = make_state();
    let s2 = step_player(&s, &InputState::default());
    assert_eq!(s2.player.shoot_cooldown, -1);
    assert!(s2.player.bullets.is_empty());
}

#[test]
fn holding_fire_for_ten_ticks_fires_once() {
    let fire = held(|i| i.fire = true);
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..10 {
        s = tick(&s, &fire, &mut rng).0;
    }
    assert_eq!(s.player.bullets.len(), 1);

    // The eleventh tick brings the cooldown back to zero
    s = tick(&s, &fire, &mut rng).0;
    assert_eq!(s.player.bullets.len(), 2);
}

// ── bullets ───────────────────────────────────────────────────────────────────

#[test]
fn bullets_advance_by_speed() {
    let mut s = make_state();
    s.player.bullets.push(Bullet::new(100.0, 50.0));
    let s2 = step_bullets(&s);
    assert_eq!(s2.player.bullets[0].x, 108.0);
    assert_eq!(s2.player.bullets[0].y, 50.0);
}

#[test]
fn bullet_leaving_right_edge_is_removed() {
    let mut s = make_state();
    s.player.bullets.push(Bullet::new(799.5, 50.0)); // → 807.5, gone
    s.player.bullets.push(Bullet::new(792.0, 80.0)); // → 800.0, still on the edge
    let s2 = step_bullets(&s);
    assert_eq!(s2.player.bullets.len(), 1);
    assert_eq!(s2.player.bullets[0].y, 80.0);
}

// ── enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_left_by_its_speed() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(500.0, 100.0, 3.0));
    let s2 = step_enemies(&s, &mut seeded_rng());
    assert_eq!(s2.enemies[0].x, 497.0);
}

#[test]
fn enemy_zigzags_toward_player() {
    let mut s = make_state();
    s.player.y = 200.0;
    s.enemies.push(Enemy::new(500.0, 100.0, 2.0)); // above → down
    s.enemies.push(Enemy::new(500.0, 300.0, 2.0)); // below → up
    s.enemies.push(Enemy::new(500.0, 200.0, 2.0)); // level → up
    let s2 = step_enemies(&s, &mut seeded_rng());
    assert_eq!(s2.enemies[0].y, 102.0);
    assert_eq!(s2.enemies[1].y, 298.0);
    assert_eq!(s2.enemies[2].y, 198.0);
}

#[test]
fn enemy_oscillates_around_player_row() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player.y = 100.0;
    s.enemies.push(Enemy::new(500.0, 99.0, 2.0));
    s = step_enemies(&s, &mut rng);
    assert_eq!(s.enemies[0].y, 101.0);
    s = step_enemies(&s, &mut rng);
    assert_eq!(s.enemies[0].y, 99.0);
    s = step_enemies(&s, &mut rng);
    assert_eq!(s.enemies[0].y, 101.0);
}

#[test]
fn enemy_purged_once_right_edge_passes_zero() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(-28.0, 100.0, 3.0)); // right edge → -1
    s.enemies.push(Enemy::new(-27.0, 300.0, 3.0)); // right edge → 0
    let s2 = step_enemies(&s, &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, -30.0);
}

#[test]
fn enemy_spawns_when_cooldown_expires() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.spawn_cooldown = 60;
    for _ in 0..59 {
        s = step_enemies(&s, &mut rng);
    }
    assert!(s.enemies.is_empty());
    assert_eq!(s.spawn_cooldown, 1);

    s = step_enemies(&s, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.spawn_cooldown, 60);

    let e = &s.enemies[0];
    assert_eq!(e.x, 800.0);
    assert!(e.y >= 0.0 && e.y < 570.0);
    assert!(e.speed >= 2.0 && e.speed < 5.0);
}

#[test]
fn first_enemy_arrives_after_sixty_ticks() {
    let mut rng = seeded_rng();
    let mut s = init_state(800.0, 600.0, &mut rng);
    let idle = InputState::default();
    for _ in 0..59 {
        s = tick(&s, &idle, &mut rng).0;
    }
    assert!(s.enemies.is_empty());
    s = tick(&s, &idle, &mut rng).0;
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.status, GameStatus::Running);
}

// ── terrain ───────────────────────────────────────────────────────────────────

#[test]
fn step_terrain_shifts_offset() {
    let s = make_state();
    let s2 = step_terrain(&s, &mut seeded_rng());
    assert_eq!(s2.terrain.offset(), -1.0);
    assert_eq!(s.terrain.offset(), 0.0);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    let (s2, cause) = tick(&s, &InputState::default(), &mut seeded_rng());
    assert_eq!(s2.frame, 6);
    assert_eq!(cause, None);
}

#[test]
fn tick_bullet_destroys_enemy() {
    // Enemy → (298, 98); bullet → (298, 110)
    let mut s = make_state();
    s.enemies.push(Enemy::new(300.0, 100.0, 2.0));
    s.player.bullets.push(Bullet::new(290.0, 110.0));
    let (s2, cause) = tick(&s, &InputState::default(), &mut seeded_rng());
    assert!(s2.enemies.is_empty());
    assert!(s2.player.bullets.is_empty());
    assert_eq!(s2.score, 1);
    assert_eq!(cause, None);
}

#[test]
fn tick_enemy_contact_ends_game() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(60.0, 10.0, 2.0));
    let (s2, cause) = tick(&s, &InputState::default(), &mut seeded_rng());
    assert_eq!(cause, Some(GameOverCause::Enemy));
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn tick_ground_contact_ends_game() {
    let mut s = make_state();
    s.player.y = 560.0; // bottom 590, ground at 540
    let (s2, cause) = tick(&s, &InputState::default(), &mut seeded_rng());
    assert!(matches!(cause, Some(GameOverCause::Terrain { .. })));
    assert!(s2.is_over());
}

#[test]
fn tick_is_inert_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.player.bullets.push(Bullet::new(100.0, 50.0));
    let (s2, cause) = tick(&s, &held(|i| i.right = true), &mut seeded_rng());
    assert_eq!(cause, None);
    assert_eq!(s2.frame, 0);
    assert_eq!(s2.player.x, 50.0);
    assert_eq!(s2.player.bullets[0].x, 100.0);
    assert_eq!(s2.terrain, s.terrain);
}

#[test]
fn tick_is_deterministic_for_a_seed() {
    let input = held(|i| {
        i.down = true;
        i.fire = true;
    });
    let run = || {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = init_state(800.0, 600.0, &mut rng);
        for _ in 0..120 {
            s = tick(&s, &input, &mut rng).0;
        }
        s
    };
    let a = run();
    let b = run();
    assert_eq!(a.player, b.player);
    assert_eq!(a.enemies, b.enemies);
    assert_eq!(a.terrain, b.terrain);
    assert_eq!(a.status, b.status);
}

#[test]
fn smallest_valid_field_runs_without_panicking() {
    let c = GameConfig::from_json(r#"{ "field_width": 30, "field_height": 31 }"#).unwrap();
    let everything = InputState {
        up: true,
        down: true,
        left: true,
        right: true,
        fire: true,
    };
    let right_down = held(|i| {
        i.right = true;
        i.down = true;
        i.fire = true;
    });

    let mut rng = seeded_rng();
    let mut s = init_state(c.field_width, c.field_height, &mut rng);
    for n in 0..400 {
        if s.is_over() {
            s = init_state(c.field_width, c.field_height, &mut rng);
        }
        let input = if n % 2 == 0 { &everything } else { &right_down };
        s = tick(&s, input, &mut rng).0;
        assert!(s.player.x >= 0.0 && s.player.x <= s.width - s.player.width);
        assert!(s.player.y >= 0.0 && s.player.y <= s.height - s.player.height);
    }
}

#[test]
fn move_player_on_a_field_narrower_than_the_ship_pins_to_origin() {
    let mut s = make_state();
    s.width = 20.0;
    s.height = 20.0;
    let s2 = move_player(&s, &held(|i| i.right = true));
    assert_eq!((s2.player.x, s2.player.y), (0.0, 0.0));
}
