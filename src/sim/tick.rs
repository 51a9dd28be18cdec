//! Per-frame simulation tick
//!
//! One call advances the active round by the elapsed wall-clock time:
//! input, timers, spawning, movement, collisions, score/health - in that
//! order. The tick never renders and never plays audio; it reports what
//! happened through `TickEvents` and the frontend reacts.

use glam::Vec2;
use rand::Rng;

use super::collision::{masks_collide, move_axis_separated};
use super::mode::ModeEvent;
use super::state::{Bullet, Enemy, Facing, GameMode, GameState};

/// Input snapshot for one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement axes from the keyboard, each component in [-1, 1]
    pub move_dir: Vec2,
    /// Pointer position in world coordinates; the player aims at it
    pub aim_point: Vec2,
    /// Fire button level. Held fire re-fires every time the cooldown
    /// lapses, not only on the press edge.
    pub fire_held: bool,
}

/// Everything a tick did that the frontend may want to draw or play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Enemies created by the spawner
    pub spawned: u32,
    /// Shots fired
    pub shots: u32,
    /// Bullets that hit at least one enemy
    pub impacts: u32,
    /// Enemies destroyed
    pub kills: u32,
    /// Contact damage was applied
    pub hurt: bool,
    /// Health reached zero; the mode moved to GameOver
    pub died: bool,
}

/// Advance the round by `dt` seconds of wall-clock time
///
/// No-op outside `Playing`. `dt` is clamped to `Config::max_dt`, so physics
/// is frame-rate independent only up to that bound.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickEvents {
    let mut events = TickEvents::default();
    if state.mode != GameMode::Playing {
        return events;
    }

    let dt = dt.clamp(0.0, state.config.max_dt);
    let dt_ms = dt * 1000.0;
    state.time_ticks += 1;

    apply_aim(state, input);
    advance_timers(state, dt_ms);
    spawn_enemies(state, dt_ms, &mut events);
    fire_weapon(state, input, &mut events);

    move_player(state, input, dt);
    move_bullets(state, dt, dt_ms);
    move_enemies(state, dt);

    resolve_bullet_hits(state, &mut events);
    resolve_contact_damage(state, &mut events);

    // Death check runs after combat so the final hit lands on this tick
    if state.player.health <= 0 {
        events.died = true;
        state.handle_event(ModeEvent::PlayerDied);
    }

    events
}

fn apply_aim(state: &mut GameState, input: &TickInput) {
    let to_pointer = (input.aim_point - state.player.pos).normalize_or_zero();
    if to_pointer != Vec2::ZERO {
        state.player.aim = to_pointer;
    }

    state.player.moving = input.move_dir != Vec2::ZERO;
    if state.player.moving {
        // Dominant axis picks the sprite row
        state.player.facing = if input.move_dir.x.abs() > input.move_dir.y.abs() {
            if input.move_dir.x < 0.0 { Facing::Left } else { Facing::Right }
        } else if input.move_dir.y < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        };
    }
}

fn advance_timers(state: &mut GameState, dt_ms: f32) {
    state.gun_cooldown_ms = (state.gun_cooldown_ms - dt_ms).max(0.0);
    state.player.hurt_cooldown_ms = (state.player.hurt_cooldown_ms - dt_ms).max(0.0);

    let dt = dt_ms / 1000.0;
    if state.player.moving {
        state.player.anim_time += dt;
    } else {
        state.player.anim_time = 0.0;
    }
    for enemy in &mut state.enemies {
        enemy.anim_time += dt;
    }
}

/// Timer-driven spawner: one enemy per elapsed interval, position and type
/// chosen uniformly at random. A long tick can elapse several intervals.
fn spawn_enemies(state: &mut GameState, dt_ms: f32, events: &mut TickEvents) {
    state.spawn_timer_ms += dt_ms;
    while state.spawn_timer_ms >= state.config.spawn_interval_ms {
        state.spawn_timer_ms -= state.config.spawn_interval_ms;

        if let Some(cap) = state.config.max_enemies {
            if state.enemies.len() >= cap {
                continue;
            }
        }

        let point_count = state.round.spawn_points.len();
        let type_count = state.masks.enemy_type_count();
        let pos = state.round.spawn_points[state.rng.random_range(0..point_count)];
        let kind = state.rng.random_range(0..type_count);
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            kind,
            anim_time: 0.0,
        });
        events.spawned += 1;
    }
}

/// Cooldown-gated weapon: fires along the aim direction whenever the fire
/// button is held and the cooldown has lapsed
fn fire_weapon(state: &mut GameState, input: &TickInput, events: &mut TickEvents) {
    if !input.fire_held || state.gun_cooldown_ms > 0.0 {
        return;
    }

    let dir = state.player.aim;
    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        pos: state.player.pos + dir * state.config.bullet_offset,
        dir,
        age_ms: 0.0,
    });
    state.gun_cooldown_ms = state.config.gun_cooldown_ms;
    events.shots += 1;
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let delta = input.move_dir.normalize_or_zero() * state.config.player_speed * dt;
    if delta == Vec2::ZERO {
        return;
    }
    let size = state.player_size();
    state.player.pos =
        move_axis_separated(state.player.pos, size, delta, &state.round.obstacles);
}

fn move_bullets(state: &mut GameState, dt: f32, dt_ms: f32) {
    let speed = state.config.bullet_speed;
    let lifetime = state.config.bullet_lifetime_ms;
    let bounds = state.round.bounds;

    for bullet in &mut state.bullets {
        bullet.pos += bullet.dir * speed * dt;
        bullet.age_ms += dt_ms;
    }
    state.bullets.retain(|b| {
        b.age_ms < lifetime
            && b.pos.x >= bounds.min.x
            && b.pos.x <= bounds.max.x
            && b.pos.y >= bounds.min.y
            && b.pos.y <= bounds.max.y
    });
}

/// Enemies step straight toward the player's current position, each axis
/// resolved against obstacles like the player's own movement
fn move_enemies(state: &mut GameState, dt: f32) {
    let player_pos = state.player.pos;
    let speed = state.config.enemy_speed;
    let fps = state.config.animation_fps;
    let obstacles = &state.round.obstacles;
    let masks = &state.masks;

    for enemy in &mut state.enemies {
        let dir = (player_pos - enemy.pos).normalize_or_zero();
        let mask = masks.enemy_mask(enemy.kind, (enemy.anim_time * fps) as usize);
        let size = Vec2::new(mask.width() as f32, mask.height() as f32);
        enemy.pos = move_axis_separated(enemy.pos, size, dir * speed * dt, obstacles);
    }
}

/// Bullet-enemy resolution: every enemy a bullet overlaps dies and scores;
/// the bullet itself is removed once, after all its hits are processed
fn resolve_bullet_hits(state: &mut GameState, events: &mut TickEvents) {
    let mut dead_enemies: Vec<u32> = Vec::new();
    let mut dead_bullets: Vec<u32> = Vec::new();

    for bullet in &state.bullets {
        let mut hit_any = false;
        for enemy in &state.enemies {
            if dead_enemies.contains(&enemy.id) {
                continue;
            }
            if masks_collide(
                bullet.pos,
                &state.masks.bullet,
                enemy.pos,
                state.enemy_mask(enemy),
            ) {
                dead_enemies.push(enemy.id);
                hit_any = true;
            }
        }
        if hit_any {
            dead_bullets.push(bullet.id);
            events.impacts += 1;
        }
    }

    if dead_enemies.is_empty() {
        return;
    }

    events.kills += dead_enemies.len() as u32;
    state.session.score += dead_enemies.len() as u32 * state.config.kill_score;
    state.enemies.retain(|e| !dead_enemies.contains(&e.id));
    state.bullets.retain(|b| !dead_bullets.contains(&b.id));
}

/// Player-enemy contact: at most one damage event per hurt-cooldown window
/// no matter how many enemies are touching
fn resolve_contact_damage(state: &mut GameState, events: &mut TickEvents) {
    if state.player.hurt_cooldown_ms > 0.0 {
        return;
    }

    let touching = state.enemies.iter().any(|enemy| {
        masks_collide(
            state.player.pos,
            state.player_mask(),
            enemy.pos,
            state.enemy_mask(enemy),
        )
    });
    if touching {
        state.player.health -= 1;
        state.player.hurt_cooldown_ms = state.config.hurt_cooldown_ms;
        events.hurt = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::collision::Aabb;
    use crate::sim::mask::MaskSet;
    use crate::sim::state::RoundSetup;

    const DT: f32 = 0.01; // 10 ms

    fn test_state_with(config: Config) -> GameState {
        let round = RoundSetup {
            player_spawn: Vec2::new(500.0, 500.0),
            spawn_points: vec![Vec2::new(100.0, 100.0)],
            obstacles: Vec::new(),
            bounds: Aabb::from_rect(0.0, 0.0, 2000.0, 2000.0),
        };
        let masks = MaskSet::solid((16, 16), (4, 4), (16, 16), 2);
        let mut state = GameState::new(config, round, masks, 42);
        state.handle_event(ModeEvent::StartPressed);
        state
    }

    fn test_state() -> GameState {
        test_state_with(Config::default())
    }

    fn fire_input(state: &GameState) -> TickInput {
        TickInput {
            aim_point: state.player.pos + Vec2::new(100.0, 0.0),
            fire_held: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_noop_outside_playing() {
        let mut state = test_state();
        state.handle_event(ModeEvent::PauseToggled);
        let before_ticks = state.time_ticks;
        let input = fire_input(&state);
        let events = tick(&mut state, &input, DT);
        assert_eq!(events, TickEvents::default());
        assert_eq!(state.time_ticks, before_ticks);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let mut state = test_state();
        let input = fire_input(&state);

        // Two ticks inside the 100 ms window: exactly one bullet
        tick(&mut state, &input, DT);
        tick(&mut state, &input, DT);
        assert_eq!(state.bullets.len(), 1);

        // Held fire re-fires once the cooldown lapses
        for _ in 0..10 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_spawns_along_aim() {
        let mut state = test_state();
        let input = fire_input(&state);
        let origin = state.player.pos;
        let events = tick(&mut state, &input, DT);
        assert_eq!(events.shots, 1);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.dir, Vec2::new(1.0, 0.0));
        // Spawn offset plus one tick of travel
        let expected_x = origin.x + state.config.bullet_offset + state.config.bullet_speed * DT;
        assert!((bullet.pos.x - expected_x).abs() < 0.01);
        assert_eq!(bullet.pos.y, origin.y);
    }

    #[test]
    fn test_spawner_one_enemy_per_interval() {
        let mut state = test_state();
        let input = TickInput::default();

        // 990 ms: nothing yet
        for _ in 0..99 {
            tick(&mut state, &input, DT);
        }
        assert!(state.enemies.is_empty());

        // Crossing 1000 ms spawns exactly one
        let events = tick(&mut state, &input, DT);
        assert_eq!(events.spawned, 1);
        assert_eq!(state.enemies.len(), 1);
        // Spawned at the map's single spawn point (it takes its first
        // pursuit step the same tick)
        assert!(state.enemies[0].pos.distance(Vec2::new(100.0, 100.0)) < 5.0);

        // Second interval spawns the second
        for _ in 0..100 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_spawner_respects_cap() {
        let mut config = Config::default();
        config.max_enemies = Some(1);
        let mut state = test_state_with(config);
        let input = TickInput::default();
        for _ in 0..500 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_bullet_kills_enemy_and_scores() {
        // Spawn-point scenario: enemy within one tick of bullet travel
        let mut state = test_state();
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: state.player.pos + Vec2::new(60.0, 0.0),
            kind: 0,
            anim_time: 0.0,
        });

        let input = fire_input(&state);
        let events = tick(&mut state, &input, DT);
        assert_eq!(events.kills, 1);
        assert_eq!(events.impacts, 1);
        assert_eq!(state.session.score, 10);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_one_bullet_hits_two_enemies() {
        let mut state = test_state();
        // Two enemies stacked on the bullet's path, both inside the hit
        let base = state.player.pos + Vec2::new(62.0, 0.0);
        for dy in [-4.0, 4.0] {
            let id = state.next_entity_id();
            state.enemies.push(Enemy {
                id,
                pos: base + Vec2::new(0.0, dy),
                kind: 0,
                anim_time: 0.0,
            });
        }

        let input = fire_input(&state);
        let events = tick(&mut state, &input, DT);
        assert_eq!(events.kills, 2);
        assert_eq!(events.impacts, 1);
        assert_eq!(state.session.score, 20);
        assert!(state.enemies.is_empty());
        // The bullet is destroyed exactly once, not leaked
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_contact_damage_once_per_window() {
        let mut state = test_state();
        // Two enemies on top of the player: still a single damage event
        for _ in 0..2 {
            let id = state.next_entity_id();
            state.enemies.push(Enemy {
                id,
                pos: state.player.pos,
                kind: 0,
                anim_time: 0.0,
            });
        }
        // Keep enemies pinned by not moving; they walk toward the player
        // anyway (zero distance).
        let input = TickInput::default();

        let events = tick(&mut state, &input, DT);
        assert!(events.hurt);
        assert_eq!(state.player.health, state.config.max_health - 1);

        // Within the hurt cooldown: no further damage
        let events = tick(&mut state, &input, DT);
        assert!(!events.hurt);
        assert_eq!(state.player.health, state.config.max_health - 1);

        // After the window lapses, the next touch damages again
        for _ in 0..50 {
            tick(&mut state, &input, DT);
        }
        assert!(state.player.health < state.config.max_health - 1);
    }

    #[test]
    fn test_death_transitions_to_game_over() {
        let mut state = test_state();
        state.player.health = 1;
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: state.player.pos,
            kind: 0,
            anim_time: 0.0,
        });

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.hurt);
        assert!(events.died);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.mode, GameMode::GameOver);

        // Further ticks are no-ops; GameOver is entered exactly once
        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(events, TickEvents::default());
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_bullet_expires_by_lifetime() {
        let mut state = test_state();
        let input = fire_input(&state);
        tick(&mut state, &input, DT);
        assert_eq!(state.bullets.len(), 1);
        // Ride out the 1000 ms lifetime (bullet leaves bounds first at
        // default speed, which also removes it)
        for _ in 0..110 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_dt_clamp_bounds_displacement() {
        let mut state = test_state();
        let start = state.player.pos;
        let input = TickInput {
            move_dir: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        // A 10-second stall still only advances one clamped step
        tick(&mut state, &input, 10.0);
        let moved = state.player.pos.x - start.x;
        let max_step = state.config.player_speed * state.config.max_dt;
        assert!(moved <= max_step + 0.001);
    }

    #[test]
    fn test_diagonal_slide_against_wall() {
        let mut state = test_state();
        let px = state.player.pos;
        // Wall immediately to the player's right
        state.round.obstacles.push(Aabb::from_rect(px.x + 10.0, 0.0, 40.0, 2000.0));
        let input = TickInput {
            move_dir: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.player.pos.x, px.x);
        assert!(state.player.pos.y > px.y);
    }

    #[test]
    fn test_enemies_pursue_player() {
        let mut state = test_state();
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(100.0, 100.0),
            kind: 0,
            anim_time: 0.0,
        });
        let before = state.enemies[0].pos.distance(state.player.pos);
        tick(&mut state, &TickInput::default(), DT);
        let after = state.enemies[0].pos.distance(state.player.pos);
        assert!(after < before);
    }

    #[test]
    fn test_determinism_same_seed_same_round() {
        let mut a = test_state();
        let mut b = test_state();
        let input = TickInput {
            move_dir: Vec2::new(0.3, -1.0),
            aim_point: Vec2::new(0.0, 0.0),
            fire_held: true,
        };
        for _ in 0..300 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.session.score, b.session.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
