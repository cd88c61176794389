//! Per-frame simulation tick
//!
//! Order matters: scoring and speed first, then player actions, spawning,
//! movement, collisions, and finally the off-screen sweep.

use rand::Rng;

use super::collision::check_collisions;
use super::spawn::{SpawnRates, spawn_coin, spawn_obstacle};
use super::state::{GameEvent, GamePhase, World};
use crate::consts::*;
use crate::input::Direction;

/// Advance the world by `dt` seconds.
///
/// Negative deltas are treated as zero. Paused or finished runs are left
/// untouched.
pub fn tick<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    rates: &SpawnRates,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.phase() != GamePhase::Running {
        return events;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    world.scoreboard.advance(dt);
    update_player_actions(world, dt);

    events.extend(spawn_obstacle(world, rng, rates.obstacle));
    events.extend(spawn_coin(world, rng, rates.coin));

    // Obstacles and coins share one scroll speed
    let dy = SCROLL_SPEED * world.scoreboard.speed_multiplier * dt;
    for obstacle in &mut world.obstacles {
        obstacle.body.advance(dy);
    }
    for coin in &mut world.coins {
        coin.body.advance(dy);
    }

    check_collisions(
        &world.player,
        &mut world.obstacles,
        &mut world.coins,
        &mut world.scoreboard,
        &mut events,
    );

    world.cleanup();
    events
}

/// Advance the jump arc and slide timer
pub fn update_player_actions(world: &mut World, dt: f32) {
    let player = &mut world.player;

    if player.jumping {
        world.jump_timer += dt;
        let t = world.jump_timer;
        if t < JUMP_PEAK_TIME {
            player.jump_height = JUMP_MAX * (t / JUMP_PEAK_TIME);
        } else if t < JUMP_DURATION {
            let fall = (t - JUMP_PEAK_TIME) / (JUMP_DURATION - JUMP_PEAK_TIME);
            player.jump_height = JUMP_MAX * (1.0 - fall);
        } else {
            player.jumping = false;
            player.jump_height = 0.0;
            world.jump_timer = 0.0;
        }
    }

    if player.sliding {
        world.slide_timer += dt;
        if world.slide_timer >= SLIDE_DURATION {
            player.sliding = false;
            world.slide_timer = 0.0;
        }
    }
}

/// Apply a lane change or action trigger. No-op unless running.
///
/// Jump and slide exclude each other: neither starts while either is active.
pub fn apply_move(world: &mut World, direction: Direction) {
    if world.phase() != GamePhase::Running {
        return;
    }
    let player = &mut world.player;
    match direction {
        Direction::Left => {
            if player.lane > 0 {
                player.set_lane(player.lane - 1);
            }
        }
        Direction::Right => {
            if player.lane < LANE_COUNT - 1 {
                player.set_lane(player.lane + 1);
            }
        }
        Direction::Up => {
            if player.is_idle() {
                player.jumping = true;
                world.jump_timer = 0.0;
            }
        }
        Direction::Down => {
            if player.is_idle() {
                player.sliding = true;
                world.slide_timer = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Obstacle, ObstacleKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const NO_SPAWNS: SpawnRates = SpawnRates {
        obstacle: 0.0,
        coin: 0.0,
    };

    fn quiet_tick(world: &mut World, dt: f32) -> Vec<GameEvent> {
        let mut rng = Pcg32::seed_from_u64(1);
        tick(world, &mut rng, &NO_SPAWNS, dt)
    }

    #[test]
    fn test_jump_profile() {
        let mut world = World::default();
        apply_move(&mut world, Direction::Up);
        assert!(world.player.jumping);
        assert_eq!(world.player.jump_height, 0.0);

        update_player_actions(&mut world, 0.25);
        assert!((world.player.jump_height - 40.0).abs() < 1e-4);
        update_player_actions(&mut world, 0.25);
        assert!((world.player.jump_height - 80.0).abs() < 1e-4);
        update_player_actions(&mut world, 0.25);
        assert!((world.player.jump_height - 40.0).abs() < 1e-4);
        assert!(world.player.jumping);

        update_player_actions(&mut world, 0.25);
        assert!(!world.player.jumping);
        assert_eq!(world.player.jump_height, 0.0);
        assert_eq!(world.jump_timer, 0.0);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut world = World::default();
        apply_move(&mut world, Direction::Up);
        update_player_actions(&mut world, 0.4);
        apply_move(&mut world, Direction::Up);
        assert!((world.jump_timer - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_jump_and_slide_exclusive() {
        let mut world = World::default();
        apply_move(&mut world, Direction::Down);
        apply_move(&mut world, Direction::Up);
        assert!(world.player.sliding);
        assert!(!world.player.jumping);

        let mut world = World::default();
        apply_move(&mut world, Direction::Up);
        apply_move(&mut world, Direction::Down);
        assert!(world.player.jumping);
        assert!(!world.player.sliding);
    }

    #[test]
    fn test_slide_duration() {
        let mut world = World::default();
        apply_move(&mut world, Direction::Down);
        update_player_actions(&mut world, 0.5);
        update_player_actions(&mut world, 0.25);
        assert!(world.player.sliding);
        update_player_actions(&mut world, 0.25);
        assert!(!world.player.sliding);
        assert_eq!(world.slide_timer, 0.0);
    }

    #[test]
    fn test_lane_bounds() {
        let mut world = World::default();
        apply_move(&mut world, Direction::Left);
        assert_eq!(world.player.lane, 0);
        assert_eq!(world.player.body.pos.x, 150.0);
        apply_move(&mut world, Direction::Left);
        assert_eq!(world.player.lane, 0);

        apply_move(&mut world, Direction::Right);
        apply_move(&mut world, Direction::Right);
        assert_eq!(world.player.lane, 2);
        assert_eq!(world.player.body.pos.x, 450.0);
        apply_move(&mut world, Direction::Right);
        assert_eq!(world.player.lane, 2);
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut world = World::default();
        world.obstacles.push(Obstacle::new(ObstacleKind::Tree, 0));
        world.scoreboard.paused = true;
        let before = world.clone();

        quiet_tick(&mut world, 0.5);
        apply_move(&mut world, Direction::Left);
        apply_move(&mut world, Direction::Up);

        assert_eq!(world.player, before.player);
        assert_eq!(world.scoreboard, before.scoreboard);
        assert_eq!(world.obstacles, before.obstacles);
    }

    #[test]
    fn test_negative_dt_is_zero() {
        let mut world = World::default();
        world.obstacles.push(Obstacle::new(ObstacleKind::Rock, 0));
        quiet_tick(&mut world, -1.0);
        assert_eq!(world.scoreboard.distance, 0);
        assert_eq!(world.obstacles[0].body.pos.y, -50.0);
    }

    #[test]
    fn test_objects_scroll_together() {
        let mut world = World::default();
        world.obstacles.push(Obstacle::new(ObstacleKind::Rock, 0));
        world.coins.push(Coin::new(2));
        quiet_tick(&mut world, 0.1);
        // Uses the multiplier from this tick's speed update
        let expected = -50.0 + 300.0 * world.scoreboard.speed_multiplier * 0.1;
        assert!((world.obstacles[0].body.pos.y - expected).abs() < 1e-3);
        assert!((world.coins[0].body.pos.y - (expected + 20.0)).abs() < 1e-3);
    }

    #[test]
    fn test_off_screen_swept_same_tick() {
        let mut world = World::default();
        let mut obstacle = Obstacle::new(ObstacleKind::Pit, 0);
        obstacle.body.pos.y = 595.0;
        world.obstacles.push(obstacle);
        quiet_tick(&mut world, 0.1);
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_incoming_pit_costs_a_life() {
        let mut world = World::default();
        let mut obstacle = Obstacle::new(ObstacleKind::Pit, 1);
        obstacle.body.pos.y = 300.0;
        world.obstacles.push(obstacle);

        let events = quiet_tick(&mut world, 0.1);
        assert_eq!(world.scoreboard.lives, 2);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::ObstacleHit { lives_left: 2, .. }))
        );
        // Inactive but still stored until it scrolls away
        assert_eq!(world.obstacles.len(), 1);
        assert!(!world.obstacles[0].body.active);
    }

    #[test]
    fn test_speed_multiplier_monotonic_and_capped() {
        let mut world = World::default();
        let mut last = world.scoreboard.speed_multiplier;
        for _ in 0..400 {
            quiet_tick(&mut world, 1.0);
            assert!(world.scoreboard.speed_multiplier >= last);
            last = world.scoreboard.speed_multiplier;
        }
        assert!(world.scoreboard.distance >= 20_000);
        assert_eq!(world.scoreboard.speed_multiplier, 3.0);
    }

    #[test]
    fn test_game_over_freezes_score() {
        let mut world = World::default();
        world.scoreboard.lives = 1;
        let mut obstacle = Obstacle::new(ObstacleKind::Tree, 1);
        obstacle.body.pos.y = 350.0;
        world.obstacles.push(obstacle);

        let events = quiet_tick(&mut world, 0.05);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(world.phase(), GamePhase::GameOver);

        let score = world.scoreboard.score;
        let distance = world.scoreboard.distance;
        quiet_tick(&mut world, 1.0);
        assert_eq!(world.scoreboard.score, score);
        assert_eq!(world.scoreboard.distance, distance);
    }
}
