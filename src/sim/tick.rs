//! Per-frame simulation tick
//!
//! One tick per animation frame. Movement is in pixels per tick; only the
//! mode clock uses wall-clock time, measured from frame timestamps.

use super::collision::intersects;
use super::puzzle::PuzzleKind;
use super::spawner;
use super::state::{GameEvent, GamePhase, RunMode, World};

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Full frame: close a settled puzzle, then advance the world
pub fn frame(world: &mut World, input: &TickInput, now: f64) {
    world.settle_puzzle(now);
    tick(world, input, now);
}

/// Advance the world one tick. A frozen or finished world is left untouched.
pub fn tick(world: &mut World, input: &TickInput, now: f64) {
    if world.phase != GamePhase::Running {
        return;
    }

    world.frame_count += 1;

    // Mode clock. Time spent frozen is charged on the first tick after.
    let delta = world.clock.delta(now);
    match world.config.mode {
        RunMode::Timed => {
            world.clock.time_remaining -= delta;
            if world.clock.time_remaining <= 0.0 {
                world.clock.time_remaining = 0.0;
                world.end_run(false);
                return;
            }
        }
        RunMode::Target => {
            world.clock.time_elapsed += delta;
            if world.score >= world.config.target_score {
                world.end_run(true);
                return;
            }
        }
    }

    world
        .player
        .update(input, &world.platforms, &world.viewport);

    spawner::run_schedule(world);

    world.platforms.iter_mut().for_each(|p| p.update());
    world.platforms.retain(|p| !p.is_off_screen());

    world.coins.iter_mut().for_each(|c| c.update());
    world.coins.retain(|c| c.is_live() && !c.is_off_screen());

    world.obstacles.iter_mut().for_each(|o| o.update());
    world.obstacles.retain(|o| o.is_live() && !o.is_off_screen());

    world.decorations.iter_mut().for_each(|d| d.update());
    world.decorations.retain(|d| !d.is_off_screen());

    check_collisions(world);
}

/// Coins first, then obstacles. Each hit entity goes inert and opens (or
/// queues) one puzzle.
fn check_collisions(world: &mut World) {
    let player = world.player.bounds();
    let frame = world.frame_count;
    let mut hits = Vec::new();

    for coin in world.coins.iter_mut().filter(|c| c.is_live()) {
        if intersects(&player, &coin.bounds(frame)) {
            coin.collected = true;
            hits.push(PuzzleKind::Coin);
        }
    }
    for obstacle in world.obstacles.iter_mut().filter(|o| o.is_live()) {
        if intersects(&player, &obstacle.bounds()) {
            obstacle.hit = true;
            hits.push(PuzzleKind::Obstacle);
        }
    }

    for kind in hits {
        if kind == PuzzleKind::Coin {
            world.emit(GameEvent::CoinPickup);
        }
        world.open_puzzle(kind);
    }
}

/// Demo/headless driver: chase the nearest coin ahead and hop obstacles.
/// Returns the held keys and whether to jump this tick.
pub fn autopilot(world: &World) -> (TickInput, bool) {
    let player = world.player.bounds();
    let center_x = player.center().x;

    let target = world
        .coins
        .iter()
        .filter(|c| c.is_live() && c.pos.x > player.x)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let mut input = TickInput::default();
    if let Some(coin) = target {
        if coin.pos.x > center_x + 10.0 {
            input.right = true;
        } else if coin.pos.x < center_x - 10.0 {
            input.left = true;
        }
    }

    let threat_ahead = world.obstacles.iter().any(|o| {
        o.is_live() && o.pos.x > player.right() && o.pos.x - player.right() < 60.0
    });
    let coin_above = target.is_some_and(|c| {
        (c.pos.x - center_x).abs() < 20.0 && c.pos.y < player.y
    });

    (input, world.player.on_ground && (threat_ahead || coin_above))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::{
        Coin, Decoration, DecorationKind, Obstacle, ObstacleKind, PLAYER_HEIGHT, Platform,
    };
    use crate::sim::state::{RunConfig, Viewport};
    use proptest::prelude::*;

    fn world(config: RunConfig) -> World {
        World::new(config, Viewport::new(800.0, 600.0), 42)
    }

    /// World with the player standing still on the ground at x = 40
    fn grounded_world(config: RunConfig) -> World {
        let mut world = world(config);
        let ground = world.viewport.ground_y();
        world.player.pos.x = 40.0;
        world.player.pos.y = ground - PLAYER_HEIGHT;
        world.player.on_ground = true;
        // Skip the frame-0 spawn burst
        world.frame_count = 1;
        world
    }

    #[test]
    fn test_frozen_world_does_not_advance() {
        let mut w = grounded_world(RunConfig::default());
        w.coins.push(Coin::new(600.0, 200.0, 0.0));
        w.pause();
        tick(&mut w, &TickInput::default(), 0.0);
        tick(&mut w, &TickInput::default(), 5.0);
        assert_eq!(w.frame_count, 1);
        assert_eq!(w.coins[0].pos.x, 600.0);
        assert_eq!(w.clock.time_remaining, 120.0);
    }

    #[test]
    fn test_coin_collision_opens_one_puzzle() {
        let mut w = grounded_world(RunConfig::default());
        let ground = w.viewport.ground_y();
        // Lands at x = 50 after this tick's scroll; player spans [40, 80]
        w.coins
            .push(Coin::new(50.0 + SCROLL_SPEED, ground - PLAYER_HEIGHT / 2.0, 0.0));

        tick(&mut w, &TickInput::default(), 0.0);

        assert!(w.is_paused());
        assert_eq!(w.phase, GamePhase::Puzzle);
        assert_eq!(w.pending.as_ref().map(|p| p.kind), Some(PuzzleKind::Coin));
        assert_eq!(w.queued_puzzles(), 0);
        assert!(w.coins[0].collected);
        assert_eq!(
            w.drain_events(),
            vec![
                GameEvent::CoinPickup,
                GameEvent::PuzzleOpened(PuzzleKind::Coin)
            ]
        );
    }

    #[test]
    fn test_inert_entities_do_not_collide_again() {
        let mut w = grounded_world(RunConfig::default());
        let ground = w.viewport.ground_y();
        let mut coin = Coin::new(50.0 + SCROLL_SPEED, ground - PLAYER_HEIGHT / 2.0, 0.0);
        coin.collected = true;
        w.coins.push(coin);
        let mut obstacle = Obstacle::new_static(45.0, ground - 40.0, 40.0, 40.0, ObstacleKind::Log);
        obstacle.hit = true;
        w.obstacles.push(obstacle);

        tick(&mut w, &TickInput::default(), 0.0);

        assert_eq!(w.phase, GamePhase::Running);
        assert!(w.pending.is_none());
        assert!(w.coins.is_empty());
        assert!(w.obstacles.is_empty());
    }

    #[test]
    fn test_simultaneous_hits_queue_in_order() {
        let mut w = grounded_world(RunConfig::default());
        let ground = w.viewport.ground_y();
        let y = ground - PLAYER_HEIGHT / 2.0;
        w.obstacles.push(Obstacle::new_static(
            50.0 + SCROLL_SPEED,
            ground - 30.0,
            40.0,
            30.0,
            ObstacleKind::Log,
        ));
        w.coins.push(Coin::new(55.0 + SCROLL_SPEED, y, 0.0));
        w.coins.push(Coin::new(60.0 + SCROLL_SPEED, y, 0.0));

        tick(&mut w, &TickInput::default(), 0.0);

        assert_eq!(w.pending.as_ref().map(|p| p.kind), Some(PuzzleKind::Coin));
        assert_eq!(w.queued_puzzles(), 2);

        let answer = w.pending.as_ref().map(|p| p.answer).unwrap_or_default();
        w.submit_answer(&answer.to_string(), 1.0).unwrap();
        frame(&mut w, &TickInput::default(), 1.0 + PUZZLE_FEEDBACK_SECS);
        assert_eq!(w.pending.as_ref().map(|p| p.kind), Some(PuzzleKind::Coin));
        assert_eq!(w.queued_puzzles(), 1);
        assert_eq!(w.score, 1);

        let answer = w.pending.as_ref().map(|p| p.answer).unwrap_or_default();
        w.submit_answer(&answer.to_string(), 2.0).unwrap();
        frame(&mut w, &TickInput::default(), 2.0 + PUZZLE_FEEDBACK_SECS);
        assert_eq!(
            w.pending.as_ref().map(|p| p.kind),
            Some(PuzzleKind::Obstacle)
        );
        assert_eq!(w.queued_puzzles(), 0);
    }

    #[test]
    fn test_timed_run_ends_at_zero() {
        let mut w = grounded_world(RunConfig {
            time_limit_secs: 2,
            ..Default::default()
        });
        tick(&mut w, &TickInput::default(), 100.0);
        tick(&mut w, &TickInput::default(), 101.0);
        assert_eq!(w.clock.time_remaining, 1.0);
        assert_eq!(w.phase, GamePhase::Running);

        tick(&mut w, &TickInput::default(), 103.5);
        assert_eq!(w.clock.time_remaining, 0.0);
        assert_eq!(w.outcome(), Some(false));
        assert!(
            w.drain_events()
                .contains(&GameEvent::GameOver { victory: false })
        );
    }

    #[test]
    fn test_paused_time_is_charged_on_resume() {
        let mut w = grounded_world(RunConfig::default());
        tick(&mut w, &TickInput::default(), 10.0);
        w.pause();
        tick(&mut w, &TickInput::default(), 20.0);
        w.resume();
        tick(&mut w, &TickInput::default(), 30.0);
        assert_eq!(w.clock.time_remaining, 100.0);
    }

    #[test]
    fn test_target_victory_checked_at_tick_start() {
        let mut w = grounded_world(RunConfig {
            mode: RunMode::Target,
            target_score: 3,
            ..Default::default()
        });
        tick(&mut w, &TickInput::default(), 0.0);
        tick(&mut w, &TickInput::default(), 4.0);
        assert_eq!(w.clock.time_elapsed, 4.0);
        assert_eq!(w.phase, GamePhase::Running);

        w.score = 3;
        let frames = w.frame_count;
        tick(&mut w, &TickInput::default(), 5.0);
        assert_eq!(w.outcome(), Some(true));
        assert_eq!(w.frame_count, frames + 1);
    }

    #[test]
    fn test_spawns_follow_frame_counter() {
        let mut w = world(RunConfig::default());
        w.frame_count = COIN_SPAWN_RATE - 1;
        tick(&mut w, &TickInput::default(), 0.0);
        assert_eq!(w.coins.len(), 1);
        assert!((w.coins[0].pos.x - (w.viewport.spawn_x() - SCROLL_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn test_off_screen_entities_are_pruned() {
        let mut w = grounded_world(RunConfig::default());
        w.coins.push(Coin::new(-12.5, 100.0, 0.0));
        w.platforms.push(Platform::new(-80.0, 300.0, 82.0));
        w.obstacles.push(Obstacle::new_static(-40.0, 300.0, 42.0, 30.0, ObstacleKind::Log));
        w.decorations.push(Decoration::new(-99.0, DecorationKind::Tree, 0.0));

        tick(&mut w, &TickInput::default(), 0.0);

        assert!(w.coins.is_empty());
        assert!(w.platforms.is_empty());
        assert!(w.obstacles.is_empty());
        assert!(w.decorations.is_empty());
    }

    #[test]
    fn test_player_rides_platform_under_scroll() {
        let mut w = grounded_world(RunConfig::default());
        w.platforms.push(Platform::new(0.0, 300.0, 200.0));
        w.player.pos.y = 300.0 - PLAYER_HEIGHT - 1.0;
        w.player.vel.y = 1.0;
        w.player.on_ground = false;

        tick(&mut w, &TickInput::default(), 0.0);
        assert!(w.player.on_ground);
        assert_eq!(w.player.pos.y, 300.0 - PLAYER_HEIGHT);
    }

    #[test]
    fn test_autopilot_jumps_obstacles() {
        let mut w = grounded_world(RunConfig::default());
        let ground = w.viewport.ground_y();
        w.obstacles.push(Obstacle::new_static(100.0, ground - 40.0, 40.0, 40.0, ObstacleKind::Log));
        let (_, jump) = autopilot(&w);
        assert!(jump);

        w.obstacles.clear();
        w.coins.push(Coin::new(400.0, ground - 60.0, 0.0));
        let (input, jump) = autopilot(&w);
        assert!(input.right);
        assert!(!jump);
    }

    proptest! {
        #[test]
        fn scrolled_entities_move_left_at_fixed_rates(
            xs in prop::collection::vec(200.0f32..780.0, 1..8),
            seed in any::<u64>(),
        ) {
            let mut w = World::new(RunConfig::default(), Viewport::new(800.0, 600.0), seed);
            w.frame_count = 1;
            for (i, x) in xs.iter().enumerate() {
                w.coins.push(Coin::new(*x, 100.0, i as f32));
                w.platforms.push(Platform::new(*x, 200.0, 80.0));
                w.obstacles.push(Obstacle::new_static(*x, 50.0, 40.0, 30.0, ObstacleKind::Log));
                w.decorations.push(Decoration::new(*x, DecorationKind::Bush, 0.0));
            }

            tick(&mut w, &TickInput::default(), 0.0);

            for (i, x) in xs.iter().enumerate() {
                prop_assert_eq!(w.coins[i].pos.x, *x - SCROLL_SPEED);
                prop_assert_eq!(w.platforms[i].pos.x, *x - SCROLL_SPEED);
                prop_assert_eq!(w.obstacles[i].pos.x, *x - SCROLL_SPEED);
                prop_assert_eq!(w.decorations[i].x, *x - SCROLL_SPEED * PARALLAX_FACTOR);
            }
        }

        #[test]
        fn player_stays_inside_viewport(
            seed in any::<u64>(),
            keys in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut w = World::new(RunConfig::default(), Viewport::new(640.0, 480.0), seed);
            let mut now = 0.0;
            for (left, right, jump) in keys {
                if let Some(answer) = w.pending.as_ref().map(|p| p.answer) {
                    let _ = w.submit_answer(&answer.to_string(), now);
                }
                if jump {
                    w.jump();
                }
                frame(&mut w, &TickInput { left, right }, now);
                now += 1.0 / 60.0;

                let x = w.player.pos.x;
                prop_assert!(x >= 0.0 && x <= w.viewport.width - 40.0);
                prop_assert!(w.player.pos.y + PLAYER_HEIGHT <= w.viewport.ground_y() + 1e-3);
            }
        }
    }
}
