//! Procedural spawning
//!
//! Each entity family spawns on a fixed tick period. New entities appear
//! just past the right edge; subtypes come from the run's theme.

use std::f32::consts::TAU;

use rand::Rng;

use super::entities::{Coin, Decoration, DecorationKind, Obstacle, ObstacleKind, Platform};
use super::state::World;
use crate::consts::*;

/// Chance a coin is placed above an existing platform
const COIN_ON_PLATFORM_CHANCE: f64 = 0.4;
/// Only platforms right of this fraction of the width can anchor a coin
const COIN_ANCHOR_MIN_X_FRACTION: f32 = 0.3;
/// Coin height above the platform or ground it belongs to
const COIN_LIFT: f32 = 30.0;
const FREE_COIN_BASE_HEIGHT: f32 = 70.0;
const FREE_COIN_HEIGHT_JITTER: f32 = 50.0;

const PLATFORM_MIN_WIDTH: f32 = 80.0;
const PLATFORM_WIDTH_JITTER: f32 = 60.0;
const PLATFORM_HEIGHTS: [f32; 3] = [120.0, 160.0, 200.0];
const PLATFORM_BONUS_COIN_CHANCE: f64 = 0.7;

const DYNAMIC_OBSTACLE_CHANCE: f64 = 0.4;
const DYNAMIC_OBSTACLE_SIZE: f32 = 40.0;
const DYNAMIC_OBSTACLE_LIFT: f32 = 40.0;
const DYNAMIC_OBSTACLE_LIFT_JITTER: f32 = 40.0;
const DYNAMIC_OBSTACLE_CLEARANCE: f32 = 20.0;
const STATIC_OBSTACLE_MIN_WIDTH: f32 = 40.0;
const STATIC_OBSTACLE_WIDTH_JITTER: f32 = 30.0;
const STATIC_OBSTACLE_MIN_HEIGHT: f32 = 30.0;
const STATIC_OBSTACLE_HEIGHT_JITTER: f32 = 40.0;

/// Run every spawn family whose period divides the frame counter
pub fn run_schedule(world: &mut World) {
    let frame = world.frame_count;
    if frame % COIN_SPAWN_RATE == 0 {
        spawn_coin(world);
    }
    if frame % OBSTACLE_SPAWN_RATE == 0 {
        spawn_obstacle(world);
    }
    if frame % PLATFORM_SPAWN_RATE == 0 {
        spawn_platform(world);
    }
    if frame % DECORATION_SPAWN_RATE == 0 {
        spawn_decoration(world);
    }
}

pub fn spawn_coin(world: &mut World) {
    let min_anchor_x = world.viewport.width * COIN_ANCHOR_MIN_X_FRACTION;
    let phase = world.rng.random::<f32>() * TAU;

    if world.rng.random_bool(COIN_ON_PLATFORM_CHANCE) && !world.platforms.is_empty() {
        let anchors: Vec<&Platform> = world
            .platforms
            .iter()
            .filter(|p| p.pos.x > min_anchor_x)
            .collect();
        if !anchors.is_empty() {
            let platform = anchors[world.rng.random_range(0..anchors.len())];
            let coin = Coin::new(
                platform.pos.x + platform.width / 2.0,
                platform.pos.y - COIN_LIFT,
                phase,
            );
            world.coins.push(coin);
            return;
        }
    }

    let y = world.viewport.ground_y()
        - FREE_COIN_BASE_HEIGHT
        - world.rng.random::<f32>() * FREE_COIN_HEIGHT_JITTER;
    world.coins.push(Coin::new(world.viewport.spawn_x(), y, phase));
}

pub fn spawn_platform(world: &mut World) {
    let x = world.viewport.spawn_x();
    let width = PLATFORM_MIN_WIDTH + world.rng.random::<f32>() * PLATFORM_WIDTH_JITTER;
    let lift = PLATFORM_HEIGHTS[world.rng.random_range(0..PLATFORM_HEIGHTS.len())];
    let y = world.viewport.ground_y() - lift;
    world.platforms.push(Platform::new(x, y, width));

    if world.rng.random_bool(PLATFORM_BONUS_COIN_CHANCE) {
        let phase = world.rng.random::<f32>() * TAU;
        world
            .coins
            .push(Coin::new(x + width / 2.0, y - COIN_LIFT, phase));
    }
}

pub fn spawn_obstacle(world: &mut World) {
    let x = world.viewport.spawn_x();
    let ground_y = world.viewport.ground_y();
    let theme = world.theme();

    let obstacle = if world.rng.random_bool(DYNAMIC_OBSTACLE_CHANCE) {
        let names = theme.dynamic_obstacle_types();
        let name = names[world.rng.random_range(0..names.len())];
        let y = ground_y
            - DYNAMIC_OBSTACLE_LIFT
            - world.rng.random::<f32>() * DYNAMIC_OBSTACLE_LIFT_JITTER
            - DYNAMIC_OBSTACLE_CLEARANCE;
        Obstacle::new_dynamic(
            x,
            y,
            DYNAMIC_OBSTACLE_SIZE,
            DYNAMIC_OBSTACLE_SIZE,
            ObstacleKind::from_name_or_generic(name, true),
        )
    } else {
        let width =
            STATIC_OBSTACLE_MIN_WIDTH + world.rng.random::<f32>() * STATIC_OBSTACLE_WIDTH_JITTER;
        let height =
            STATIC_OBSTACLE_MIN_HEIGHT + world.rng.random::<f32>() * STATIC_OBSTACLE_HEIGHT_JITTER;
        Obstacle::new_static(
            x,
            ground_y - height,
            width,
            height,
            ObstacleKind::from_name_or_generic(theme.static_obstacle_type(), false),
        )
    };
    world.obstacles.push(obstacle);
}

pub fn spawn_decoration(world: &mut World) {
    let names = world.theme().decoration_types();
    let name = names[world.rng.random_range(0..names.len())];
    let phase = world.rng.random::<f32>() * TAU;
    world.decorations.push(Decoration::new(
        world.viewport.spawn_x(),
        DecorationKind::from_name_or_generic(name),
        phase,
    ));
}
