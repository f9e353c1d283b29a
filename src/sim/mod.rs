//! Gameplay simulation
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! audio or GPU; side effects leave through `World::drain_events`.
//! - Movement is per tick, the mode clock is per wall-clock second
//! - One seeded RNG per world
//! - Entity lists are updated in insertion order

pub mod collision;
pub mod entities;
pub mod puzzle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use entities::{
    Coin, Decoration, DecorationKind, Obstacle, ObstacleKind, ObstacleMotion, Platform, Player,
    COIN_RADIUS, PLAYER_HEIGHT, PLAYER_WIDTH,
};
pub use puzzle::{PendingPuzzle, PuzzleKind, PuzzleStatus, Verdict, parse_answer};
pub use state::{GameEvent, GamePhase, RunClock, RunConfig, RunMode, Viewport, World};
pub use tick::{TickInput, autopilot, frame, tick};
