//! Jump Math - a side-scrolling platformer gated by multiplication puzzles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, puzzle gate)
//! - `renderer`: Draw list construction and the WebGPU pipeline
//! - `theme`: Per-theme palettes and cosmetic subtype tables
//! - `ui`: HUD / modal text formatting
//! - `audio`: Procedural sound effects (Web Audio)
//! - `settings`: Persisted menu choices

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod theme;
pub mod ui;

pub use error::{PuzzleError, RenderError};
pub use settings::Settings;
pub use theme::Theme;

/// Game configuration constants
///
/// Physics values are per tick (one display refresh), not per second.
pub mod consts {
    /// Downward acceleration added to velY every tick
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied by a jump
    pub const JUMP_FORCE: f32 = -14.0;
    /// Horizontal speed while a direction is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Per-tick velX multiplier when no direction is held (skid)
    pub const SKID_DECAY: f32 = 0.8;

    /// Height of the ground band at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 80.0;
    /// Grass strip drawn on top of the ground band
    pub const GROUND_TOP_HEIGHT: f32 = 20.0;

    /// World scroll per tick
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Decorations scroll at this fraction of SCROLL_SPEED
    pub const PARALLAX_FACTOR: f32 = 0.5;

    /// Spawn periods (ticks)
    pub const COIN_SPAWN_RATE: u64 = 120;
    pub const OBSTACLE_SPAWN_RATE: u64 = 180;
    pub const PLATFORM_SPAWN_RATE: u64 = 250;
    pub const DECORATION_SPAWN_RATE: u64 = 200;
    /// New entities appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Delay between answering a puzzle and the simulation resuming (seconds)
    pub const PUZZLE_FEEDBACK_SECS: f64 = 0.3;
    /// A score strictly below this ends the run
    pub const GAME_OVER_SCORE: i32 = -5;
    /// Largest operand magnitude; any product of two stays inside i32
    pub const MAX_OPERAND: i32 = 46_340;
}
