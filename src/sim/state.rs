//! World state and run configuration
//!
//! One `World` per session: created on start, dropped on quit/retry. All
//! gameplay state, the pending puzzle included, lives here so nothing
//! outlives the session it belongs to.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Coin, Decoration, Obstacle, Platform, Player};
use super::puzzle::{PendingPuzzle, PuzzleKind};
use crate::consts::{GROUND_HEIGHT, MAX_OPERAND};
use crate::theme::Theme;

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top of the ground band
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// X where new entities appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.width + crate::consts::SPAWN_MARGIN
    }
}

/// How a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Count down from the time limit; the run ends at zero
    #[default]
    Timed,
    /// Count up; the run is won on reaching the target score
    Target,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Timed => "timed",
            RunMode::Target => "target",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "timed" => Some(RunMode::Timed),
            "target" => Some(RunMode::Target),
            _ => None,
        }
    }
}

/// Options read once when a run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Multiplication operand bounds (inclusive)
    pub math_min: i32,
    pub math_max: i32,
    pub mode: RunMode,
    /// Timed mode limit in seconds
    pub time_limit_secs: u32,
    /// Target mode score to reach
    pub target_score: i32,
    pub theme: Theme,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            math_min: 1,
            math_max: 12,
            mode: RunMode::Timed,
            time_limit_secs: 120,
            target_score: 10,
            theme: Theme::Forest,
        }
    }
}

impl RunConfig {
    /// Swap inverted bounds, clamp operands to `±MAX_OPERAND` and lift
    /// degenerate limits to 1
    pub fn normalized(mut self) -> Self {
        self.math_min = self.math_min.clamp(-MAX_OPERAND, MAX_OPERAND);
        self.math_max = self.math_max.clamp(-MAX_OPERAND, MAX_OPERAND);
        if self.math_min > self.math_max {
            std::mem::swap(&mut self.math_min, &mut self.math_max);
        }
        self.time_limit_secs = self.time_limit_secs.max(1);
        self.target_score = self.target_score.max(1);
        self
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances every tick
    Running,
    /// Frozen while a puzzle is open or showing feedback
    Puzzle,
    /// Frozen by the pause menu
    Paused,
    /// Run ended
    GameOver { victory: bool },
}

/// Side effects for the audio and HUD sinks, drained every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    CoinPickup,
    PointEarned,
    PointLost,
    PuzzleOpened(PuzzleKind),
    GameOver { victory: bool },
}

/// Mode clock driven by frame timestamps (seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunClock {
    /// Timed mode: seconds left
    pub time_remaining: f64,
    /// Target mode: seconds since start
    pub time_elapsed: f64,
    /// Timestamp of the last simulated tick
    last_timestamp: Option<f64>,
}

impl RunClock {
    pub fn new(time_limit_secs: u32) -> Self {
        Self {
            time_remaining: time_limit_secs as f64,
            time_elapsed: 0.0,
            last_timestamp: None,
        }
    }

    /// Wall-clock seconds since the previous simulated tick (0 on the first)
    pub fn delta(&mut self, now: f64) -> f64 {
        let delta = match self.last_timestamp {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now);
        delta
    }
}

/// The whole session
#[derive(Debug, Clone)]
pub struct World {
    pub config: RunConfig,
    pub viewport: Viewport,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub platforms: Vec<Platform>,
    pub decorations: Vec<Decoration>,
    /// Simulated ticks since start (spawn schedule)
    pub frame_count: u64,
    pub score: i32,
    pub phase: GamePhase,
    pub clock: RunClock,
    /// The one open puzzle, if any
    pub pending: Option<PendingPuzzle>,
    /// Puzzles triggered while another was open, oldest first
    pub(crate) puzzle_queue: VecDeque<PuzzleKind>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl World {
    pub fn new(config: RunConfig, viewport: Viewport, seed: u64) -> Self {
        let config = config.normalized();
        log::info!(
            "Run start: theme={} mode={} bounds=[{}, {}] seed={}",
            config.theme.id(),
            config.mode.as_str(),
            config.math_min,
            config.math_max,
            seed
        );
        Self {
            clock: RunClock::new(config.time_limit_secs),
            config,
            viewport,
            player: Player::spawn(&viewport),
            coins: Vec::new(),
            obstacles: Vec::new(),
            platforms: Vec::new(),
            decorations: Vec::new(),
            frame_count: 0,
            score: 0,
            phase: GamePhase::Running,
            pending: None,
            puzzle_queue: VecDeque::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// True while the simulation is frozen (puzzle or pause menu)
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Puzzle | GamePhase::Paused)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// `Some(victory)` once the run has ended
    pub fn outcome(&self) -> Option<bool> {
        match self.phase {
            GamePhase::GameOver { victory } => Some(victory),
            _ => None,
        }
    }

    /// Number of puzzles waiting behind the open one
    pub fn queued_puzzles(&self) -> usize {
        self.puzzle_queue.len()
    }

    /// Edge-triggered jump from input. Ignored unless running.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let jumped = self.player.jump();
        if jumped {
            self.emit(GameEvent::Jump);
        }
        jumped
    }

    /// Pause menu. Only a running simulation can be paused.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Canvas resized. The player is re-clamped on its next update.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Take all side effects recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Terminal transition. Queued puzzles are discarded.
    pub(crate) fn end_run(&mut self, victory: bool) {
        if self.is_over() {
            return;
        }
        log::info!(
            "Run over: victory={} score={} frames={}",
            victory,
            self.score,
            self.frame_count
        );
        self.phase = GamePhase::GameOver { victory };
        self.pending = None;
        self.puzzle_queue.clear();
        self.emit(GameEvent::GameOver { victory });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let config = RunConfig {
            math_min: 9,
            math_max: 3,
            ..Default::default()
        }
        .normalized();
        assert_eq!((config.math_min, config.math_max), (3, 9));
    }

    #[test]
    fn test_huge_bounds_are_clamped() {
        let config = RunConfig {
            math_min: 50_000,
            math_max: i32::MIN,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.math_min, -MAX_OPERAND);
        assert_eq!(config.math_max, MAX_OPERAND);
    }

    #[test]
    fn test_new_world() {
        let world = World::new(RunConfig::default(), Viewport::new(800.0, 600.0), 1);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.score, 0);
        assert!(world.pending.is_none());
        assert_eq!(world.clock.time_remaining, 120.0);
        assert_eq!(world.player.pos.y, 600.0 - GROUND_HEIGHT - 60.0);
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut world = World::new(RunConfig::default(), Viewport::new(800.0, 600.0), 1);
        world.pause();
        assert_eq!(world.phase, GamePhase::Paused);
        assert!(world.is_paused());
        world.resume();
        assert_eq!(world.phase, GamePhase::Running);

        world.phase = GamePhase::Puzzle;
        world.pause();
        assert_eq!(world.phase, GamePhase::Puzzle);
        world.resume();
        assert_eq!(world.phase, GamePhase::Puzzle);
    }

    #[test]
    fn test_jump_ignored_when_paused() {
        let mut world = World::new(RunConfig::default(), Viewport::new(800.0, 600.0), 1);
        world.player.on_ground = true;
        world.pause();
        assert!(!world.jump());
        world.resume();
        assert!(world.jump());
        assert_eq!(world.drain_events(), vec![GameEvent::Jump]);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_clock_delta() {
        let mut clock = RunClock::new(60);
        assert_eq!(clock.delta(10.0), 0.0);
        assert_eq!(clock.delta(10.5), 0.5);
        // Timestamps going backwards never refund time
        assert_eq!(clock.delta(10.0), 0.0);
    }

    #[test]
    fn test_end_run_is_terminal() {
        let mut world = World::new(RunConfig::default(), Viewport::new(800.0, 600.0), 1);
        world.end_run(true);
        world.end_run(false);
        assert_eq!(world.outcome(), Some(true));
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::GameOver { victory: true }]
        );
    }

    #[test]
    fn test_run_mode_parse() {
        assert_eq!(RunMode::from_str("Target"), Some(RunMode::Target));
        assert_eq!(RunMode::from_str(RunMode::Timed.as_str()), Some(RunMode::Timed));
        assert_eq!(RunMode::from_str("endless"), None);
    }
}
