//! HUD and modal text
//!
//! Pure formatting for the DOM sinks, so the strings can be tested without
//! a browser.

use crate::consts::GAME_OVER_SCORE;
use crate::sim::{PuzzleKind, RunClock, RunConfig, RunMode, World};

const TIMER_PREFIX: &str = "⏱️";

/// `m:ss`
pub fn format_time(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Whole seconds the HUD shows: ceil(remaining) counting down, floor(elapsed)
/// counting up
pub fn display_seconds(clock: &RunClock, mode: RunMode) -> u64 {
    match mode {
        RunMode::Timed => clock.time_remaining.ceil().max(0.0) as u64,
        RunMode::Target => clock.time_elapsed.floor().max(0.0) as u64,
    }
}

pub fn timer_text(clock: &RunClock, mode: RunMode) -> String {
    format!("{} {}", TIMER_PREFIX, format_time(display_seconds(clock, mode)))
}

pub fn score_text(score: i32, config: &RunConfig) -> String {
    match config.mode {
        RunMode::Timed => format!("Score: {}", score),
        RunMode::Target => format!("Score: {} / {}", score, config.target_score),
    }
}

/// Icon shown in the puzzle modal
pub fn puzzle_icon(kind: PuzzleKind) -> &'static str {
    match kind {
        PuzzleKind::Coin => "🪙",
        PuzzleKind::Obstacle => "🛡️",
    }
}

/// Modal style class for the challenge type
pub fn puzzle_class(kind: PuzzleKind) -> &'static str {
    match kind {
        PuzzleKind::Coin => "coin-challenge",
        PuzzleKind::Obstacle => "obstacle-challenge",
    }
}

/// Screen flash class after an answer
pub fn feedback_class(correct: bool) -> &'static str {
    if correct { "correct" } else { "wrong" }
}

/// Contents of the game-over modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub title: String,
    pub message: String,
    pub final_score: i32,
    /// Shown only for a won target run
    pub final_time: Option<String>,
}

impl GameOverSummary {
    pub fn from_world(world: &World, victory: bool) -> Self {
        let config = &world.config;
        let score = world.score;
        let (title, message, final_time) = if score < GAME_OVER_SCORE {
            (
                "💀 Game Over!".to_string(),
                format!("Your score fell below {}.", GAME_OVER_SCORE),
                None,
            )
        } else {
            match (config.mode, victory) {
                (RunMode::Timed, _) => (
                    "⏱️ Time's Up!".to_string(),
                    format!(
                        "You scored {} points in {}!",
                        score,
                        format_time(config.time_limit_secs as u64)
                    ),
                    None,
                ),
                (RunMode::Target, true) => (
                    "🎉 Target Reached!".to_string(),
                    "Congratulations!".to_string(),
                    Some(format_time(world.clock.time_elapsed.floor().max(0.0) as u64)),
                ),
                (RunMode::Target, false) => (
                    "💀 Game Over!".to_string(),
                    format!(
                        "You didn't reach the target of {} points.",
                        config.target_score
                    ),
                    None,
                ),
            }
        };

        Self {
            title,
            message,
            final_score: score,
            final_time,
        }
    }
}
