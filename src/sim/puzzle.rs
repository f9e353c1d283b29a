//! Multiplication puzzle gate
//!
//! A collision opens a puzzle and freezes the world. The player's answer is
//! scored immediately, then the puzzle stays up as feedback until
//! `PUZZLE_FEEDBACK_SECS` have passed, after which `settle_puzzle` closes it
//! and either ends the run, opens the next queued puzzle, or resumes play.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, RunMode, World};
use crate::PuzzleError;
use crate::consts::{GAME_OVER_SCORE, MAX_OPERAND, PUZZLE_FEEDBACK_SECS};

/// What triggered a puzzle; decides how the answer is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleKind {
    /// Correct +1, wrong 0
    Coin,
    /// Correct 0, wrong -1
    Obstacle,
}

impl PuzzleKind {
    pub fn score_delta(&self, correct: bool) -> i32 {
        match (self, correct) {
            (PuzzleKind::Coin, true) => 1,
            (PuzzleKind::Obstacle, false) => -1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PuzzleStatus {
    AwaitingAnswer,
    /// Answer scored; the puzzle closes at `settle_at`
    Answered { correct: bool, settle_at: f64 },
}

/// The open puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPuzzle {
    pub kind: PuzzleKind,
    pub a: i32,
    pub b: i32,
    pub answer: i32,
    pub status: PuzzleStatus,
}

impl PendingPuzzle {
    /// Two operands drawn uniformly from `[min, max]`, each bound clamped to
    /// `±MAX_OPERAND` so the product is exact
    pub fn generate<R: Rng + ?Sized>(kind: PuzzleKind, min: i32, max: i32, rng: &mut R) -> Self {
        let min = min.clamp(-MAX_OPERAND, MAX_OPERAND);
        let max = max.clamp(-MAX_OPERAND, MAX_OPERAND);
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let a = rng.random_range(lo..=hi);
        let b = rng.random_range(lo..=hi);
        Self {
            kind,
            a,
            b,
            answer: a * b,
            status: PuzzleStatus::AwaitingAnswer,
        }
    }

    pub fn question(&self) -> String {
        format!("{} × {} = ?", self.a, self.b)
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.status, PuzzleStatus::Answered { .. })
    }
}

/// Outcome of an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub kind: PuzzleKind,
    pub correct: bool,
    pub answer: i32,
    pub score_delta: i32,
}

/// Leading-integer parse: skips leading whitespace, accepts one sign,
/// reads digits up to the first non-digit. "12abc" is 12, "abc" is an error.
pub fn parse_answer(text: &str) -> Result<i32, PuzzleError> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: Vec<i64> = rest
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| (b - b'0') as i64)
        .collect();
    if digits.is_empty() {
        return Err(PuzzleError::NotANumber(text.to_string()));
    }

    let magnitude = digits
        .iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));
    let value = if negative { -magnitude } else { magnitude };
    Ok(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

impl World {
    /// Open a puzzle, or queue it behind the one already open
    pub(crate) fn open_puzzle(&mut self, kind: PuzzleKind) {
        if self.is_over() {
            return;
        }
        if self.pending.is_some() {
            log::debug!("Queueing {:?} puzzle", kind);
            self.puzzle_queue.push_back(kind);
            return;
        }

        let puzzle = PendingPuzzle::generate(
            kind,
            self.config.math_min,
            self.config.math_max,
            &mut self.rng,
        );
        log::debug!("Puzzle opened: {:?} {}", kind, puzzle.question());
        self.pending = Some(puzzle);
        self.phase = GamePhase::Puzzle;
        self.emit(GameEvent::PuzzleOpened(kind));
    }

    /// Score an answer to the open puzzle. Non-numeric text is rejected and
    /// leaves the puzzle open; a repeat submission is rejected too.
    pub fn submit_answer(&mut self, text: &str, now: f64) -> Result<Verdict, PuzzleError> {
        let puzzle = self.pending.as_mut().ok_or(PuzzleError::NoPuzzle)?;
        if puzzle.is_answered() {
            return Err(PuzzleError::AlreadyAnswered);
        }
        let value = parse_answer(text)?;

        let correct = value == puzzle.answer;
        let delta = puzzle.kind.score_delta(correct);
        puzzle.status = PuzzleStatus::Answered {
            correct,
            settle_at: now + PUZZLE_FEEDBACK_SECS,
        };
        let verdict = Verdict {
            kind: puzzle.kind,
            correct,
            answer: puzzle.answer,
            score_delta: delta,
        };

        self.score += delta;
        self.emit(if correct {
            GameEvent::PointEarned
        } else {
            GameEvent::PointLost
        });
        log::debug!(
            "Answer {} to {:?} puzzle: correct={} score={}",
            value,
            verdict.kind,
            correct,
            self.score
        );
        Ok(verdict)
    }

    /// Close an answered puzzle once its feedback delay has passed.
    /// Returns true when a puzzle was closed.
    pub fn settle_puzzle(&mut self, now: f64) -> bool {
        let ready = match self.pending.as_ref().map(|p| p.status) {
            Some(PuzzleStatus::Answered { settle_at, .. }) => now >= settle_at,
            _ => false,
        };
        if !ready {
            return false;
        }
        self.pending = None;

        if self.score < GAME_OVER_SCORE {
            self.end_run(false);
        } else if self.config.mode == RunMode::Target && self.score >= self.config.target_score {
            self.end_run(true);
        } else if let Some(next) = self.puzzle_queue.pop_front() {
            self.open_puzzle(next);
        } else {
            self.phase = GamePhase::Running;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{RunConfig, Viewport};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world(config: RunConfig) -> World {
        World::new(config, Viewport::new(800.0, 600.0), 7)
    }

    fn answer_text(world: &World, correct: bool) -> String {
        let answer = world.pending.as_ref().map(|p| p.answer).unwrap_or(0);
        if correct {
            answer.to_string()
        } else {
            (answer + 1).to_string()
        }
    }

    /// Open, answer and settle one puzzle
    fn resolve(world: &mut World, kind: PuzzleKind, correct: bool, now: f64) {
        world.open_puzzle(kind);
        let text = answer_text(world, correct);
        world.submit_answer(&text, now).unwrap();
        assert!(world.settle_puzzle(now + PUZZLE_FEEDBACK_SECS));
    }

    #[test]
    fn test_huge_bounds_keep_exact_product() {
        let mut w = world(RunConfig {
            math_min: 50_000,
            math_max: 50_000,
            ..Default::default()
        });
        w.open_puzzle(PuzzleKind::Obstacle);
        let puzzle = w.pending.clone().unwrap();
        assert_eq!(puzzle.a, MAX_OPERAND);
        assert_eq!(puzzle.b, MAX_OPERAND);
        assert_eq!(puzzle.answer as i64, MAX_OPERAND as i64 * MAX_OPERAND as i64);

        // An out-of-range guess saturates to i32::MAX, which is not the product
        let verdict = w.submit_answer("99999999999", 0.0).unwrap();
        assert!(!verdict.correct);
        assert_eq!(w.score, -1);
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("42"), Ok(42));
        assert_eq!(parse_answer("  7"), Ok(7));
        assert_eq!(parse_answer("-3"), Ok(-3));
        assert_eq!(parse_answer("+8"), Ok(8));
        assert_eq!(parse_answer("12abc"), Ok(12));
        assert_eq!(parse_answer("3.9"), Ok(3));
        assert!(matches!(parse_answer(""), Err(PuzzleError::NotANumber(_))));
        assert!(matches!(parse_answer("abc"), Err(PuzzleError::NotANumber(_))));
        assert!(matches!(parse_answer("-"), Err(PuzzleError::NotANumber(_))));
        assert!(matches!(parse_answer("- 3"), Err(PuzzleError::NotANumber(_))));
    }

    #[test]
    fn test_parse_answer_saturates() {
        assert_eq!(parse_answer("99999999999999999999999"), Ok(i32::MAX));
    }

    #[test]
    fn test_question_text() {
        let puzzle = PendingPuzzle {
            kind: PuzzleKind::Coin,
            a: 6,
            b: 7,
            answer: 42,
            status: PuzzleStatus::AwaitingAnswer,
        };
        assert_eq!(puzzle.question(), "6 × 7 = ?");
    }

    #[test]
    fn test_score_deltas() {
        assert_eq!(PuzzleKind::Coin.score_delta(true), 1);
        assert_eq!(PuzzleKind::Coin.score_delta(false), 0);
        assert_eq!(PuzzleKind::Obstacle.score_delta(true), 0);
        assert_eq!(PuzzleKind::Obstacle.score_delta(false), -1);
    }

    #[test]
    fn test_open_pauses_world() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Coin);
        assert!(world.is_paused());
        assert_eq!(world.phase, GamePhase::Puzzle);
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::PuzzleOpened(PuzzleKind::Coin)]
        );
    }

    #[test]
    fn test_submit_without_puzzle() {
        let mut world = world(RunConfig::default());
        assert_eq!(world.submit_answer("4", 0.0), Err(PuzzleError::NoPuzzle));
    }

    #[test]
    fn test_non_numeric_keeps_puzzle_open() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Obstacle);
        let result = world.submit_answer("twelve", 0.0);
        assert!(matches!(result, Err(PuzzleError::NotANumber(_))));
        assert_eq!(world.score, 0);
        assert!(!world.pending.as_ref().unwrap().is_answered());

        let text = answer_text(&world, true);
        assert!(world.submit_answer(&text, 0.0).is_ok());
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Coin);
        let text = answer_text(&world, true);
        world.submit_answer(&text, 0.0).unwrap();
        assert_eq!(
            world.submit_answer(&text, 0.1),
            Err(PuzzleError::AlreadyAnswered)
        );
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_coin_scoring() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Coin);
        let text = answer_text(&world, true);
        let verdict = world.submit_answer(&text, 0.0).unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.score_delta, 1);
        assert_eq!(world.score, 1);
        assert!(world.drain_events().contains(&GameEvent::PointEarned));

        assert!(world.settle_puzzle(1.0));
        world.open_puzzle(PuzzleKind::Coin);
        let text = answer_text(&world, false);
        let verdict = world.submit_answer(&text, 2.0).unwrap();
        assert!(!verdict.correct);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_obstacle_scoring() {
        let mut world = world(RunConfig::default());
        resolve(&mut world, PuzzleKind::Obstacle, true, 0.0);
        assert_eq!(world.score, 0);
        resolve(&mut world, PuzzleKind::Obstacle, false, 1.0);
        assert_eq!(world.score, -1);
        assert!(world.drain_events().contains(&GameEvent::PointLost));
    }

    #[test]
    fn test_feedback_delay() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Coin);
        let text = answer_text(&world, true);
        world.submit_answer(&text, 10.0).unwrap();

        assert!(!world.settle_puzzle(10.1));
        assert!(world.is_paused());
        assert!(world.settle_puzzle(10.0 + PUZZLE_FEEDBACK_SECS));
        assert_eq!(world.phase, GamePhase::Running);
        assert!(world.pending.is_none());
    }

    #[test]
    fn test_unanswered_never_settles() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Coin);
        assert!(!world.settle_puzzle(1000.0));
        assert_eq!(world.phase, GamePhase::Puzzle);
    }

    #[test]
    fn test_game_over_below_threshold() {
        let mut world = world(RunConfig::default());
        world.score = -4;
        resolve(&mut world, PuzzleKind::Obstacle, false, 0.0);
        assert_eq!(world.score, -5);
        assert_eq!(world.phase, GamePhase::Running);

        resolve(&mut world, PuzzleKind::Obstacle, false, 1.0);
        assert_eq!(world.score, -6);
        assert_eq!(world.outcome(), Some(false));
    }

    #[test]
    fn test_target_victory() {
        let mut world = world(RunConfig {
            mode: RunMode::Target,
            target_score: 3,
            ..Default::default()
        });
        resolve(&mut world, PuzzleKind::Coin, true, 0.0);
        resolve(&mut world, PuzzleKind::Coin, true, 1.0);
        assert_eq!(world.phase, GamePhase::Running);
        resolve(&mut world, PuzzleKind::Coin, true, 2.0);
        assert_eq!(world.outcome(), Some(true));
        assert!(
            world
                .drain_events()
                .contains(&GameEvent::GameOver { victory: true })
        );
    }

    #[test]
    fn test_timed_mode_has_no_score_victory() {
        let mut world = world(RunConfig {
            target_score: 1,
            ..Default::default()
        });
        resolve(&mut world, PuzzleKind::Coin, true, 0.0);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_queued_puzzles_open_in_order() {
        let mut world = world(RunConfig::default());
        world.open_puzzle(PuzzleKind::Coin);
        world.open_puzzle(PuzzleKind::Obstacle);
        world.open_puzzle(PuzzleKind::Coin);
        assert_eq!(world.queued_puzzles(), 2);
        assert_eq!(world.pending.as_ref().unwrap().kind, PuzzleKind::Coin);

        let text = answer_text(&world, true);
        world.submit_answer(&text, 0.0).unwrap();
        assert!(world.settle_puzzle(1.0));
        assert_eq!(world.phase, GamePhase::Puzzle);
        assert_eq!(world.pending.as_ref().unwrap().kind, PuzzleKind::Obstacle);
        assert_eq!(world.queued_puzzles(), 1);
    }

    #[test]
    fn test_game_over_discards_queue() {
        let mut world = world(RunConfig::default());
        world.score = -5;
        world.open_puzzle(PuzzleKind::Obstacle);
        world.open_puzzle(PuzzleKind::Coin);
        let text = answer_text(&world, false);
        world.submit_answer(&text, 0.0).unwrap();
        assert!(world.settle_puzzle(1.0));
        assert_eq!(world.outcome(), Some(false));
        assert_eq!(world.queued_puzzles(), 0);
        assert!(world.pending.is_none());
    }

    proptest! {
        #[test]
        fn operands_within_bounds(min in any::<i32>(), max in any::<i32>(), seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let puzzle = PendingPuzzle::generate(PuzzleKind::Coin, min, max, &mut rng);
            let lo = min.min(max).clamp(-MAX_OPERAND, MAX_OPERAND);
            let hi = min.max(max).clamp(-MAX_OPERAND, MAX_OPERAND);
            prop_assert!(puzzle.a >= lo && puzzle.a <= hi);
            prop_assert!(puzzle.b >= lo && puzzle.b <= hi);
            prop_assert_eq!(puzzle.answer as i64, puzzle.a as i64 * puzzle.b as i64);
        }

        #[test]
        fn parse_accepts_any_integer(n in any::<i32>()) {
            prop_assert_eq!(parse_answer(&n.to_string()), Ok(n));
        }
    }
}
