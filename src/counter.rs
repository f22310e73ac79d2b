use std::fmt;

use crate::cli::Args;
use crate::history::{DirectionChange, DirectionLog, SampleWindow};
use crate::keypoints::{BodyKeypoint, ExercisePoints};
use crate::session_processor_utils::debug_println;

/// Number of recent samples the direction classifier looks across. Net
/// change over this span, not a per-frame derivative, so single-frame
/// keypoint jitter does not read as motion.
const DIRECTION_SPAN: usize = 5;

/// Confirmed motion direction of the wrists relative to the shoulders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Stable,
}

/// Per-frame position label reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Initial state, before any frame has been analyzed
    Neutral,
    /// Holding position, or still warming up the sample window
    Stable,
    PullingUp,
    LoweringDown,
    /// No keypoints were supplied for this frame
    NoPerson,
    /// A tracked keypoint fell below the confidence threshold
    LowConfidence,
    /// The keypoint array was malformed or produced a non-finite value
    Error,
}

impl Position {
    /// Label used in responses, logs, and debug-frame filenames
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Neutral => "neutral",
            Position::Stable => "stable",
            Position::PullingUp => "pulling_up",
            Position::LoweringDown => "lowering_down",
            Position::NoPerson => "no_person",
            Position::LowConfidence => "low_confidence",
            Position::Error => "error",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable thresholds for motion confirmation and repetition validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSettings {
    /// Minimum keypoint confidence before a frame enters the signal
    pub min_confidence: f32,
    /// Seconds that must elapse between two counted repetitions
    pub rep_cooldown: f64,
    /// Consecutive confirming frames required before a direction is trusted.
    /// Compared with `>=` against counters that decay in half steps.
    pub min_consecutive_frames: f32,
    /// Net movement over the direction span before motion is read at all
    pub movement_threshold: f32,
    /// Minimum differential span of a down-then-up cycle to count as a rep
    pub min_movement_range: f32,
    /// Capacity of the rolling differential window
    pub history_capacity: usize,
    /// Capacity of the direction-change log
    pub direction_log_capacity: usize,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            rep_cooldown: 2.0,
            min_consecutive_frames: 3.0,
            movement_threshold: 8.0,
            min_movement_range: 30.0,
            history_capacity: 30,
            direction_log_capacity: 10,
        }
    }
}

impl From<&Args> for CounterSettings {
    fn from(args: &Args) -> Self {
        Self {
            min_confidence: args.min_confidence,
            rep_cooldown: args.rep_cooldown,
            min_consecutive_frames: args.min_consecutive_frames,
            movement_threshold: args.movement_threshold,
            min_movement_range: args.min_movement_range,
            history_capacity: args.history_capacity,
            direction_log_capacity: args.direction_log_capacity,
        }
    }
}

/// Pull-up repetition counter for a single workout session.
///
/// Consumes one wrist/shoulder differential per frame and turns it into a
/// confirmed motion direction and a validated repetition count. All state is
/// owned here; frames must arrive in order from a single caller, and
/// independent sessions get independent counters.
#[derive(Debug, Clone, PartialEq)]
pub struct PullUpCounter {
    settings: CounterSettings,
    count: u32,
    position: Position,
    position_history: SampleWindow,
    direction_log: DirectionLog,
    last_rep_time: f64,
    current_direction: Direction,
    consecutive_up: f32,
    consecutive_down: f32,
    frame_count: u64,
}

impl PullUpCounter {
    /// Creates a new counter in its initial state
    pub fn new(settings: CounterSettings) -> Self {
        Self {
            settings,
            count: 0,
            position: Position::Neutral,
            position_history: SampleWindow::new(settings.history_capacity),
            direction_log: DirectionLog::new(settings.direction_log_capacity),
            last_rep_time: 0.0,
            current_direction: Direction::Stable,
            consecutive_up: 0.0,
            consecutive_down: 0.0,
            frame_count: 0,
        }
    }

    /// Analyzes one frame of keypoints and returns the updated rep count and
    /// position label.
    ///
    /// `now` is session-relative time in seconds. Frames without a usable
    /// signal (no person, low confidence, malformed array) are reported
    /// through the label and leave every piece of state untouched.
    pub fn process(&mut self, keypoints: Option<&[BodyKeypoint]>, now: f64) -> (u32, Position) {
        let Some(keypoints) = keypoints else {
            return (self.count, Position::NoPerson);
        };
        if keypoints.is_empty() {
            return (self.count, Position::NoPerson);
        }

        let Some(points) = ExercisePoints::from_keypoints(keypoints) else {
            return (self.count, Position::Error);
        };

        if points.min_confidence() < self.settings.min_confidence {
            return (self.count, Position::LowConfidence);
        }

        let current_diff = points.wrist_shoulder_diff();
        if !current_diff.is_finite() {
            return (self.count, Position::Error);
        }

        self.frame_count += 1;
        let (direction, _magnitude) = self.detect_direction_change(current_diff, now);
        self.check_for_rep(now);

        self.position = match direction {
            Some(Direction::Up) => Position::PullingUp,
            Some(Direction::Down) => Position::LoweringDown,
            _ => Position::Stable,
        };
        (self.count, self.position)
    }

    /// Classifies the motion direction for the newest differential sample.
    ///
    /// Returns the confirmed direction (`None` while the window is still
    /// warming up) and the unsigned movement magnitude.
    fn detect_direction_change(&mut self, current_diff: f32, now: f64) -> (Option<Direction>, f32) {
        self.position_history.push(current_diff);

        let Some(movement) = self.position_history.net_change(DIRECTION_SPAN) else {
            return (None, 0.0);
        };

        let raw_direction = if movement > self.settings.movement_threshold {
            Direction::Up
        } else if movement < -self.settings.movement_threshold {
            Direction::Down
        } else {
            Direction::Stable
        };

        // The counters are mutually exclusive: motion in one direction wipes
        // any confirmation built in the other. A stable frame decays both in
        // half steps instead of resetting, so one noisy frame cannot erase
        // several frames of confirmation.
        match raw_direction {
            Direction::Up => {
                self.consecutive_up += 1.0;
                self.consecutive_down = 0.0;
            }
            Direction::Down => {
                self.consecutive_down += 1.0;
                self.consecutive_up = 0.0;
            }
            Direction::Stable => {
                self.consecutive_up = (self.consecutive_up - 0.5).max(0.0);
                self.consecutive_down = (self.consecutive_down - 0.5).max(0.0);
            }
        }

        // Hysteresis: the previously confirmed direction holds until a
        // counter clears the threshold, or until both have fully decayed.
        let mut confirmed = self.current_direction;
        if self.consecutive_up >= self.settings.min_consecutive_frames {
            confirmed = Direction::Up;
        } else if self.consecutive_down >= self.settings.min_consecutive_frames {
            confirmed = Direction::Down;
        } else if self.consecutive_up == 0.0 && self.consecutive_down == 0.0 {
            confirmed = Direction::Stable;
        }

        if confirmed != self.current_direction {
            self.direction_log.push(DirectionChange {
                direction: confirmed,
                time: now,
                diff: current_diff,
            });
            self.current_direction = confirmed;
            debug_println(format_args!(
                "direction change: {:?} (diff: {:.1})",
                confirmed, current_diff
            ));
        }

        (Some(confirmed), movement.abs())
    }

    /// Counts a repetition when the last two confirmed transitions form a
    /// down-then-up cycle of sufficient amplitude and the cooldown has
    /// elapsed.
    fn check_for_rep(&mut self, now: f64) -> bool {
        if now - self.last_rep_time <= self.settings.rep_cooldown {
            return false;
        }
        let Some((down, up)) = self.direction_log.last_two() else {
            return false;
        };
        if down.direction != Direction::Down || up.direction != Direction::Up {
            return false;
        }

        // Reject cycles too shallow to be a real repetition, e.g. wobble
        // while hanging.
        let movement_range = (up.diff - down.diff).abs();
        if movement_range <= self.settings.min_movement_range {
            return false;
        }

        self.count += 1;
        self.last_rep_time = now;
        debug_println(format_args!(
            "rep completed: count {} (movement {:.1} -> {:.1}, range {:.1})",
            self.count, down.diff, up.diff, movement_range
        ));

        // Drop every queued transition so the same cycle can never be
        // counted twice.
        self.direction_log.clear();
        true
    }

    /// Drops all accumulated motion evidence while keeping the rep count.
    ///
    /// Called when the differential signal breaks continuity (camera
    /// switch, playback seek, a different person picked up by the
    /// detector): the keypoints jump without any real movement, and stale
    /// samples would read as motion.
    pub fn clear_motion_history(&mut self) {
        self.position_history.clear();
        self.direction_log.clear();
        self.current_direction = Direction::Stable;
        self.consecutive_up = 0.0;
        self.consecutive_down = 0.0;
    }

    /// Restores every field to its initial value. The only operation that
    /// may decrease the rep count.
    pub fn reset(&mut self) {
        self.count = 0;
        self.position = Position::Neutral;
        self.position_history.clear();
        self.direction_log.clear();
        self.last_rep_time = 0.0;
        self.current_direction = Direction::Stable;
        self.consecutive_up = 0.0;
        self.consecutive_down = 0.0;
        self.frame_count = 0;
        debug_println(format_args!("pull-up counter reset to initial state"));
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    /// Number of frames whose differential entered the signal
    pub fn frames_analyzed(&self) -> u64 {
        self.frame_count
    }
}

impl Default for PullUpCounter {
    fn default() -> Self {
        Self::new(CounterSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoints::{LEFT_SHOULDER, LEFT_WRIST, RIGHT_SHOULDER, RIGHT_WRIST};

    /// One full down-then-up cycle. Confirms Down at the sixth sample
    /// (diff -30) and Up at the last one (diff 10), range 40.
    const REP_PATTERN: [f32; 15] = [
        0.0, 0.0, 0.0, 0.0, 0.0, -10.0, -20.0, -30.0, -40.0, -50.0, -50.0, -35.0, -20.0, -5.0,
        10.0,
    ];

    /// A shallow cycle: confirms Down at diff -20 and Up at diff -4,
    /// range 16, below the amplitude gate.
    const SHALLOW_PATTERN: [f32; 18] = [
        0.0, 0.0, 0.0, 0.0, 0.0, -4.0, -8.0, -12.0, -16.0, -20.0, -24.0, -28.0, -24.0, -20.0,
        -16.0, -12.0, -8.0, -4.0,
    ];

    /// A second full cycle that starts from the tail of REP_PATTERN
    const SECOND_CYCLE: [f32; 12] = [
        10.0, 10.0, 10.0, -5.0, -20.0, -35.0, -50.0, -50.0, -35.0, -20.0, -5.0, 10.0,
    ];

    fn keypoints_with_diff(diff: f32) -> Vec<BodyKeypoint> {
        let mut points = vec![BodyKeypoint::new(0.0, 0.0, 1.0); 17];
        points[LEFT_SHOULDER] = BodyKeypoint::new(100.0, 100.0, 1.0);
        points[RIGHT_SHOULDER] = BodyKeypoint::new(200.0, 100.0, 1.0);
        points[LEFT_WRIST] = BodyKeypoint::new(100.0, 100.0 + diff, 1.0);
        points[RIGHT_WRIST] = BodyKeypoint::new(200.0, 100.0 + diff, 1.0);
        points
    }

    fn feed(
        counter: &mut PullUpCounter,
        diffs: &[f32],
        start: f64,
        dt: f64,
    ) -> (u32, Position) {
        let mut result = (counter.count(), counter.position());
        for (i, &diff) in diffs.iter().enumerate() {
            let keypoints = keypoints_with_diff(diff);
            result = counter.process(Some(&keypoints), start + i as f64 * dt);
        }
        result
    }

    #[test]
    fn test_full_cycle_counts_one_rep() {
        let mut counter = PullUpCounter::default();
        let (count, position) = feed(&mut counter, &REP_PATTERN, 0.0, 1.0);
        assert_eq!(count, 1);
        assert_eq!(position, Position::PullingUp);
        // The whole log is dropped on a counted rep
        assert!(counter.direction_log.is_empty());
    }

    #[test]
    fn test_count_is_monotonic_across_cycles() {
        let mut counter = PullUpCounter::default();
        let mut last_count = 0;
        let keypoint_sets: Vec<Vec<BodyKeypoint>> = REP_PATTERN
            .iter()
            .chain(SECOND_CYCLE.iter())
            .map(|&diff| keypoints_with_diff(diff))
            .collect();
        for (i, keypoints) in keypoint_sets.iter().enumerate() {
            let (count, _) = counter.process(Some(keypoints), i as f64);
            assert!(count == last_count || count == last_count + 1);
            last_count = count;
        }
        // Both cycles were far enough apart in time to count
        assert_eq!(last_count, 2);
    }

    #[test]
    fn test_cooldown_rejects_replayed_cycle() {
        let mut counter = PullUpCounter::default();
        let (count, _) = feed(&mut counter, &REP_PATTERN, 0.0, 1.0);
        assert_eq!(count, 1);

        // Replay the oscillation immediately, compressed into ~0.6s
        let (count, _) = feed(&mut counter, &SECOND_CYCLE, 14.05, 0.05);
        assert_eq!(count, 1);
        // The pattern was observed but not consumed
        assert_eq!(counter.direction_log.len(), 2);
    }

    #[test]
    fn test_amplitude_gate_rejects_shallow_cycle() {
        let mut counter = PullUpCounter::default();
        let (count, position) = feed(&mut counter, &SHALLOW_PATTERN, 0.0, 1.0);
        assert_eq!(count, 0);
        assert_eq!(position, Position::PullingUp);
        // Both transitions stay queued; nothing was counted
        assert_eq!(counter.direction_log.len(), 2);
    }

    #[test]
    fn test_single_spike_never_confirms_a_direction() {
        let mut counter = PullUpCounter::default();
        feed(
            &mut counter,
            &[0.0, 0.0, 0.0, 0.0, 0.0, 12.0, 0.0, 0.0, 0.0, 0.0],
            0.0,
            1.0,
        );
        assert_eq!(counter.current_direction(), Direction::Stable);
        assert!(counter.direction_log.is_empty());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_two_confirming_frames_are_not_enough() {
        let mut counter = PullUpCounter::default();
        // Two raw up frames, then the signal flattens out
        feed(
            &mut counter,
            &[0.0, 0.0, 0.0, 0.0, 0.0, 12.0, 24.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
            0.0,
            1.0,
        );
        assert_eq!(counter.current_direction(), Direction::Stable);
        assert!(counter.direction_log.is_empty());
    }

    #[test]
    fn test_stable_frames_decay_counters_in_half_steps() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &[0.0, 0.0, 0.0, 0.0, 0.0, 12.0], 0.0, 1.0);
        assert_eq!(counter.consecutive_up, 1.0);

        feed(&mut counter, &[0.0], 6.0, 1.0);
        assert_eq!(counter.consecutive_up, 0.5);

        feed(&mut counter, &[0.0], 7.0, 1.0);
        assert_eq!(counter.consecutive_up, 0.0);
    }

    #[test]
    fn test_counters_are_mutually_exclusive() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &[0.0, 0.0, 0.0, 0.0, 0.0, 12.0], 0.0, 1.0);
        assert_eq!(counter.consecutive_up, 1.0);

        // One strong frame the other way wipes the up confirmation
        feed(&mut counter, &[-12.0], 6.0, 1.0);
        assert_eq!(counter.consecutive_up, 0.0);
        assert_eq!(counter.consecutive_down, 1.0);
    }

    #[test]
    fn test_decayed_counter_below_threshold_does_not_confirm() {
        let mut counter = PullUpCounter::default();
        // Confirms Up at the third raw up frame, then one stable frame
        // decays the counter to 2.5
        feed(
            &mut counter,
            &[0.0, 0.0, 0.0, 0.0, 0.0, 12.0, 24.0, 36.0, 8.0],
            0.0,
            1.0,
        );
        assert_eq!(counter.consecutive_up, 2.5);
        // 2.5 is below the threshold, but hysteresis retains the confirmed
        // direction without logging a new transition
        assert_eq!(counter.current_direction(), Direction::Up);
        assert_eq!(counter.direction_log.len(), 1);
    }

    #[test]
    fn test_warmup_frames_report_stable() {
        let mut counter = PullUpCounter::default();
        for i in 0..4 {
            let keypoints = keypoints_with_diff(50.0);
            let (count, position) = counter.process(Some(&keypoints), i as f64);
            assert_eq!(count, 0);
            assert_eq!(position, Position::Stable);
        }
        assert_eq!(counter.position_history.len(), 4);
        assert_eq!(counter.frames_analyzed(), 4);
    }

    #[test]
    fn test_no_person_frames_freeze_state() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &REP_PATTERN, 0.0, 1.0);
        let snapshot = counter.clone();

        for i in 0..10 {
            let (count, position) = counter.process(None, 20.0 + i as f64);
            assert_eq!(count, 1);
            assert_eq!(position, Position::NoPerson);
        }
        let (_, position) = counter.process(Some(&[]), 40.0);
        assert_eq!(position, Position::NoPerson);

        assert_eq!(counter, snapshot);
    }

    #[test]
    fn test_low_confidence_frames_freeze_state() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &REP_PATTERN, 0.0, 1.0);
        let snapshot = counter.clone();

        let mut keypoints = keypoints_with_diff(25.0);
        keypoints[LEFT_WRIST].confidence = 0.2;
        let (count, position) = counter.process(Some(&keypoints), 30.0);
        assert_eq!(count, 1);
        assert_eq!(position, Position::LowConfidence);
        assert_eq!(counter, snapshot);
    }

    #[test]
    fn test_malformed_keypoints_report_error_without_mutation() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &[0.0, 5.0, 10.0], 0.0, 1.0);
        let snapshot = counter.clone();

        // Array too short to hold the wrist indices
        let short = vec![BodyKeypoint::new(1.0, 1.0, 1.0); 9];
        let (count, position) = counter.process(Some(&short), 10.0);
        assert_eq!(count, 0);
        assert_eq!(position, Position::Error);
        assert_eq!(counter, snapshot);

        // Non-finite arithmetic is caught at the same boundary
        let broken = keypoints_with_diff(f32::NAN);
        let (_, position) = counter.process(Some(&broken), 11.0);
        assert_eq!(position, Position::Error);
        assert_eq!(counter, snapshot);
    }

    #[test]
    fn test_reset_restores_initial_state_idempotently() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &REP_PATTERN, 0.0, 1.0);
        assert_eq!(counter.count(), 1);

        counter.reset();
        let after_first = counter.clone();
        counter.reset();
        assert_eq!(counter, after_first);

        assert_eq!(counter.count(), 0);
        assert_eq!(counter.position(), Position::Neutral);
        assert!(counter.position_history.is_empty());
        assert!(counter.direction_log.is_empty());
        assert_eq!(counter.frames_analyzed(), 0);
        assert_eq!(counter, PullUpCounter::default());
    }

    #[test]
    fn test_clear_motion_history_preserves_count() {
        let mut counter = PullUpCounter::default();
        feed(&mut counter, &REP_PATTERN, 0.0, 1.0);
        // Partially confirm a new downward movement
        feed(&mut counter, &[10.0, 0.0, -10.0, -20.0], 15.0, 1.0);

        counter.clear_motion_history();
        assert_eq!(counter.count(), 1);
        assert!(counter.position_history.is_empty());
        assert!(counter.direction_log.is_empty());
        assert_eq!(counter.current_direction(), Direction::Stable);
        assert_eq!(counter.consecutive_up, 0.0);
        assert_eq!(counter.consecutive_down, 0.0);
    }

    #[test]
    fn test_lowering_position_while_descending() {
        let mut counter = PullUpCounter::default();
        let (count, position) = feed(
            &mut counter,
            &[0.0, 0.0, 0.0, 0.0, 0.0, -10.0, -20.0, -30.0, -40.0],
            0.0,
            1.0,
        );
        assert_eq!(count, 0);
        assert_eq!(position, Position::LoweringDown);
        assert_eq!(counter.current_direction(), Direction::Down);
    }

    #[test]
    fn test_position_labels() {
        assert_eq!(Position::Neutral.as_str(), "neutral");
        assert_eq!(Position::Stable.as_str(), "stable");
        assert_eq!(Position::PullingUp.as_str(), "pulling_up");
        assert_eq!(Position::LoweringDown.as_str(), "lowering_down");
        assert_eq!(Position::NoPerson.as_str(), "no_person");
        assert_eq!(Position::LowConfidence.as_str(), "low_confidence");
        assert_eq!(Position::Error.as_str(), "error");
        assert_eq!(format!("{}", Position::PullingUp), "pulling_up");
    }

    #[test]
    fn test_up_then_down_pattern_does_not_count() {
        let mut counter = PullUpCounter::default();
        // Rise first, then descend: the transitions arrive as Up then Down
        let rise_then_fall: [f32; 15] = [
            0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 50.0, 35.0, 20.0, 5.0, -10.0,
        ];
        let (count, _) = feed(&mut counter, &rise_then_fall, 0.0, 1.0);
        assert_eq!(count, 0);
        assert_eq!(counter.direction_log.len(), 2);
    }
}
