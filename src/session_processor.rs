use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use usls::{Annotator, DataLoader, Viewer, models::YOLO};

use crate::cli::Args;
use crate::config;
use crate::counter::CounterSettings;
use crate::debug_frames;
use crate::keypoints::ExercisePoints;
use crate::motivation;
use crate::progress::WorkoutProgressTracker;
use crate::session::SessionStore;
use crate::session_processor_utils::{self, debug_println};
use crate::signal_guard::SignalGuard;
use crate::stats::{SessionStats, StatsSummary};

/// What a finished run produced
pub struct SessionOutcome {
    pub rep_count: u32,
    pub frames_processed: u64,
    pub summary: Option<StatsSummary>,
}

/// Drives a workout video or camera stream through pose detection and
/// repetition counting for a single session
pub struct WorkoutSessionProcessor {
    sessions: SessionStore,
    session_id: String,
    signal_guard: SignalGuard,
    stats: SessionStats,
}

impl WorkoutSessionProcessor {
    /// Creates a new processor for the default session
    pub fn new(args: &Args) -> Self {
        Self {
            sessions: SessionStore::new(CounterSettings::from(args)),
            session_id: String::from("default"),
            signal_guard: SignalGuard::new(args.max_frame_jump),
            stats: SessionStats::new(),
        }
    }

    /// Processes the whole stream and returns the session outcome
    pub fn process_stream(&mut self, args: &Args, output_dir: &Path) -> Result<SessionOutcome> {
        let model_config = config::build_config(args)?;
        let mut model = YOLO::new(model_config)?;
        let data_loader = DataLoader::new(&args.source)?.with_batch(1).build()?;
        let mut viewer = Viewer::default();
        let annotator = Annotator::default();

        let debug_dir = output_dir.join("debug_frames");
        if args.save_frames {
            fs::create_dir_all(&debug_dir)?;
        }

        let started = Instant::now();
        let mut tracker = WorkoutProgressTracker::new(args.frame_rate, &args.source);
        let mut frames_seen: u64 = 0;
        let mut last_count: u32 = 0;

        for xs in &data_loader {
            if viewer.is_window_exist() && !viewer.is_window_open() {
                break;
            }

            // Handle key events and delay
            if let Some(key) = viewer.wait_key(1) {
                if key == usls::Key::Escape {
                    break;
                }
            }

            let ys = model.forward(&xs)?;

            for (x, y) in xs.iter().zip(ys.iter()) {
                frames_seen += 1;
                let now = started.elapsed().as_secs_f64();

                let keypoints = session_processor_utils::extract_person_keypoints(y);
                // The differential this frame contributes, if it passes the
                // same gates the counter applies
                let confident_diff = keypoints
                    .as_deref()
                    .and_then(ExercisePoints::from_keypoints)
                    .filter(|points| points.min_confidence() >= args.min_confidence)
                    .map(|points| points.wrist_shoulder_diff())
                    .filter(|diff| diff.is_finite());

                let counter = self.sessions.counter(&self.session_id);
                if let Some(diff) = confident_diff {
                    // The view changed under the signal; stale samples would
                    // read as motion.
                    if self.signal_guard.is_discontinuity(diff) {
                        counter.clear_motion_history();
                    }
                }
                let (rep_count, position) = counter.process(keypoints.as_deref(), now);

                let current_diff = confident_diff.unwrap_or(0.0);
                debug_println(format_args!(
                    "frame {}: diff {:.1} | {} | reps: {}",
                    frames_seen, current_diff, position, rep_count
                ));

                if let Some(diff) = confident_diff {
                    self.stats.record(diff);
                }

                if rep_count > last_count {
                    println!("{}", motivation::motivation_text(rep_count));
                    last_count = rep_count;
                }

                let annotated = if !args.headless || args.save_frames {
                    annotator.annotate(x, y)?
                } else {
                    x.clone()
                };
                if !args.headless {
                    viewer.imshow(&annotated)?;
                }
                if args.save_frames {
                    debug_frames::save_debug_frame(
                        &annotated,
                        &debug_dir,
                        frames_seen,
                        current_diff,
                        position,
                        rep_count,
                    )?;
                }

                tracker.update_frame(rep_count, position.as_str());
            }
        }

        let rep_count = self.sessions.counter(&self.session_id).count();
        tracker.finish(rep_count);
        let summary = self.stats.summary();
        self.print_session_summary(rep_count, summary.as_ref());

        Ok(SessionOutcome {
            rep_count,
            frames_processed: frames_seen,
            summary,
        })
    }

    fn print_session_summary(&self, rep_count: u32, summary: Option<&StatsSummary>) {
        println!("Session complete: {} reps", rep_count);
        if let Some(summary) = summary {
            println!("  analyzed frames: {}", summary.samples);
            println!(
                "  differential range: {:.1} to {:.1} (span {:.1})",
                summary.min, summary.max, summary.range
            );
            println!(
                "  mean: {:.1} | std dev: {:.1}",
                summary.mean, summary.std_dev
            );
        }
    }
}
