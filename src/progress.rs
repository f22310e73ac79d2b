use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress tracker for a live workout analysis run.
///
/// The stream length is unknown up front (camera feeds have none), so this
/// is a spinner that reports stream position, rep count, and throughput.
pub struct WorkoutProgressTracker {
    progress_bar: ProgressBar,
    start_time: Instant,
    frame_rate: f64,
    processed_frames: u64,
}

impl WorkoutProgressTracker {
    /// Creates a new progress tracker for the given source
    pub fn new(frame_rate: f64, source_name: &str) -> Self {
        let progress_bar = ProgressBar::new_spinner();

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} frames | {msg}")
            .unwrap();

        progress_bar.set_style(style);
        progress_bar.set_message(format!("Analyzing {}", source_name));

        Self {
            progress_bar,
            start_time: Instant::now(),
            frame_rate,
            processed_frames: 0,
        }
    }

    /// Advances the tracker by one frame and refreshes the status line
    pub fn update_frame(&mut self, rep_count: u32, position: &str) {
        self.processed_frames += 1;
        self.progress_bar.inc(1);
        self.progress_bar
            .set_message(self.progress_message(rep_count, position));
    }

    /// Finishes the tracker with a closing summary line
    pub fn finish(&self, rep_count: u32) {
        let total_time = self.start_time.elapsed();
        let stream_time = format_duration(self.processed_frames as f64 / self.frame_rate);
        let processing_time = format_duration(total_time.as_secs_f64());
        let avg_fps = self.processed_frames as f64 / total_time.as_secs_f64();

        self.progress_bar.finish_with_message(format!(
            "Completed! Stream: {} | Processing: {} | Reps: {} | Avg FPS: {:.1}",
            stream_time, processing_time, rep_count, avg_fps
        ));
    }

    /// Gets the current number of processed frames
    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }

    /// Gets the current time position in the stream (h:mm:ss format)
    fn current_stream_time(&self) -> String {
        format_duration(self.processed_frames as f64 / self.frame_rate)
    }

    fn progress_message(&self, rep_count: u32, position: &str) -> String {
        if self.processed_frames == 0 {
            return "Starting...".to_string();
        }

        let elapsed = self.start_time.elapsed();
        let current_fps = self.processed_frames as f64 / elapsed.as_secs_f64();
        format!(
            "{} | Reps: {} | {} | Speed: {:.1} fps",
            self.current_stream_time(),
            rep_count,
            position,
            current_fps
        )
    }
}

/// Formats a duration in seconds to h:mm:ss format
fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
