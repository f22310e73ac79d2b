use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use usls::Image;

use crate::counter::Position;
use crate::session_processor_utils::debug_println;

/// Writes the current (annotated) frame into the debug directory.
///
/// The per-frame state that the original overlay carried is encoded into
/// the file name instead, so a run's debug directory can be scrubbed by eye
/// without opening a single image.
pub fn save_debug_frame(
    img: &Image,
    debug_dir: &Path,
    frame_count: u64,
    diff: f32,
    position: Position,
    rep_count: u32,
) -> Result<PathBuf> {
    let filename = debug_frame_filename(
        frame_count,
        diff,
        position,
        rep_count,
        Local::now().timestamp(),
    );
    let filepath = debug_dir.join(filename);
    img.to_rgb8().save(&filepath)?;
    debug_println(format_args!("debug frame saved: {}", filepath.display()));
    Ok(filepath)
}

fn debug_frame_filename(
    frame_count: u64,
    diff: f32,
    position: Position,
    rep_count: u32,
    timestamp: i64,
) -> String {
    format!(
        "frame_{:04}_diff_{:.1}_{}_reps_{}_{}.jpg",
        frame_count,
        diff,
        position.as_str(),
        rep_count,
        timestamp
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_encodes_frame_state() {
        let name = debug_frame_filename(7, -42.35, Position::PullingUp, 3, 1754000000);
        assert_eq!(name, "frame_0007_diff_-42.3_pulling_up_reps_3_1754000000.jpg");
    }

    #[test]
    fn test_filename_pads_frame_number() {
        let name = debug_frame_filename(12345, 0.0, Position::NoPerson, 0, 1);
        assert_eq!(name, "frame_12345_diff_0.0_no_person_reps_0_1.jpg");
    }
}
