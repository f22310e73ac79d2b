use std::env;

use usls::Y;

use crate::keypoints::BodyKeypoint;

/// Helper function to check if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    env::var("RUST_LOG")
        .map(|val| val.to_lowercase() == "debug")
        .unwrap_or(false)
}

/// Debug print function that only prints when RUST_LOG=debug
pub fn debug_println(args: std::fmt::Arguments) {
    if is_debug_enabled() {
        println!("{}", args);
    }
}

/// Extracts the keypoint set of the first detected person from a pose
/// detection result.
///
/// Returns `None` when the model reported no person at all; the counter
/// treats that as a "no observation" frame rather than evidence of
/// stillness.
pub fn extract_person_keypoints(detection: &Y) -> Option<Vec<BodyKeypoint>> {
    let keypoint_sets = detection.keypointss()?;
    let person = keypoint_sets.first()?;
    Some(
        person
            .iter()
            .map(|kpt| BodyKeypoint::new(kpt.x(), kpt.y(), kpt.confidence().unwrap_or(0.0)))
            .collect(),
    )
}
