use crate::session_processor_utils::debug_println;

/// Hard gate on implausible frame-to-frame jumps in the differential
/// signal.
///
/// A valid repetition only needs to span 30 units across a whole down-up
/// cycle, so consecutive confident frames that disagree by several times
/// that amount cannot be the athlete moving. They mean the view changed
/// under the signal: a camera switch, a playback seek, or the detector
/// latching onto a different person. The accumulated motion evidence is
/// void at that point, and the caller clears it.
pub struct SignalGuard {
    last_diff: Option<f32>,
    max_frame_jump: f32,
}

impl SignalGuard {
    /// Creates a guard that rejects single-frame jumps larger than
    /// `max_frame_jump` units
    pub fn new(max_frame_jump: f32) -> Self {
        Self {
            last_diff: None,
            max_frame_jump,
        }
    }

    /// Checks the newest confidently-detected differential against the
    /// previous one.
    ///
    /// Returns `true` when the jump is too large to be real motion. The
    /// sample becomes the new baseline either way, so the frame after a
    /// flagged jump is judged against the new view rather than the old one.
    pub fn is_discontinuity(&mut self, diff: f32) -> bool {
        let jump = match self.last_diff {
            Some(last) => (diff - last).abs(),
            None => 0.0,
        };
        self.last_diff = Some(diff);

        if jump > self.max_frame_jump {
            debug_println(format_args!(
                "signal discontinuity: {:.1} unit jump between frames",
                jump
            ));
            true
        } else {
            false
        }
    }
}
