/// A single pose keypoint with its detection confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyKeypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl BodyKeypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }
}

// COCO-17 keypoint indices for the joints the pulling analysis relies on
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;

/// The four tracked keypoints of a pulling exercise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExercisePoints {
    pub left_shoulder: BodyKeypoint,
    pub right_shoulder: BodyKeypoint,
    pub left_wrist: BodyKeypoint,
    pub right_wrist: BodyKeypoint,
}

impl ExercisePoints {
    /// Picks the shoulder and wrist keypoints out of a COCO-17 keypoint set.
    ///
    /// Returns `None` when the set is too short to contain them, which the
    /// caller reports as a computation failure rather than a crash.
    pub fn from_keypoints(keypoints: &[BodyKeypoint]) -> Option<Self> {
        Some(Self {
            left_shoulder: *keypoints.get(LEFT_SHOULDER)?,
            right_shoulder: *keypoints.get(RIGHT_SHOULDER)?,
            left_wrist: *keypoints.get(LEFT_WRIST)?,
            right_wrist: *keypoints.get(RIGHT_WRIST)?,
        })
    }

    /// Lowest confidence among the four tracked keypoints
    pub fn min_confidence(&self) -> f32 {
        self.left_shoulder
            .confidence
            .min(self.right_shoulder.confidence)
            .min(self.left_wrist.confidence)
            .min(self.right_wrist.confidence)
    }

    /// Signed vertical distance between the average wrist and the average
    /// shoulder position for this frame
    pub fn wrist_shoulder_diff(&self) -> f32 {
        let shoulder_y = (self.left_shoulder.y + self.right_shoulder.y) / 2.0;
        let wrist_y = (self.left_wrist.y + self.right_wrist.y) / 2.0;
        wrist_y - shoulder_y
    }
}
