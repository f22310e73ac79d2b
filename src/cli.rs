use argh::FromArgs;

/// AI pull-up coach: counts repetitions from a workout video or camera stream
#[derive(FromArgs, Debug)]
pub struct Args {
    /// source: video file, image folder, or camera stream
    #[argh(option, default = "String::from(\"./video/workout.mp4\")")]
    pub source: String,

    /// pose model file; resolved from version and scale when omitted
    #[argh(option)]
    pub model: Option<String>,

    /// model dtype
    #[argh(option, default = "String::from(\"auto\")")]
    pub dtype: String,

    /// model version
    #[argh(option, default = "8.0")]
    pub ver: f32,

    /// device: cuda, cpu, mps
    #[argh(option, default = "String::from(\"cpu:0\")")]
    pub device: String,

    /// model scale: n, s, m, l
    #[argh(option, default = "String::from(\"n\")")]
    pub scale: String,

    /// detection confidence threshold for the person class
    #[argh(option, default = "0.4")]
    pub model_conf_threshold: f32,

    /// per-keypoint confidence threshold passed to the model
    #[argh(option, default = "0.5")]
    pub keypoint_conf_threshold: f32,

    /// preferred model input width and height
    #[argh(option, default = "640")]
    pub image_width_limit: isize,

    /// minimum keypoint confidence before a frame enters the rep signal
    #[argh(option, default = "0.3")]
    pub min_confidence: f32,

    /// seconds that must elapse between two counted reps
    #[argh(option, default = "2.0")]
    pub rep_cooldown: f64,

    /// consecutive confirming frames required before a direction is trusted
    #[argh(option, default = "3.0")]
    pub min_consecutive_frames: f32,

    /// net movement over the direction window before motion is read
    #[argh(option, default = "8.0")]
    pub movement_threshold: f32,

    /// minimum differential span of a down-up cycle to count as a rep
    #[argh(option, default = "30.0")]
    pub min_movement_range: f32,

    /// capacity of the rolling differential window
    #[argh(option, default = "30")]
    pub history_capacity: usize,

    /// capacity of the direction-change log
    #[argh(option, default = "10")]
    pub direction_log_capacity: usize,

    /// largest single-frame differential jump accepted as real motion
    #[argh(option, default = "80.0")]
    pub max_frame_jump: f32,

    /// nominal frame rate of the source, used for progress reporting
    #[argh(option, default = "30.0")]
    pub frame_rate: f64,

    /// save annotated debug frames under the run directory
    #[argh(switch)]
    pub save_frames: bool,

    /// use headless mode
    #[argh(switch)]
    pub headless: bool,

    /// write an AI-generated session debrief at the end of the run
    #[argh(switch)]
    pub coach: bool,
}
