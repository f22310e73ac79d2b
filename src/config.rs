use anyhow::Result;
use usls::{Config, NAMES_COCO_KEYPOINTS_17};

use crate::cli::Args;

/// Builds a YOLO pose model configuration from command line arguments
pub fn build_config(args: &Args) -> Result<Config> {
    let config = Config::yolo()
        .with_model_file(args.model.as_ref().map_or("", String::as_str))
        .with_task("pose".parse()?)
        .with_version(args.ver.try_into()?)
        .with_scale(args.scale.parse()?)
        .with_model_dtype(args.dtype.parse()?)
        .with_model_device(args.device.parse()?)
        .with_model_ixx(0, 0, (1, 1, 1).into())
        .with_model_ixx(0, 2, (320, args.image_width_limit, 1280).into())
        .with_model_ixx(0, 3, (320, args.image_width_limit, 1280).into())
        .with_class_confs(&[args.model_conf_threshold])
        .with_keypoint_confs(&[args.keypoint_conf_threshold])
        .with_keypoint_names(&NAMES_COCO_KEYPOINTS_17)
        .with_model_num_dry_run(2);

    Ok(config)
}
