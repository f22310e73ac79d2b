use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::Local;

use pullup_coach::cli::Args;
use pullup_coach::coach;
use pullup_coach::session_processor::WorkoutSessionProcessor;

/// Creates a timestamped output directory and returns its path
fn create_output_dir() -> Result<String> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let output_dir = format!("./runs/{}", timestamp);
    fs::create_dir_all(&output_dir)?;
    Ok(output_dir)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    // Create timestamped output directory
    let output_dir = create_output_dir()?;
    println!("Created output directory: {}", output_dir);

    let mut processor = WorkoutSessionProcessor::new(&args);
    let outcome = processor.process_stream(&args, Path::new(&output_dir))?;

    if args.coach {
        let debrief_path = format!("{}/session_debrief.txt", output_dir);
        println!("Writing session debrief to: {}", debrief_path);
        let coach_config = coach::CoachConfig::default();
        coach::write_session_debrief(
            outcome.rep_count,
            outcome.summary.as_ref(),
            Path::new(&debrief_path),
            &coach_config,
        )
        .await?;
        println!("Session debrief written");
    }

    Ok(())
}
