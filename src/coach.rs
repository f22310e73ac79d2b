use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{self, ChatCompletionRequest};
use openai_api_rs::v1::common::GPT4_O_MINI;

use crate::stats::StatsSummary;

pub struct CoachConfig {
    pub api_key: String,
    pub model: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: GPT4_O_MINI.to_string(),
        }
    }
}

/// Asks the coaching model for a short end-of-session debrief and writes it
/// next to the other run artifacts
pub async fn write_session_debrief(
    rep_count: u32,
    summary: Option<&StatsSummary>,
    output_path: &Path,
    config: &CoachConfig,
) -> Result<()> {
    let mut client = OpenAIClient::builder()
        .with_api_key(&config.api_key)
        .build()
        .map_err(|e| anyhow!("Failed to create OpenAI client: {}", e))?;

    let request = ChatCompletionRequest::new(
        config.model.clone(),
        vec![chat_completion::ChatCompletionMessage {
            role: chat_completion::MessageRole::user,
            content: chat_completion::Content::Text(build_debrief_prompt(rep_count, summary)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }],
    );

    let response = client
        .chat_completion(request)
        .await
        .map_err(|e| anyhow!("Failed to generate session debrief: {}", e))?;

    let debrief = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .ok_or_else(|| anyhow!("Coaching model returned no content"))?;

    // Create parent directories if they don't exist
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create output directory: {}", e))?;
    }

    fs::write(output_path, debrief).map_err(|e| anyhow!("Failed to write debrief file: {}", e))?;

    Ok(())
}

fn build_debrief_prompt(rep_count: u32, summary: Option<&StatsSummary>) -> String {
    let mut prompt = format!(
        "You are a friendly strength coach. An athlete just finished a \
         pull-up session with {} completed repetitions.",
        rep_count
    );
    if let Some(summary) = summary {
        prompt.push_str(&format!(
            " Their wrist-to-shoulder movement signal covered {} analyzed \
             frames with a range of {:.0} units (std dev {:.1}).",
            summary.samples, summary.range, summary.std_dev
        ));
    }
    prompt.push_str(
        " Write a short, encouraging debrief (3-4 sentences) with one \
         concrete suggestion for the next session.",
    );
    prompt
}
