//! Doctor command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the doctor command: report on tools and configuration.
pub fn run_doctor(settings: &Settings) -> Result<()> {
    Output::header("Speida Doctor");
    println!();

    let mut problems = 0;

    Output::header("External tools");
    match preflight::check_tool("yt-dlp") {
        Ok(()) => Output::kv("yt-dlp", "found"),
        Err(e) => {
            Output::kv("yt-dlp", "missing");
            Output::warning(&format!("{}", e));
            problems += 1;
        }
    }

    Output::header("API keys");
    problems += report_key("LLM (OPENAI_API_KEY)", &settings.llm.api_key);
    problems += report_key("Firecrawl (FIRECRAWL_API_KEY)", &settings.scrape.api_key);
    problems += report_key(
        "ScrapingDog (SCRAPINGDOG_API_KEY)",
        &settings.linkedin.api_key,
    );

    Output::header("Configuration");
    Output::kv("Config file", &Settings::default_config_path().display().to_string());
    Output::kv("LLM model", &settings.llm.model);
    Output::kv("Caption language", &settings.youtube.caption_language);

    println!();
    if problems == 0 {
        Output::success("All checks passed.");
    } else {
        Output::warning(&format!(
            "{} problem(s) found. Some tools will not work until they are fixed.",
            problems
        ));
    }

    Ok(())
}

fn report_key(label: &str, key: &Option<String>) -> u32 {
    match key {
        Some(k) if !k.is_empty() => {
            Output::kv(label, "configured");
            0
        }
        _ => {
            Output::kv(label, "not set");
            1
        }
    }
}
