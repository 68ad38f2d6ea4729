//! Analysis command implementations (website, video, linkedin, structure).

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::{Toolkit, ERROR_MARKER};
use anyhow::Result;
use std::io::Read;

/// Run the website command.
pub async fn run_website(
    url: &str,
    question: &str,
    structured: bool,
    settings: Settings,
) -> Result<()> {
    preflight_or_bail(Operation::Website, &settings)?;

    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner("Analyzing website...");
    let answer = toolkit.analyze_website(url, question).await;
    spinner.finish_and_clear();

    print_result(&toolkit, answer, structured).await
}

/// Run the video command.
pub async fn run_video(
    input: &str,
    question: &str,
    structured: bool,
    settings: Settings,
) -> Result<()> {
    preflight_or_bail(Operation::Video, &settings)?;

    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner("Retrieving transcript and asking...");
    let answer = toolkit.ask_video_question(input, question).await;
    spinner.finish_and_clear();

    print_result(&toolkit, answer, structured).await
}

/// Run the linkedin command.
pub async fn run_linkedin(link: &str, structured: bool, settings: Settings) -> Result<()> {
    preflight_or_bail(Operation::Linkedin, &settings)?;

    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner("Fetching LinkedIn data...");
    let payload = toolkit.analyze_linkedin(link).await;
    spinner.finish_and_clear();

    print_result(&toolkit, payload, structured).await
}

/// Run the structure command.
pub async fn run_structure(input: &str, settings: Settings) -> Result<()> {
    preflight_or_bail(Operation::Structure, &settings)?;

    let input_data = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        input.to_string()
    };

    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner("Structuring...");
    let structured = toolkit.structure_text(&input_data).await;
    spinner.finish_and_clear();

    println!("{}", structured);
    Ok(())
}

fn preflight_or_bail(operation: Operation, settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(operation, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'speida doctor' for detailed diagnostics.");
        return Err(e.into());
    }
    Ok(())
}

/// Print a tool result, optionally running it through the structuring tool.
async fn print_result(toolkit: &Toolkit, result: String, structured: bool) -> Result<()> {
    if result.starts_with(ERROR_MARKER) {
        Output::error(&result);
        return Ok(());
    }

    if structured {
        let spinner = Output::spinner("Structuring output...");
        let formatted = toolkit.structure_text(&result).await;
        spinner.finish_and_clear();
        println!("{}", formatted);
    } else {
        println!("{}", result);
    }

    Ok(())
}
