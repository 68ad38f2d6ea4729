//! CLI module for Speida.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Speida - Market Intelligence Tools
///
/// Analyze websites, YouTube videos, and LinkedIn profiles with LLMs.
/// The name "Speida" comes from the Norwegian word for "scout."
#[derive(Parser, Debug)]
#[command(name = "speida")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a website and answer a question about its content
    Website {
        /// Website URL
        url: String,

        /// Question about the website content
        question: String,

        /// Re-format the answer into structured markdown
        #[arg(short, long)]
        structured: bool,
    },

    /// Answer a question about a YouTube video's transcript
    Video {
        /// YouTube video URL or search query
        input: String,

        /// Question about the video transcript
        question: String,

        /// Re-format the answer into structured markdown
        #[arg(short, long)]
        structured: bool,
    },

    /// Fetch a LinkedIn profile or company page
    Linkedin {
        /// LinkedIn profile or company URL
        link: String,

        /// Re-format the payload into structured markdown
        #[arg(short, long)]
        structured: bool,
    },

    /// Re-format arbitrary text into structured markdown
    Structure {
        /// The text to structure (use '-' to read stdin)
        input: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
