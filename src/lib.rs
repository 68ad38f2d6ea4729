//! Speida - Market Intelligence Tools
//!
//! A tool server for gathering and analyzing market intelligence from the web.
//!
//! The name "Speida" comes from the Norwegian word for "scout."
//!
//! # Overview
//!
//! Speida exposes four tools, callable over MCP, HTTP, or the CLI:
//! - Analyze a website and answer a question about its content
//! - Answer a question about a YouTube video's transcript (URL or search query)
//! - Fetch a LinkedIn profile or company page
//! - Re-format any tool's output into structured markdown
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `resolve` - Normalizing caller input into canonical resource ids
//! - `providers` - External capability traits and their HTTP/subprocess clients
//! - `llm` - Language model abstraction
//! - `retrieve` - Content retrieval with primary/fallback strategies
//! - `analyze` - Conversational analysis and markdown structuring
//! - `toolkit` - The tool dispatch surface composing the pipeline
//! - `mcp` - MCP server (stdio JSON-RPC)
//!
//! # Example
//!
//! ```rust,no_run
//! use speida::config::Settings;
//! use speida::toolkit::Toolkit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let toolkit = Toolkit::new(settings)?;
//!
//!     let answer = toolkit
//!         .ask_video_question("https://youtu.be/dQw4w9WgXcQ", "What is this about?")
//!         .await;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod providers;
pub mod resolve;
pub mod retrieve;
pub mod toolkit;

pub use error::{Result, SpeidaError};
