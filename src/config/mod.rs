//! Configuration management for Speida.

mod prompts;
mod settings;

pub use prompts::{AnalystPrompts, Prompts, StructuringPrompts, TranscriptPrompts};
pub use settings::{
    GeneralSettings, LinkedInSettings, LlmSettings, PromptSettings, ScrapeSettings, Settings,
    YoutubeSettings,
};
