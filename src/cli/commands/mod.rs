//! CLI command implementations.

mod analyze;
mod config;
mod doctor;
mod mcp;
mod serve;

pub use analyze::{run_linkedin, run_structure, run_video, run_website};
pub use config::run_config;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use serve::run_serve;
