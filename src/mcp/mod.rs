//! MCP (Model Context Protocol) server for Speida.
//!
//! Exposes the four tools to AI assistants over stdio JSON-RPC.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
