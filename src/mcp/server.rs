//! MCP server implementation.

use super::protocol::*;
use super::tools::get_tools;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "speida";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Speida.
pub struct McpServer {
    settings: Settings,
    toolkit: Option<Toolkit>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            toolkit: None,
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // Log to stderr so it doesn't interfere with JSON-RPC
        eprintln!("Speida MCP server starting...");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    eprintln!("Failed to parse request: {}", e);
                    let response = JsonRpcResponse::error(None, -32700, "Parse error");
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                    stdout.flush()?;
                    continue;
                }
            };

            let response = self.handle_request(request).await;
            writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            stdout.flush()?;
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" => {
                // Notification, no response needed but we'll send empty success
                JsonRpcResponse::success(request.id, json!({}))
            }
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, id: Option<Value>) -> JsonRpcResponse {
        match Toolkit::new(self.settings.clone()) {
            Ok(toolkit) => {
                self.toolkit = Some(toolkit);
                eprintln!("Toolkit initialized");
            }
            Err(e) => {
                eprintln!("Failed to initialize toolkit: {}", e);
                return JsonRpcResponse::error(id, -32000, &format!("Init failed: {}", e));
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult { tools: get_tools() };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, &format!("Invalid params: {}", e))
                }
            },
            None => return JsonRpcResponse::error(id, -32602, "Missing params"),
        };

        let toolkit = match &self.toolkit {
            Some(t) => t,
            None => {
                return JsonRpcResponse::success(
                    id,
                    serde_json::to_value(ToolCallResult::error(
                        "Server not initialized".to_string(),
                    ))
                    .unwrap(),
                )
            }
        };

        let args = params.arguments.unwrap_or_else(|| json!({}));

        // Tool operations always return a string, so every call maps to a
        // text result; only missing arguments are protocol-level errors.
        let result = match params.name.as_str() {
            "analyze_website" => match (str_arg(&args, "url"), str_arg(&args, "question")) {
                (Some(url), Some(question)) => {
                    ToolCallResult::text(toolkit.analyze_website(url, question).await)
                }
                _ => ToolCallResult::error("Missing 'url' or 'question' argument".to_string()),
            },
            "ask_youtube_question" => match (
                str_arg(&args, "video_url_or_query"),
                str_arg(&args, "question"),
            ) {
                (Some(input), Some(question)) => {
                    ToolCallResult::text(toolkit.ask_video_question(input, question).await)
                }
                _ => ToolCallResult::error(
                    "Missing 'video_url_or_query' or 'question' argument".to_string(),
                ),
            },
            "analyze_linkedin" => match str_arg(&args, "linkedin_link") {
                Some(link) => ToolCallResult::text(toolkit.analyze_linkedin(link).await),
                None => ToolCallResult::error("Missing 'linkedin_link' argument".to_string()),
            },
            "structured_tool" => match str_arg(&args, "input_data") {
                Some(input) => ToolCallResult::text(toolkit.structure_text(input).await),
                None => ToolCallResult::error("Missing 'input_data' argument".to_string()),
            },
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }
}

fn str_arg<'a>(args: &'a Value, name: &str) -> Option<&'a str> {
    args.get(name).and_then(|v| v.as_str())
}
