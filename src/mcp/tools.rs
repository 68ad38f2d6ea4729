//! MCP tool definitions for Speida.

use super::protocol::Tool;
use serde_json::json;

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "analyze_website".to_string(),
            description: "Scrape a website and answer a question about its content. \
                The page is fetched as main-content-only markdown and analyzed by an LLM."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Website URL to analyze"
                    },
                    "question": {
                        "type": "string",
                        "description": "Question about the website content"
                    }
                },
                "required": ["url", "question"]
            }),
        },
        Tool {
            name: "ask_youtube_question".to_string(),
            description: "Answer a question about a YouTube video's transcript. \
                Accepts a video URL or a search query (first matching video is used). \
                Falls back to caption track lookup when no transcript is published."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url_or_query": {
                        "type": "string",
                        "description": "YouTube video URL or search query"
                    },
                    "question": {
                        "type": "string",
                        "description": "Question about the video transcript"
                    }
                },
                "required": ["video_url_or_query", "question"]
            }),
        },
        Tool {
            name: "analyze_linkedin".to_string(),
            description: "Fetch a LinkedIn profile or company page and return the raw data. \
                Accepts /company/ and /in/ links."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "linkedin_link": {
                        "type": "string",
                        "description": "LinkedIn profile or company URL"
                    }
                },
                "required": ["linkedin_link"]
            }),
        },
        Tool {
            name: "structured_tool".to_string(),
            description: "Re-format any tool's raw output into structured markdown with \
                sections, headings, bullet points, and summaries."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input_data": {
                        "type": "string",
                        "description": "Raw text to structure"
                    }
                },
                "required": ["input_data"]
            }),
        },
    ]
}
