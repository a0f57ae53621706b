//! MCP Tool definitions and handlers
//!
//! Declares the `send_email` tool and maps its invocations onto the mail
//! transport. Every field declared in the schema is forwarded to the
//! transport; nothing is silently dropped.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{McpError, ValidationError};
use crate::mcp::types::{CallToolResult, Tool};
use crate::smtp::{EmailParams, Mailer, MimeType};

/// Tool handler
pub struct ToolHandler {
    mailer: Arc<dyn Mailer>,
}

/// Recipient lists accept both a single address and an array of addresses
/// (earlier protocol variants used a bare string).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(address) => vec![address],
            Self::Many(addresses) => addresses,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailArgs {
    #[serde(default)]
    to: Option<OneOrMany>,

    #[serde(default)]
    subject: Option<String>,

    #[serde(default, alias = "text")]
    body: Option<String>,

    #[serde(default, alias = "htmlBody")]
    html: Option<String>,

    #[serde(default)]
    mime_type: Option<String>,

    #[serde(default)]
    cc: Option<OneOrMany>,

    #[serde(default)]
    bcc: Option<OneOrMany>,

    #[serde(default)]
    in_reply_to: Option<String>,
}

impl SendEmailArgs {
    /// Validate argument presence and produce typed send parameters
    ///
    /// All missing required fields are reported together.
    fn into_params(self) -> Result<EmailParams, ValidationError> {
        let to = self.to.map(OneOrMany::into_vec).unwrap_or_default();

        let mut missing = Vec::new();
        if to.is_empty() {
            missing.push("to");
        }
        if self.subject.as_deref().unwrap_or("").is_empty() {
            missing.push("subject");
        }
        if self.body.as_deref().unwrap_or("").is_empty() {
            missing.push("body");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields {
                fields: missing.join(", "),
            });
        }

        let mime_type = match self.mime_type.as_deref() {
            Some(raw) => MimeType::parse(raw).ok_or_else(|| ValidationError::InvalidMimeType {
                mime_type: raw.to_string(),
            })?,
            None => MimeType::default(),
        };

        Ok(EmailParams {
            to,
            subject: self.subject.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            html: self.html,
            mime_type,
            cc: self.cc.map(OneOrMany::into_vec),
            bcc: self.bcc.map(OneOrMany::into_vec),
            in_reply_to: self.in_reply_to,
        })
    }
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![Tool {
            name: "send_email".to_string(),
            description: Some("Send an email to one or more recipients".to_string()),
            input_schema: send_email_schema(),
        }]
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        match name {
            "send_email" => self.handle_send_email(args).await,
            _ => CallToolResult::error(
                McpError::UnknownTool {
                    name: name.to_string(),
                }
                .to_string(),
            ),
        }
    }

    async fn handle_send_email(&self, args: Value) -> CallToolResult {
        let args: SendEmailArgs = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        let params = match args.into_params() {
            Ok(p) => p,
            Err(e) => return CallToolResult::error(e.to_string()),
        };

        match self.mailer.send(&params).await {
            Ok(result) => CallToolResult::json(&result),
            Err(e) => CallToolResult::error(e.tool_message()),
        }
    }
}

fn send_email_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "to": {
                "type": "array",
                "items": {"type": "string"},
                "description": "List of recipient email addresses"
            },
            "subject": {
                "type": "string",
                "description": "Email subject"
            },
            "body": {
                "type": "string",
                "description": "Plain text body of the email"
            },
            "html": {
                "type": "string",
                "description": "HTML body of the email"
            },
            "mimeType": {
                "type": "string",
                "enum": ["text/plain", "text/html", "multipart/alternative"],
                "description": "Email content type"
            },
            "cc": {
                "type": "array",
                "items": {"type": "string"},
                "description": "List of CC recipients"
            },
            "bcc": {
                "type": "array",
                "items": {"type": "string"},
                "description": "List of BCC recipients"
            },
            "inReplyTo": {
                "type": "string",
                "description": "Message-ID being replied to"
            }
        },
        "required": ["to", "subject", "body"]
    })
}
