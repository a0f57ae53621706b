//! Error types for the Email MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Email MCP Server
#[derive(Error, Debug)]
pub enum EmailMcpError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// SMTP transport errors surfaced by lettre
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Message construction errors
    #[error("Message error: {0}")]
    Message(#[from] lettre::error::Error),

    /// Malformed email address
    #[error("Address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {vars}")]
    MissingEnvVars { vars: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required fields: {fields}")]
    MissingFields { fields: String },

    #[error("Invalid MIME type: {mime_type}")]
    InvalidMimeType { mime_type: String },

    #[error("mimeType multipart/alternative requires an html body")]
    MissingHtmlBody,
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid tool arguments: {message}")]
    InvalidArguments { message: String },
}

impl EmailMcpError {
    /// Message surfaced in tool error payloads: the underlying failure text
    /// without the wrapper prefix.
    pub fn tool_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Validation(e) => e.to_string(),
            Self::Mcp(e) => e.to_string(),
            Self::Smtp(e) => e.to_string(),
            Self::Message(e) => e.to_string(),
            Self::Address(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
            Self::Json(e) => e.to_string(),
        }
    }
}

/// Result type alias for Email MCP operations
pub type Result<T> = std::result::Result<T, EmailMcpError>;
