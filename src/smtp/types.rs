//! Types for the SMTP send operation

use serde::{Deserialize, Serialize};

/// Content type of an outgoing email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MimeType {
    #[default]
    TextPlain,
    TextHtml,
    MultipartAlternative,
}

impl MimeType {
    /// Parse a declared MIME type string
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text/plain" => Some(Self::TextPlain),
            "text/html" => Some(Self::TextHtml),
            "multipart/alternative" => Some(Self::MultipartAlternative),
            _ => None,
        }
    }
}

/// Parameters for a single email send
#[derive(Debug, Clone)]
pub struct EmailParams {
    /// Recipient addresses
    pub to: Vec<String>,

    /// Subject line
    pub subject: String,

    /// Plain text body
    pub body: String,

    /// HTML body
    pub html: Option<String>,

    /// Content type (defaults to text/plain)
    pub mime_type: MimeType,

    /// CC recipients
    pub cc: Option<Vec<String>>,

    /// BCC recipients
    pub bcc: Option<Vec<String>>,

    /// Message-ID this email replies to
    pub in_reply_to: Option<String>,
}

/// Result of a completed send
///
/// Serialized verbatim into the tool response payload; field order is part of
/// the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    /// Identifier stamped on the outgoing message
    pub message_id: String,

    /// Recipients the transport acknowledged
    pub accepted: Vec<String>,

    /// Recipients the transport declined
    pub rejected: Vec<String>,
}
