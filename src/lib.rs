//! Email MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing a single `send_email` tool
//! backed by an SMTP transport.

pub mod config;
pub mod error;
pub mod mcp;
pub mod smtp;

pub use config::Config;
pub use error::{EmailMcpError, Result};
