//! MCP protocol implementation

pub mod http;
pub mod server;
pub mod tools;
pub mod types;
