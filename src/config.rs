//! Configuration management for the Email MCP Server
//!
//! Reads SMTP connection settings from the environment once at startup.

use crate::error::{ConfigError, Result};

/// Default SMTP submission port
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default listen port for the HTTP transport
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Configuration for the Email MCP Server
///
/// Constructed once at process entry and passed by reference into the SMTP
/// client. Business logic never reads the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMTP server hostname
    pub smtp_host: String,

    /// SMTP server port
    pub smtp_port: u16,

    /// Use implicit TLS (true for port 465, STARTTLS otherwise)
    pub smtp_secure: bool,

    /// SMTP username
    pub smtp_user: String,

    /// SMTP password
    pub smtp_pass: String,

    /// Default sender address
    pub smtp_from: String,

    /// Listen port for the HTTP transport
    pub http_port: u16,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// `SMTP_HOST`, `SMTP_USER` and `SMTP_PASS` are required; all missing
    /// variables are reported in a single error.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let smtp_host = get("SMTP_HOST");
        let smtp_user = get("SMTP_USER");
        let smtp_pass = get("SMTP_PASS");

        let missing: Vec<&str> = [
            ("SMTP_HOST", &smtp_host),
            ("SMTP_USER", &smtp_user),
            ("SMTP_PASS", &smtp_pass),
        ]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvVars {
                vars: missing.join(", "),
            }
            .into());
        }

        let smtp_host = smtp_host.unwrap_or_default();
        let smtp_user = smtp_user.unwrap_or_default();
        let smtp_pass = smtp_pass.unwrap_or_default();

        let smtp_port = parse_port(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?;
        let http_port = parse_port(get("PORT"), "PORT", DEFAULT_HTTP_PORT)?;

        let smtp_secure = get("SMTP_SECURE")
            .map(|v| v == "true")
            .unwrap_or(false);

        let smtp_from = get("SMTP_FROM").unwrap_or_else(|| smtp_user.clone());

        Ok(Self {
            smtp_host,
            smtp_port,
            smtp_secure,
            smtp_user,
            smtp_pass,
            smtp_from,
            http_port,
        })
    }
}

fn parse_port(value: Option<String>, var: &str, default: u16) -> Result<u16> {
    match value {
        Some(raw) => raw.parse().map_err(|_| {
            ConfigError::InvalidConfig {
                message: format!("{} must be a port number, got '{}'", var, raw),
            }
            .into()
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmailMcpError;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "465"),
            ("SMTP_SECURE", "true"),
            ("SMTP_USER", "mailer@example.com"),
            ("SMTP_PASS", "hunter2"),
            ("SMTP_FROM", "noreply@example.com"),
            ("PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.smtp_host, "smtp.example.com");
        assert_eq!(config.smtp_port, 465);
        assert!(config.smtp_secure);
        assert_eq!(config.smtp_from, "noreply@example.com");
        assert_eq!(config.http_port, 9090);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "mailer@example.com"),
            ("SMTP_PASS", "hunter2"),
        ]))
        .unwrap();

        assert_eq!(config.smtp_port, 587);
        assert!(!config.smtp_secure);
        assert_eq!(config.smtp_from, "mailer@example.com");
        assert_eq!(config.http_port, 8081);
    }

    #[test]
    fn test_missing_vars_all_reported() {
        let err = Config::from_lookup(lookup(&[("SMTP_HOST", "smtp.example.com")]))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("SMTP_USER"));
        assert!(message.contains("SMTP_PASS"));
        assert!(!message.contains("SMTP_HOST"));
        assert!(matches!(
            err,
            EmailMcpError::Config(ConfigError::MissingEnvVars { .. })
        ));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "mailer@example.com"),
            ("SMTP_PASS", "hunter2"),
            ("SMTP_PORT", "not-a-port"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("SMTP_PORT"));
    }

    #[test]
    fn test_secure_flag_only_accepts_true() {
        let config = Config::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "mailer@example.com"),
            ("SMTP_PASS", "hunter2"),
            ("SMTP_SECURE", "yes"),
        ]))
        .unwrap();

        assert!(!config.smtp_secure);
    }
}
