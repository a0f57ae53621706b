//! SMTP transport adapter

pub mod client;
pub mod types;

pub use client::{Mailer, SmtpClient};
pub use types::{EmailParams, MimeType, SendResult};
