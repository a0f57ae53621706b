//! SMTP client
//!
//! Wraps a pooled lettre transport behind the `Mailer` trait so the tool
//! handler can be exercised against a stub transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::smtp::types::{EmailParams, MimeType, SendResult};

/// Mail transport seam
///
/// One send attempt per call; transport failures are returned unchanged to
/// the caller, never retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single email
    async fn send(&self, params: &EmailParams) -> Result<SendResult>;
}

/// SMTP client backed by lettre
pub struct SmtpClient {
    /// Pooled async SMTP transport, safe for concurrent sends
    transport: AsyncSmtpTransport<Tokio1Executor>,

    /// Default sender identity
    from: Mailbox,

    /// SMTP hostname, used as the Message-ID domain
    host: String,
}

impl SmtpClient {
    /// Create a new SMTP client from startup configuration
    pub fn new(config: &Config) -> Result<Self> {
        let builder = if config.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let credentials = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let transport = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        let from = config.smtp_from.parse::<Mailbox>()?;

        Ok(Self {
            transport,
            from,
            host: config.smtp_host.clone(),
        })
    }

    /// Build the outgoing message with the given Message-ID
    fn build_message(&self, params: &EmailParams, message_id: &str) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(params.subject.clone())
            .message_id(Some(message_id.to_string()));

        for address in &params.to {
            builder = builder.to(address.parse()?);
        }

        if let Some(cc) = &params.cc {
            for address in cc {
                builder = builder.cc(address.parse()?);
            }
        }

        if let Some(bcc) = &params.bcc {
            for address in bcc {
                builder = builder.bcc(address.parse()?);
            }
        }

        if let Some(reply_to_id) = &params.in_reply_to {
            builder = builder
                .in_reply_to(reply_to_id.clone())
                .references(reply_to_id.clone());
        }

        let message = match params.mime_type {
            MimeType::TextHtml => {
                let html = params.html.clone().unwrap_or_else(|| params.body.clone());
                builder.singlepart(SinglePart::html(html))?
            }
            MimeType::MultipartAlternative => {
                let html = params
                    .html
                    .clone()
                    .ok_or(ValidationError::MissingHtmlBody)?;
                builder.multipart(MultiPart::alternative_plain_html(
                    params.body.clone(),
                    html,
                ))?
            }
            MimeType::TextPlain => match &params.html {
                Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                    params.body.clone(),
                    html.clone(),
                ))?,
                None => builder.singlepart(SinglePart::plain(params.body.clone()))?,
            },
        };

        Ok(message)
    }

    /// Full envelope recipient list (to + cc + bcc)
    fn envelope_recipients(params: &EmailParams) -> Vec<String> {
        let mut recipients = params.to.clone();
        if let Some(cc) = &params.cc {
            recipients.extend(cc.iter().cloned());
        }
        if let Some(bcc) = &params.bcc {
            recipients.extend(bcc.iter().cloned());
        }
        recipients
    }
}

#[async_trait]
impl Mailer for SmtpClient {
    async fn send(&self, params: &EmailParams) -> Result<SendResult> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.host);
        let message = self.build_message(params, &message_id)?;

        tracing::debug!(
            to = ?params.to,
            subject = %params.subject,
            message_id = %message_id,
            "sending email"
        );

        // The SMTP server refusing any recipient fails the whole send, so a
        // successful response means the full envelope was accepted.
        self.transport.send(message).await?;

        Ok(SendResult {
            message_id,
            accepted: Self::envelope_recipients(params),
            rejected: Vec::new(),
        })
    }
}
