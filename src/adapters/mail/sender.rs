//! SMTP sender implementation
//!
//! Plain connection to a fixed relay host, port 25 by default, no implicit
//! credentials. Every report goes to the same to/bcc audience with the same
//! configured subject.

use super::{render_report, Notifier};
use crate::config::MailConfig;
use crate::domain::errors::NotifyError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends operator reports over SMTP
pub struct MailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: MailConfig,
}

impl MailNotifier {
    /// Creates a notifier for the configured relay host
    pub fn new(config: MailConfig) -> Self {
        // Internal relay host, plain SMTP without STARTTLS or credentials
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .build();

        Self { transport, config }
    }

    fn compose(&self, message_html: &str) -> Result<Message, NotifyError> {
        let from: Mailbox = self
            .config
            .from
            .parse()
            .map_err(|e| NotifyError::Compose(format!("invalid from address: {e}")))?;
        let to: Mailbox = self
            .config
            .to
            .parse()
            .map_err(|e| NotifyError::Compose(format!("invalid to address: {e}")))?;

        let mut builder = Message::builder()
            .from(from)
            .to(to)
            .subject(&self.config.subject)
            .header(ContentType::TEXT_HTML);

        if let Some(bcc) = &self.config.bcc {
            let bcc: Mailbox = bcc
                .parse()
                .map_err(|e| NotifyError::Compose(format!("invalid bcc address: {e}")))?;
            builder = builder.bcc(bcc);
        }

        builder
            .body(render_report(message_html, self.config.signature.as_deref()))
            .map_err(|e| NotifyError::Compose(e.to_string()))
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn notify(&self, message_html: &str) -> Result<(), NotifyError> {
        let message = self.compose(message_html)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Send(e.to_string()))?;

        tracing::info!(to = %self.config.to, "Operator notification sent");
        Ok(())
    }
}
