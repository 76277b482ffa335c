//! Operator notification adapter
//!
//! Formats and sends the failure/success reports to the operator
//! distribution list over plain SMTP. The `Notifier` trait is the seam the
//! scheduler depends on; `MailNotifier` is the production implementation.

pub mod sender;

use crate::domain::errors::NotifyError;
use async_trait::async_trait;

pub use sender::MailNotifier;

/// Notification seam
///
/// Implementations deliver one HTML report to the fixed operator audience.
/// Callers treat delivery failure as log-only; it never fails a cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one report; `message_html` is the body content (HTML fragments
    /// such as `<br/>` allowed)
    async fn notify(&self, message_html: &str) -> Result<(), NotifyError>;
}

/// Wraps a message in the standard report layout
pub fn render_report(message_html: &str, signature: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<html><body>\n");
    body.push_str("<table style=\"width:100%; text-align:left; border:none;\"><tr><td style=\"font-family:Arial; font-size:11px;\">\n");
    body.push_str(message_html);
    body.push_str("\n</td></tr></table>\n");

    if let Some(signature) = signature {
        body.push_str("<br/>\n");
        body.push_str("<table style=\"width:100%; text-align:left; border:none;\"><tr><td style=\"font-family:Arial; font-size:11px; font-weight:bold;\">\n");
        body.push_str(signature);
        body.push_str("\n</td></tr></table>\n");
    }

    body.push_str("</body></html>\n");
    body
}
