//! Lead capture emails.
//!
//! Every lead produces two independent messages: a confirmation to the
//! visitor and a notification to the agency. Neither failure affects the
//! other, and neither is reported to the caller beyond the receipt.

use std::sync::Arc;

use crate::email::{Mailer, OutgoingEmail};

/// A validated lead or contact request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub email: String,
    pub name: Option<String>,
    /// Project summary, usually produced by the chat assistant.
    pub summary: Option<String>,
    pub message: Option<String>,
}

impl Lead {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Which of the two emails went out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadReceipt {
    pub confirmation_sent: bool,
    pub notification_sent: bool,
}

/// Confirmation sent back to the visitor.
pub fn client_confirmation(lead: &Lead) -> OutgoingEmail {
    let mut body = format!(
        "Hello {},\n\nThank you for reaching out. We have received your request \
         and will get back to you shortly.\n",
        lead.name.as_deref().unwrap_or("there")
    );
    if let Some(summary) = &lead.summary {
        body.push_str(&format!("\nYour project summary:\n{summary}\n"));
    }
    body.push_str("\nThe team");

    OutgoingEmail {
        to: lead.email.clone(),
        subject: "We received your request".into(),
        body,
        reply_to: None,
    }
}

/// Notification sent to the agency inbox, with replies going to the visitor.
pub fn internal_notification(lead: &Lead, notify_address: &str) -> OutgoingEmail {
    let mut body = format!("New lead from {}\n\nEmail: {}\n", lead.display_name(), lead.email);
    if let Some(name) = &lead.name {
        body.push_str(&format!("Name: {name}\n"));
    }
    if let Some(summary) = &lead.summary {
        body.push_str(&format!("\nSummary:\n{summary}\n"));
    }
    if let Some(message) = &lead.message {
        body.push_str(&format!("\nMessage:\n{message}\n"));
    }

    OutgoingEmail {
        to: notify_address.to_string(),
        subject: format!("New lead: {}", lead.display_name()),
        body,
        reply_to: Some(lead.email.clone()),
    }
}

/// Sends lead emails, or logs and skips them when mail is not configured.
#[derive(Clone)]
pub struct LeadMailer {
    mailer: Option<Arc<dyn Mailer>>,
    notify_address: String,
}

impl LeadMailer {
    pub fn new(mailer: Option<Arc<dyn Mailer>>, notify_address: impl Into<String>) -> Self {
        Self {
            mailer,
            notify_address: notify_address.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Send both emails concurrently. Failures are logged, never returned.
    pub async fn send(&self, lead: &Lead) -> LeadReceipt {
        let Some(mailer) = &self.mailer else {
            tracing::warn!(email = %lead.email, "Mail is not configured, skipping lead emails");
            return LeadReceipt::default();
        };

        let confirmation = client_confirmation(lead);
        let notification = internal_notification(lead, &self.notify_address);

        let (confirmation_result, notification_result) =
            tokio::join!(mailer.send(&confirmation), mailer.send(&notification));

        let confirmation_sent = match confirmation_result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(to = %confirmation.to, error = %e, "Failed to send lead confirmation");
                false
            }
        };
        let notification_sent = match notification_result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(to = %notification.to, error = %e, "Failed to send lead notification");
                false
            }
        };

        LeadReceipt {
            confirmation_sent,
            notification_sent,
        }
    }
}
