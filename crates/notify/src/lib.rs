//! Outgoing mail for the contact form and lead capture.
//!
//! [`SmtpMailer`] delivers through the `lettre` async SMTP transport. The
//! [`Mailer`] trait lets the API swap in a recording double for tests.
//! [`LeadMailer`] composes and sends the two lead emails.

pub mod email;
pub mod lead;

pub use email::{EmailConfig, EmailError, Mailer, OutgoingEmail, SmtpMailer};
pub use lead::{Lead, LeadMailer, LeadReceipt};
