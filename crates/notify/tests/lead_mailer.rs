//! Lead delivery with recording and partially failing mailers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vitrine_notify::{EmailError, Lead, LeadMailer, LeadReceipt, Mailer, OutgoingEmail};

/// Records every message; fails for recipients in `reject`.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    reject: Vec<String>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        if self.reject.contains(&email.to) {
            return Err(EmailError::Build("rejected by test".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn lead() -> Lead {
    Lead {
        email: "client@exemple.fr".into(),
        name: None,
        summary: None,
        message: Some("Bonjour".into()),
    }
}

#[tokio::test]
async fn both_emails_are_sent() {
    let recorder = Arc::new(RecordingMailer::default());
    let mailer = LeadMailer::new(Some(recorder.clone()), "leads@agence.test");

    let receipt = mailer.send(&lead()).await;

    assert_eq!(
        receipt,
        LeadReceipt {
            confirmation_sent: true,
            notification_sent: true
        }
    );
    let mut recipients: Vec<_> = recorder
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|e| e.to.clone())
        .collect();
    recipients.sort();
    assert_eq!(recipients, ["client@exemple.fr", "leads@agence.test"]);
}

#[tokio::test]
async fn one_failure_does_not_block_the_other() {
    let recorder = Arc::new(RecordingMailer {
        reject: vec!["client@exemple.fr".into()],
        ..Default::default()
    });
    let mailer = LeadMailer::new(Some(recorder.clone()), "leads@agence.test");

    let receipt = mailer.send(&lead()).await;

    assert!(!receipt.confirmation_sent);
    assert!(receipt.notification_sent);
    let sent = recorder.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body.contains("Bonjour"));
}
