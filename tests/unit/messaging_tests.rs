// Messaging unit tests

use async_trait::async_trait;
use mediaport::config::EmailSettings;
use mediaport::messaging::{
    Email, EmailProvider, MessageService, MessagingError, OutgoingEmail, SendGridProvider, Sms,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingProvider {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MessagingError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

fn settings() -> EmailSettings {
    EmailSettings {
        api_token: Some("SG.token".into()),
        sender_address: "noreply@example.com".into(),
        sender_name: "Example Shop".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_named_recipients_are_parsed() {
    let provider = Arc::new(RecordingProvider::default());
    let service = MessageService::with_provider(settings(), provider.clone());

    let report = service
        .send(&Email::new(
            "Jane Doe <jane@example.com>; bob@example.com",
            "Order shipped",
            "<b>On its way</b>",
        ))
        .await;

    assert_eq!(report.sent, 2);
    let sent = provider.sent.lock().unwrap();
    assert_eq!(sent[0].to.email, "jane@example.com");
    assert_eq!(sent[0].to.name.as_deref(), Some("Jane Doe"));
    assert_eq!(sent[1].to.email, "bob@example.com");
    assert!(sent.iter().all(|m| m.from.to_string() == "Example Shop <noreply@example.com>"));
    assert!(sent.iter().all(|m| m.html == "<b>On its way</b>"));
}

#[tokio::test]
async fn test_empty_recipient_list_sends_nothing() {
    let provider = Arc::new(RecordingProvider::default());
    let service = MessageService::with_provider(settings(), provider.clone());

    let report = service.send(&Email::new(" ; , ", "s", "m")).await;
    assert_eq!(report.sent + report.failed, 0);
    assert!(!report.skipped);
    assert!(provider.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_service_skips() {
    let service = MessageService::new(EmailSettings::default()).unwrap();
    let report = service.send(&Email::new("a@example.com", "s", "m")).await;
    assert!(report.skipped);
}

#[test]
fn test_sendgrid_requires_token() {
    assert!(SendGridProvider::new(&EmailSettings::default()).is_err());
    assert!(SendGridProvider::new(&settings()).is_ok());
}

#[test]
fn test_sms_phone_number_normalized() {
    let sms = Sms::new("+44", "(020) 7946-0018", "Your code is 1234");
    assert_eq!(sms.phone_number(), "+4402079460018");
}
