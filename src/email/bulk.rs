use crate::domain::MessageEnvelope;
use crate::email::{BulkCredentials, DeliveryBackend, DeliveryError};
use async_trait::async_trait;
use std::sync::Arc;

/// Call sequence exposed by a bulk-mail HTTP API client.
///
/// `send` reports rejection through its return value instead of an error;
/// [`BulkBackend`] is the only place that looks at it.
#[async_trait]
pub trait BulkMailClient: Send {
    fn add_destinations(&mut self, addresses: &[String]);

    fn set_text_body(&mut self, body: &str);

    fn set_html_body(&mut self, body: &str);

    fn set_sender_alias(&mut self, alias: &str);

    fn set_subject(&mut self, subject: &str);

    async fn send(&mut self) -> bool;
}

/// Builds a fresh client for every delivery.
pub trait BulkMailConnector: Send + Sync {
    fn connect(&self, credentials: &BulkCredentials) -> Box<dyn BulkMailClient>;
}

pub struct BulkBackend {
    connector: Arc<dyn BulkMailConnector>,
    credentials: BulkCredentials,
    default_sender_name: String,
}

impl BulkBackend {
    pub fn new(
        connector: Arc<dyn BulkMailConnector>,
        credentials: BulkCredentials,
        default_sender_name: String,
    ) -> Self {
        Self {
            connector,
            credentials,
            default_sender_name,
        }
    }
}

#[async_trait]
impl DeliveryBackend for BulkBackend {
    #[tracing::instrument(name = "Deliver through the bulk backend", skip(self, envelope))]
    async fn deliver(&self, envelope: &MessageEnvelope) -> Result<(), DeliveryError> {
        let mut client = self.connector.connect(&self.credentials);
        client.add_destinations(&envelope.to.as_vec());

        // Text wins over HTML: HTML-only mail (sign-up confirmations in
        // particular) gets flagged as spam by this backend.
        match (&envelope.body, &envelope.html_body) {
            (Some(body), _) => client.set_text_body(body),
            (None, Some(html_body)) => client.set_html_body(html_body),
            (None, None) => {}
        }

        client.set_sender_alias(
            envelope
                .from_name
                .as_deref()
                .unwrap_or(&self.default_sender_name),
        );
        client.set_subject(&envelope.subject);

        if client.send().await {
            Ok(())
        } else {
            Err(DeliveryError::BulkDeliveryRejected)
        }
    }

    fn name(&self) -> &'static str {
        "bulk"
    }
}
