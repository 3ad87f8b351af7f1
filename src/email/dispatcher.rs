use crate::domain::MessageEnvelope;
use crate::email::{
    BulkBackend, BulkMailConnector, DeliveryBackend, DeliveryError, ReplyToResolver, SmtpSender,
    StandardBackend,
};
use secrecy::Secret;
use std::sync::Arc;

/// Default outgoing identity, used when an envelope has no `from_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct BulkCredentials {
    pub account_name: String,
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct DispatchConfiguration {
    pub use_bulk_backend: bool,
    pub sender: SenderIdentity,
    pub bulk: BulkCredentials,
}

/// Routes each envelope to the standard or the bulk backend.
///
/// The configuration is owned by the dispatcher, so differently configured
/// dispatchers can live side by side in one process.
pub struct Dispatcher {
    use_bulk_backend: bool,
    standard: StandardBackend,
    bulk: BulkBackend,
}

impl Dispatcher {
    pub fn new(
        configuration: DispatchConfiguration,
        smtp_sender: Arc<dyn SmtpSender>,
        bulk_connector: Arc<dyn BulkMailConnector>,
        reply_to: Arc<dyn ReplyToResolver>,
    ) -> Self {
        let DispatchConfiguration {
            use_bulk_backend,
            sender,
            bulk,
        } = configuration;
        let bulk = BulkBackend::new(bulk_connector, bulk, sender.name.clone());
        let standard = StandardBackend::new(smtp_sender, reply_to, sender);
        Self {
            use_bulk_backend,
            standard,
            bulk,
        }
    }

    pub fn backend(&self) -> &dyn DeliveryBackend {
        if self.use_bulk_backend {
            &self.bulk
        } else {
            &self.standard
        }
    }

    #[tracing::instrument(
        name = "Dispatch an email",
        skip(self, envelope),
        fields(subject = %envelope.subject, backend = self.backend().name())
    )]
    pub async fn deliver(&self, envelope: &MessageEnvelope) -> Result<(), DeliveryError> {
        envelope.validate()?;
        self.backend().deliver(envelope).await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to deliver email.");
            e
        })?;
        tracing::info!("Email delivered.");
        Ok(())
    }
}
