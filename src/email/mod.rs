mod bulk;
mod dispatcher;
mod reply_to;
mod ses_email_client;
mod smtp_sender;
mod standard;

use crate::domain::{EnvelopeError, FormatAddressError, MessageEnvelope};
use crate::error::error_chain_fmt;
use async_trait::async_trait;

pub use bulk::{BulkBackend, BulkMailClient, BulkMailConnector};
pub use dispatcher::{BulkCredentials, DispatchConfiguration, Dispatcher, SenderIdentity};
pub use reply_to::{NoReplyTo, ReplyToResolver, StaticReplyTo};
pub use ses_email_client::{SesConnector, SesEmailClient};
pub use smtp_sender::LettreSmtpSender;
pub use standard::{AutoSubmitted, SmtpSender, StandardBackend, StandardMessage};

/// A way of getting a [`MessageEnvelope`] to its recipients.
#[async_trait]
pub trait DeliveryBackend: Send + Sync {
    async fn deliver(&self, envelope: &MessageEnvelope) -> Result<(), DeliveryError>;

    fn name(&self) -> &'static str;
}

#[derive(thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Transport(anyhow::Error),
    #[error("deliver email by bulk backend failed!")]
    BulkDeliveryRejected,
    #[error("Invalid mail address")]
    InvalidAddress(#[from] FormatAddressError),
    #[error(transparent)]
    InvalidEnvelope(#[from] EnvelopeError),
}

impl std::fmt::Debug for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
