use crate::domain::{format_address, FormatAddressError, MessageEnvelope};
use crate::email::{DeliveryBackend, DeliveryError, ReplyToResolver, SenderIdentity};
use async_trait::async_trait;
use lettre::message::header::{Header, HeaderName, HeaderValue};
use std::sync::Arc;

/// Value of the `Auto-Submitted` header (RFC 3834).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSubmitted {
    AutoGenerated,
    AutoReplied,
}

impl AutoSubmitted {
    pub fn for_envelope(envelope: &MessageEnvelope) -> Self {
        // notifications carry a context, bounce replies don't
        match envelope.context {
            Some(_) => AutoSubmitted::AutoGenerated,
            None => AutoSubmitted::AutoReplied,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoSubmitted::AutoGenerated => "auto-generated",
            AutoSubmitted::AutoReplied => "auto-replied",
        }
    }
}

impl Header for AutoSubmitted {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Auto-Submitted")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        match s.trim() {
            "auto-generated" => Ok(AutoSubmitted::AutoGenerated),
            "auto-replied" => Ok(AutoSubmitted::AutoReplied),
            other => Err(format!("{} is not a supported Auto-Submitted value", other).into()),
        }
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.as_str().to_owned())
    }
}

/// Everything the SMTP-style backend needs to put a message on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub reply_to: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub auto_submitted: AutoSubmitted,
}

#[async_trait]
pub trait SmtpSender: Send + Sync {
    async fn send(&self, message: &StandardMessage) -> Result<(), anyhow::Error>;
}

pub struct StandardBackend {
    sender: Arc<dyn SmtpSender>,
    reply_to: Arc<dyn ReplyToResolver>,
    identity: SenderIdentity,
}

impl StandardBackend {
    pub fn new(
        sender: Arc<dyn SmtpSender>,
        reply_to: Arc<dyn ReplyToResolver>,
        identity: SenderIdentity,
    ) -> Self {
        Self {
            sender,
            reply_to,
            identity,
        }
    }

    pub fn build_message(
        &self,
        envelope: &MessageEnvelope,
    ) -> Result<StandardMessage, DeliveryError> {
        let from_name = envelope
            .from_name
            .as_deref()
            .unwrap_or(&self.identity.name);
        let from = format_address(Some(from_name), &self.identity.address)?;
        let reply_to = self.reply_to_mailbox(envelope)?;

        Ok(StandardMessage {
            from,
            to: envelope.to.as_vec(),
            subject: envelope.subject.clone(),
            reply_to,
            text: envelope.body.clone(),
            html: envelope.html_body.clone(),
            auto_submitted: AutoSubmitted::for_envelope(envelope),
        })
    }

    fn reply_to_mailbox(
        &self,
        envelope: &MessageEnvelope,
    ) -> Result<Option<String>, FormatAddressError> {
        let address = match self
            .reply_to
            .reply_to_address(envelope)
            .filter(|address| !address.is_empty())
        {
            Some(address) => address,
            None => return Ok(None),
        };
        match envelope.reply_to_name.as_deref() {
            Some(name) if !name.is_empty() => format_address(Some(name), &address).map(Some),
            _ => Ok(Some(address)),
        }
    }
}

#[async_trait]
impl DeliveryBackend for StandardBackend {
    #[tracing::instrument(name = "Deliver through the standard backend", skip(self, envelope))]
    async fn deliver(&self, envelope: &MessageEnvelope) -> Result<(), DeliveryError> {
        let message = self.build_message(envelope)?;
        self.sender
            .send(&message)
            .await
            .map_err(DeliveryError::Transport)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
