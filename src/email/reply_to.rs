use crate::domain::MessageEnvelope;

/// Works out where replies to a message should go.
///
/// Implementations own the routing policy entirely (per-thread inboxes, a shared
/// support address, ...). The dispatcher only pairs the result with
/// [`MessageEnvelope::reply_to_name`].
pub trait ReplyToResolver: Send + Sync {
    fn reply_to_address(&self, envelope: &MessageEnvelope) -> Option<String>;
}

/// Never sets a reply-to address.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReplyTo;

impl ReplyToResolver for NoReplyTo {
    fn reply_to_address(&self, _envelope: &MessageEnvelope) -> Option<String> {
        None
    }
}

/// Sends every reply to the same configured address.
#[derive(Debug, Clone)]
pub struct StaticReplyTo {
    address: String,
}

impl StaticReplyTo {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl ReplyToResolver for StaticReplyTo {
    fn reply_to_address(&self, _envelope: &MessageEnvelope) -> Option<String> {
        Some(self.address.clone())
    }
}
