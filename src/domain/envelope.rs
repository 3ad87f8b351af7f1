/// Destination of a message: a single address or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            Recipients::One(address) => vec![address.clone()],
            Recipients::Many(addresses) => addresses.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Recipients::One(address) => address.is_empty(),
            Recipients::Many(addresses) => addresses.is_empty(),
        }
    }

    pub fn has_blank_address(&self) -> bool {
        match self {
            Recipients::One(address) => address.trim().is_empty(),
            Recipients::Many(addresses) => addresses.iter().any(|a| a.trim().is_empty()),
        }
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Recipients::One(address.to_owned())
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Recipients::One(address)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Recipients::Many(addresses)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addresses: Vec<&str>) -> Self {
        Recipients::Many(addresses.into_iter().map(str::to_owned).collect())
    }
}

/// One outgoing email, independent of the backend that will deliver it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageEnvelope {
    pub to: Recipients,
    #[serde(default)]
    pub from_name: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_body: Option<String>,
    /// Set for notifications, absent for replies to incoming mail.
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub reply_to_name: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("The message has no recipients.")]
    NoRecipients,
    #[error("The message has a blank recipient address.")]
    BlankRecipient,
    #[error("The message has neither a text nor an HTML body.")]
    MissingContent,
}

impl MessageEnvelope {
    pub fn new(to: impl Into<Recipients>, subject: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from_name: None,
            subject: subject.into(),
            body: None,
            html_body: None,
            context: None,
            reply_to_name: None,
        }
    }

    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn html_body(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn reply_to_name(mut self, name: impl Into<String>) -> Self {
        self.reply_to_name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if self.to.is_empty() {
            return Err(EnvelopeError::NoRecipients);
        }
        if self.to.has_blank_address() {
            return Err(EnvelopeError::BlankRecipient);
        }
        if self.body.is_none() && self.html_body.is_none() {
            return Err(EnvelopeError::MissingContent);
        }
        Ok(())
    }
}
