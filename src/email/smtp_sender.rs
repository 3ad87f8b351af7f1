use crate::configuration::SmtpSettings;
use crate::email::{SmtpSender, StandardMessage};
use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

/// SMTP delivery through lettre's async transport.
pub struct LettreSmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl LettreSmtpSender {
    pub fn new(settings: &SmtpSettings) -> Result<Self, anyhow::Error> {
        let mut builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .context("Failed to create SMTP transport")?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };
        builder = builder.port(settings.port).timeout(Some(settings.timeout()));

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose_secret().clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

pub(crate) fn build_message(message: &StandardMessage) -> Result<Message, anyhow::Error> {
    let from: Mailbox = message
        .from
        .parse()
        .with_context(|| format!("Invalid sender address {}", message.from))?;
    let mut builder = Message::builder()
        .from(from)
        .subject(message.subject.as_str())
        .header(message.auto_submitted);

    for to in &message.to {
        let mailbox: Mailbox = to
            .parse()
            .with_context(|| format!("Invalid recipient address {}", to))?;
        builder = builder.to(mailbox);
    }

    if let Some(reply_to) = &message.reply_to {
        let mailbox: Mailbox = reply_to
            .parse()
            .with_context(|| format!("Invalid reply-to address {}", reply_to))?;
        builder = builder.reply_to(mailbox);
    }

    let email = match (&message.text, &message.html) {
        (Some(text), Some(html)) => builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html.clone()),
                ),
        ),
        (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text.clone()),
        (None, Some(html)) => builder.header(ContentType::TEXT_HTML).body(html.clone()),
        (None, None) => builder.header(ContentType::TEXT_PLAIN).body(String::new()),
    };
    email.context("Failed to build email")
}

#[async_trait]
impl SmtpSender for LettreSmtpSender {
    #[tracing::instrument(name = "Send email over SMTP", skip(self, message))]
    async fn send(&self, message: &StandardMessage) -> Result<(), anyhow::Error> {
        let email = build_message(message)?;
        self.transport
            .send(email)
            .await
            .context("SMTP server rejected the email")?;
        Ok(())
    }
}
