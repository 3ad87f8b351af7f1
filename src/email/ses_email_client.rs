use crate::domain::format_address;
use crate::email::{BulkCredentials, BulkMailClient, BulkMailConnector};
use async_trait::async_trait;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::model::{Body, Content, Destination, EmailContent, Message};
use secrecy::ExposeSecret;

/// Bulk backend client talking to the SES v2 HTTP API.
///
/// `account_name` is the verified sending address; the sender alias becomes
/// its display name.
pub struct SesEmailClient {
    ses_client: ses::Client,
    account_name: String,
    destinations: Vec<String>,
    text_body: Option<String>,
    html_body: Option<String>,
    sender_alias: Option<String>,
    subject: String,
}

impl SesEmailClient {
    pub fn new(ses_client: ses::Client, account_name: String) -> Self {
        Self {
            ses_client,
            account_name,
            destinations: Vec::new(),
            text_body: None,
            html_body: None,
            sender_alias: None,
            subject: String::new(),
        }
    }

    fn content(&self) -> EmailContent {
        let body = Body::builder()
            .set_text(self.text_body.as_deref().map(utf8_content))
            .set_html(self.html_body.as_deref().map(utf8_content))
            .build();
        let message = Message::builder()
            .subject(utf8_content(&self.subject))
            .body(body)
            .build();
        EmailContent::builder().simple(message).build()
    }
}

fn utf8_content(data: &str) -> Content {
    Content::builder().data(data).charset("UTF-8").build()
}

#[async_trait]
impl BulkMailClient for SesEmailClient {
    fn add_destinations(&mut self, addresses: &[String]) {
        self.destinations.extend_from_slice(addresses);
    }

    fn set_text_body(&mut self, body: &str) {
        self.text_body = Some(body.to_owned());
    }

    fn set_html_body(&mut self, body: &str) {
        self.html_body = Some(body.to_owned());
    }

    fn set_sender_alias(&mut self, alias: &str) {
        self.sender_alias = Some(alias.to_owned());
    }

    fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_owned();
    }

    #[tracing::instrument(name = "Send email through SES", skip(self))]
    async fn send(&mut self) -> bool {
        let from = match format_address(self.sender_alias.as_deref(), &self.account_name) {
            Ok(from) => from,
            Err(error) => {
                tracing::error!(error = %error, "Invalid SES sender address.");
                return false;
            }
        };
        let destination = Destination::builder()
            .set_to_addresses(Some(self.destinations.clone()))
            .build();

        let outcome = self
            .ses_client
            .send_email()
            .from_email_address(from)
            .destination(destination)
            .content(self.content())
            .send()
            .await;
        match outcome {
            Ok(_) => true,
            Err(error) => {
                tracing::error!(error.message = %error, "SES refused the email.");
                false
            }
        }
    }
}

/// Builds one [`SesEmailClient`] per delivery from static credentials.
#[derive(Debug, Clone)]
pub struct SesConnector {
    region: String,
}

impl SesConnector {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

impl BulkMailConnector for SesConnector {
    fn connect(&self, credentials: &BulkCredentials) -> Box<dyn BulkMailClient> {
        let ses_credentials = ses::Credentials::from_keys(
            credentials.api_key.expose_secret(),
            credentials.api_secret.expose_secret(),
            None,
        );
        let config = ses::Config::builder()
            .region(ses::Region::new(self.region.clone()))
            .credentials_provider(ses_credentials)
            .build();
        Box::new(SesEmailClient::new(
            ses::Client::from_conf(config),
            credentials.account_name.clone(),
        ))
    }
}
