use crate::email::{BulkCredentials, DispatchConfiguration, SenderIdentity};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub dispatch: DispatchSettings,
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub port: Option<u16>,
    pub host: IpAddr,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DispatchSettings {
    pub use_bulk_backend: bool,
    pub default_sender_name: String,
    pub default_sender_address: String,
    #[serde(default)]
    pub reply_to_address: Option<String>,
    pub bulk: BulkSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct BulkSettings {
    pub account_name: String,
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
    pub region: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    pub starttls: bool,
    pub timeout_milliseconds: u64,
}

impl DispatchSettings {
    pub fn configuration(&self) -> DispatchConfiguration {
        DispatchConfiguration {
            use_bulk_backend: self.use_bulk_backend,
            sender: SenderIdentity {
                name: self.default_sender_name.clone(),
                address: self.default_sender_address.clone(),
            },
            bulk: BulkCredentials {
                account_name: self.bulk.account_name.clone(),
                api_key: self.bulk.api_key.clone(),
                api_secret: self.bulk.api_secret.clone(),
            },
        }
    }
}

impl SmtpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let mut settings = config::Config::default();
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;
    settings.try_into()
}
