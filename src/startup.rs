use crate::catchers::*;
use crate::configuration::{ApplicationSettings, Settings};
use crate::email::{
    Dispatcher, LettreSmtpSender, NoReplyTo, ReplyToResolver, SesConnector, StaticReplyTo,
};
use crate::routes::*;
use rocket::{Build, Config, Rocket};
use std::sync::Arc;

/// Wires the configured backends into a [`Dispatcher`].
pub fn build_dispatcher(configuration: &Settings) -> Result<Dispatcher, anyhow::Error> {
    let smtp_sender = LettreSmtpSender::new(&configuration.smtp)?;
    let bulk_connector = SesConnector::new(configuration.dispatch.bulk.region.clone());
    let reply_to: Arc<dyn ReplyToResolver> = match &configuration.dispatch.reply_to_address {
        Some(address) => Arc::new(StaticReplyTo::new(address.clone())),
        None => Arc::new(NoReplyTo),
    };
    Ok(Dispatcher::new(
        configuration.dispatch.configuration(),
        Arc::new(smtp_sender),
        Arc::new(bulk_connector),
        reply_to,
    ))
}

pub fn build(settings: &ApplicationSettings, dispatcher: Dispatcher) -> Rocket<Build> {
    rocket::custom(Config {
        port: settings.port.unwrap_or(0),
        address: settings.host,
        ..Config::debug_default()
    })
    .manage(dispatcher)
    .mount("/", routes![health_check::health_check, deliver])
    .register("/", catchers![unprocessable_entity_to_bad_request])
}
