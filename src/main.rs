use anyhow::Context;
use courier::configuration::get_configuration;
use courier::startup::{build, build_dispatcher};
use courier::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("courier".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let dispatcher = build_dispatcher(&configuration)?;
    build(&configuration.application, dispatcher).launch().await?;
    Ok(())
}
