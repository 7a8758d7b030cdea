use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use unisg_menu::calendar::today_local;
use unisg_menu::export::{today_records, week_records};
use unisg_menu::lambda::{Scope, parse_payload};
use unisg_menu::{Config, logging, scrape_week, source};

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let scope: Scope = parse_payload(&event, "scope").unwrap_or_default();
    let config = Config::from_env();
    let client = source::build_client(&config)?;

    let snapshot = scrape_week(&client, &config).await?;
    let today = today_local();
    let source_url = snapshot.source_url.as_str();
    let records = match scope {
        Scope::Today => today_records(&snapshot.menu, today, source_url),
        Scope::Week => week_records(&snapshot.menu, today, source_url),
    };
    tracing::info!(?scope, records = records.len(), "lambda response");

    Ok(serde_json::to_value(records)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_lambda_logger();
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    lambda_runtime::run(service_fn(handler)).await
}
