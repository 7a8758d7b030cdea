use clap::Parser;
use unisg_menu::routes::{AppState, router};
use unisg_menu::{Config, logging, source};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init_cli_logger(config.verbose);

    // Another dependency may already have installed a provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let client = source::build_client(&config)?;
    let bind = config.bind;
    tracing::info!(base_url = %config.base_url, "menu source");

    let app = router(AppState::new(client, config));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{bind}");
    axum::serve(listener, app).await?;

    Ok(())
}
