use ffstudio_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, work dir, routes)
    let (_state, router) = ffstudio_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    ffstudio_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
