use anyhow::Result;
use dubbing_configuration::{load_config, setup_logging};
use dubbing_setup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    setup_logging(&config);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        pipeline = %config.service.pipeline.selected,
        "configuration loaded"
    );
    let server_config = config.server.clone();
    let app = Application::new(config).await?;
    app.run(server_config).await?;
    Ok(())
}
