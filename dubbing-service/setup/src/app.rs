use std::sync::Arc;

use anyhow::Error;
use dubbing_application::{
    CommandService, DubVideoCommand, DubVideoCommandHandler, DubVideoUseCase, DubVideoUseCaseImpl,
};
use dubbing_configuration::{AppConfig, ServerConfig};
use dubbing_http_server::{create_app_routes, AppState};

use crate::ports::media_tools_config;
use crate::{PipelinePluginLoader, ServicePorts};

pub async fn build_and_run(config: AppConfig, server_config: ServerConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
    pub stage_names: Vec<&'static str>,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        let ports = ServicePorts::from_config(&config)?;
        Self::with_ports(config, ports).await
    }

    /// Wires the pipeline and HTTP state around already-built adapters.
    pub async fn with_ports(config: AppConfig, ports: ServicePorts) -> Result<Self, Error> {
        tracing::info!(
            pipeline = %config.service.pipeline.selected,
            sample_rate_hz = config.service.audio.sample_rate_hz,
            work_dir = %config.service.paths.work_dir.display(),
            failure_policy = ?config.service.translation.failure_policy,
            "initializing dubbing application"
        );

        tokio::fs::create_dir_all(&config.service.paths.work_dir)
            .await
            .map_err(|err| {
                anyhow::anyhow!(
                    "failed to create work dir {}: {err}",
                    config.service.paths.work_dir.display()
                )
            })?;

        let engine = PipelinePluginLoader::new(config.clone(), ports).assemble()?;
        let stage_names = engine.stage_names();
        tracing::info!(stages = ?stage_names, "pipeline assembled");

        let usecase: Arc<dyn DubVideoUseCase> = Arc::new(DubVideoUseCaseImpl::new(
            engine,
            config.service.audio.sample_rate_hz,
        ));
        let handler = Arc::new(DubVideoCommandHandler::new(usecase));
        let command_service: CommandService<DubVideoCommand> = CommandService::new(handler);
        let output_path = media_tools_config(&config).video_output;
        let state = AppState::new(Arc::new(command_service), output_path);

        Ok(Self {
            config,
            state,
            stage_names,
        })
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        tracing::info!(
            host = %server_config.host,
            port = server_config.port,
            "starting dubbing HTTP server"
        );

        create_app_routes(self.state, &server_config)
            .await
            .map_err(|err| anyhow::anyhow!("server startup failed: {err}"))
    }
}
