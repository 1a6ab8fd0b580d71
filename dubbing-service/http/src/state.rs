use std::path::PathBuf;
use std::sync::Arc;

use dubbing_application::{CommandService, DubVideoCommand};

#[derive(Clone)]
pub struct AppState {
    pub command_service: Arc<CommandService<DubVideoCommand>>,
    /// File served by `/play_audio`.
    pub output_path: PathBuf,
}

impl AppState {
    pub fn new(command_service: Arc<CommandService<DubVideoCommand>>, output_path: PathBuf) -> Self {
        Self {
            command_service,
            output_path,
        }
    }
}
