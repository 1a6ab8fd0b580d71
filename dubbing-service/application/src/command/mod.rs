mod dub_video;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::CommandError;

pub use dub_video::{DubVideoCommand, DubVideoCommandHandler};

pub trait Command: Send + 'static {
    type Result: Send + 'static;

    fn command_type(&self) -> &'static str;
    fn command_id(&self) -> Uuid;
    fn validate(&self) -> Result<(), CommandError>;
}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Result, CommandError>;
}

/// Validates a command, then hands it to its handler.
pub struct CommandService<C: Command> {
    handler: Arc<dyn CommandHandler<C>>,
}

impl<C: Command> CommandService<C> {
    pub fn new(handler: Arc<dyn CommandHandler<C>>) -> Self {
        Self { handler }
    }

    pub async fn execute(&self, command: C) -> Result<C::Result, CommandError> {
        let command_type = command.command_type();
        let command_id = command.command_id();
        tracing::debug!(command_type, command_id = %command_id, "executing command");

        if let Err(error) = command.validate() {
            tracing::debug!(command_type, command_id = %command_id, error = %error, "command rejected");
            return Err(error);
        }

        let result = self.handler.handle(command).await;
        if let Err(error) = &result {
            tracing::debug!(command_type, command_id = %command_id, error = %error, "command failed");
        }
        result
    }
}
