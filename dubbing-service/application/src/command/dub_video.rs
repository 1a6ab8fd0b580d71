use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use dubbing_domain::TargetLanguage;

use crate::{Command, CommandError, CommandHandler, DubVideoRequest, DubVideoResponse, DubVideoUseCase};

#[derive(Debug, Clone)]
pub struct DubVideoCommand {
    id: Uuid,
    pub request: DubVideoRequest,
}

impl DubVideoCommand {
    pub fn new(request: DubVideoRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
        }
    }
}

impl Command for DubVideoCommand {
    type Result = DubVideoResponse;

    fn command_type(&self) -> &'static str {
        "dub_video"
    }

    fn command_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.request
            .validate()
            .map_err(|errors| CommandError::validation("invalid_request", errors.to_string()))?;

        if self.request.target_lang.parse::<TargetLanguage>().is_err() {
            return Err(CommandError::validation(
                "unsupported_language",
                format!("unsupported target language `{}`", self.request.target_lang),
            ));
        }
        Ok(())
    }
}

pub struct DubVideoCommandHandler {
    usecase: Arc<dyn DubVideoUseCase>,
}

impl DubVideoCommandHandler {
    pub fn new(usecase: Arc<dyn DubVideoUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl CommandHandler<DubVideoCommand> for DubVideoCommandHandler {
    async fn handle(&self, command: DubVideoCommand) -> Result<DubVideoResponse, CommandError> {
        self.usecase
            .dub_video(command.request)
            .await
            .map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(link: &str, target_lang: &str) -> DubVideoCommand {
        DubVideoCommand::new(DubVideoRequest {
            link: link.to_string(),
            target_lang: target_lang.to_string(),
        })
    }

    #[test]
    fn well_formed_request_validates() {
        assert!(command("https://www.youtube.com/watch?v=abc", "fr_XX")
            .validate()
            .is_ok());
    }

    #[test]
    fn empty_link_is_rejected() {
        let error = command("", "fr_XX").validate().expect_err("invalid");
        assert_eq!(error.code(), "invalid_request");
    }

    #[test]
    fn overlong_link_is_rejected() {
        let link = format!("https://www.youtube.com/watch?v={}", "a".repeat(2048));
        assert!(command(&link, "fr_XX").validate().is_err());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let error = command("https://www.youtube.com/watch?v=abc", "xx_YY")
            .validate()
            .expect_err("invalid");
        assert_eq!(error.code(), "unsupported_language");
    }

    #[test]
    fn every_command_gets_its_own_id() {
        let first = command("https://www.youtube.com/watch?v=abc", "fr_XX");
        let second = command("https://www.youtube.com/watch?v=abc", "fr_XX");
        assert_ne!(first.command_id(), second.command_id());
    }
}
