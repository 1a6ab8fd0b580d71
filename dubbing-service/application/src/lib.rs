pub mod command;
pub mod dto;
pub mod error;
pub mod pipeline;
pub mod stage;
pub mod usecase;

pub use command::*;
pub use dto::*;
pub use error::*;
pub use pipeline::{PipelineDefinition, PipelineEngine, PipelineStepLoader, PipelineStepSpec};
pub use stage::*;
pub use usecase::{DubVideoUseCase, DubVideoUseCaseImpl};
