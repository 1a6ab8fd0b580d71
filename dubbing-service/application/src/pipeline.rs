use std::sync::Arc;

use dubbing_domain::{DomainError, DubbingContext, PipelineStage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStepSpec {
    pub name: String,
}

impl PipelineStepSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDefinition {
    pub steps: Vec<PipelineStepSpec>,
}

impl PipelineDefinition {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: names.into_iter().map(PipelineStepSpec::new).collect(),
        }
    }

    pub fn ordered_steps(&self) -> &[PipelineStepSpec] {
        &self.steps
    }
}

pub trait PipelineStepLoader: Send + Sync {
    fn load_step(&self, step: &PipelineStepSpec) -> Result<Arc<dyn PipelineStage>, DomainError>;
}

#[derive(Default)]
pub struct PipelineEngine {
    stages: Vec<Arc<dyn PipelineStage>>,
}

impl PipelineEngine {
    pub fn new(stages: Vec<Arc<dyn PipelineStage>>) -> Self {
        Self { stages }
    }

    pub fn push_stage(&mut self, stage: Arc<dyn PipelineStage>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn from_definition(
        definition: &PipelineDefinition,
        loader: &dyn PipelineStepLoader,
    ) -> Result<Self, DomainError> {
        if definition.steps.is_empty() {
            return Err(DomainError::internal_error(
                "pipeline definition has no steps",
            ));
        }

        let mut stages = Vec::with_capacity(definition.steps.len());
        for step in definition.ordered_steps() {
            stages.push(loader.load_step(step)?);
        }
        Ok(Self::new(stages))
    }

    /// Runs every stage in order. The first failing stage aborts the run.
    pub async fn run(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        for stage in &self.stages {
            tracing::debug!(
                session_id = %context.session_id,
                stage = stage.name(),
                "executing stage"
            );
            if let Err(error) = stage.execute(context).await {
                tracing::debug!(
                    session_id = %context.session_id,
                    stage = stage.name(),
                    error = %error,
                    "stage failed"
                );
                return Err(error);
            }
        }
        Ok(())
    }
}
