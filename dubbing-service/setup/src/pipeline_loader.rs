use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use dubbing_application::{
    AudioExportStage, CaptionSegmentStage, MediaMuxStage, PipelineDefinition, PipelineEngine,
    PipelineStepLoader, PipelineStepSpec, SentenceDubStage, TimelineAssembleStage,
    TranscriptFetchStage, VideoFetchStage, AUDIO_EXPORT_STEP, CAPTION_SEGMENT_STEP,
    MEDIA_MUX_STEP, SENTENCE_DUB_STEP, TIMELINE_ASSEMBLE_STEP, TRANSCRIPT_FETCH_STEP,
    VIDEO_FETCH_STEP,
};
use dubbing_configuration::AppConfig;
use dubbing_domain::{DomainError, PipelineStage};

use crate::ServicePorts;

/// Builds the stage behind one configured step name.
pub trait PipelineStepPlugin: Send + Sync {
    fn name(&self) -> &'static str;
    fn build(&self, config: &AppConfig, ports: &ServicePorts) -> Result<Arc<dyn PipelineStage>>;
}

type StageFactory = fn(&AppConfig, &ServicePorts) -> Arc<dyn PipelineStage>;

/// A stage that only needs the shared ports and config to exist.
struct BuiltinStep {
    name: &'static str,
    factory: StageFactory,
}

impl PipelineStepPlugin for BuiltinStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn build(&self, config: &AppConfig, ports: &ServicePorts) -> Result<Arc<dyn PipelineStage>> {
        Ok((self.factory)(config, ports))
    }
}

const BUILTIN_STEPS: [(&str, StageFactory); 7] = [
    (TRANSCRIPT_FETCH_STEP, transcript_fetch),
    (CAPTION_SEGMENT_STEP, caption_segment),
    (SENTENCE_DUB_STEP, sentence_dub),
    (VIDEO_FETCH_STEP, video_fetch),
    (TIMELINE_ASSEMBLE_STEP, timeline_assemble),
    (AUDIO_EXPORT_STEP, audio_export),
    (MEDIA_MUX_STEP, media_mux),
];

fn transcript_fetch(_: &AppConfig, ports: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(TranscriptFetchStage::new(ports.transcripts.clone()))
}

fn caption_segment(_: &AppConfig, _: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(CaptionSegmentStage::new())
}

fn sentence_dub(config: &AppConfig, ports: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(SentenceDubStage::new(
        ports.translator.clone(),
        ports.synthesizer.clone(),
        config.service.translation.failure_policy,
    ))
}

fn video_fetch(_: &AppConfig, ports: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(VideoFetchStage::new(
        ports.video_fetcher.clone(),
        ports.probe.clone(),
    ))
}

fn timeline_assemble(_: &AppConfig, _: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(TimelineAssembleStage::new())
}

fn audio_export(_: &AppConfig, ports: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(AudioExportStage::new(ports.exporter.clone()))
}

fn media_mux(_: &AppConfig, ports: &ServicePorts) -> Arc<dyn PipelineStage> {
    Arc::new(MediaMuxStage::new(ports.muxer.clone()))
}

/// Turns the selected `service.pipeline` definition into a running engine.
pub struct PipelinePluginLoader {
    config: AppConfig,
    ports: ServicePorts,
    plugins: HashMap<&'static str, Arc<dyn PipelineStepPlugin>>,
}

impl PipelinePluginLoader {
    pub fn new(config: AppConfig, ports: ServicePorts) -> Self {
        let plugins = BUILTIN_STEPS
            .into_iter()
            .map(|(name, factory)| {
                let plugin: Arc<dyn PipelineStepPlugin> = Arc::new(BuiltinStep { name, factory });
                (name, plugin)
            })
            .collect();
        Self {
            config,
            ports,
            plugins,
        }
    }

    /// Adds a step, replacing any builtin of the same name.
    pub fn register(&mut self, plugin: Arc<dyn PipelineStepPlugin>) {
        self.plugins.insert(plugin.name(), plugin);
    }

    pub fn assemble(&self) -> Result<PipelineEngine> {
        let definition = self.selected_steps()?;
        PipelineEngine::from_definition(&definition, self)
            .map_err(|err| anyhow!("dubbing pipeline rejected: {err}"))
    }

    fn selected_steps(&self) -> Result<PipelineDefinition> {
        let pipeline = &self.config.service.pipeline;
        let selected = pipeline.selected.trim();
        if selected.is_empty() {
            bail!("`service.pipeline.selected` is blank");
        }
        let Some(definition) = pipeline.definitions.get(selected) else {
            bail!("no pipeline named `{selected}` under `service.pipeline.definitions`");
        };

        let mut names = Vec::with_capacity(definition.steps.len());
        for step in &definition.steps {
            let name = step.name().trim();
            if name.is_empty() {
                bail!("pipeline `{selected}` lists a step without a name");
            }
            names.push(name.to_string());
        }
        Ok(PipelineDefinition::new(names))
    }
}

impl PipelineStepLoader for PipelinePluginLoader {
    fn load_step(&self, step: &PipelineStepSpec) -> Result<Arc<dyn PipelineStage>, DomainError> {
        let Some(plugin) = self.plugins.get(step.name.as_str()) else {
            return Err(DomainError::internal_error(&format!(
                "no stage registered for step `{}`",
                step.name
            )));
        };

        plugin.build(&self.config, &self.ports).map_err(|err| {
            DomainError::internal_error(&format!("stage `{}` could not be built: {err}", step.name))
        })
    }
}
