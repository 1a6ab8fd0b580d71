pub mod app;
pub mod pipeline_loader;
pub mod ports;

pub use app::{build_and_run, Application};
pub use pipeline_loader::{PipelinePluginLoader, PipelineStepPlugin};
pub use ports::ServicePorts;
