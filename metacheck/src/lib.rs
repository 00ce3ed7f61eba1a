pub mod arguments;
pub mod pipeline;

pub use arguments::Args;
pub use pipeline::{PipelineConfig, PipelineSummary, default_output_path, run};
