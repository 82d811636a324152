pub mod io;
pub mod llm;
pub mod models;
pub mod stages;

pub use io::{load_transcript, SAMPLE_TRANSCRIPT};
pub use llm::{AzureOpenAiClient, AzureOpenAiConfig, CompletionError, CompletionService};
pub use models::{ActionItem, MinutesRecord, QuestionRecord, WeightedTag};
pub use stages::{
    minutes_stages, question_stages, render_minutes, run_minutes, run_pipeline, run_question,
    PipelineStage, DEFAULT_QUESTION,
};
