use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::llm::CompletionService;

/// One unit of work in a pipeline: consume the record, return it with one
/// more field set. Stages never mutate fields written by earlier stages.
#[async_trait]
pub trait PipelineStage<R>: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, record: R, llm: &dyn CompletionService) -> Result<R>;
}

/// Run the stages strictly in order, threading the record from one to the
/// next. The first stage error aborts the run; parse fallbacks inside a
/// stage are not errors.
pub async fn run_pipeline<R: Send>(
    stages: &[Box<dyn PipelineStage<R>>],
    mut record: R,
    llm: &dyn CompletionService,
) -> Result<R> {
    let total = stages.len();

    for (index, stage) in stages.iter().enumerate() {
        info!("Stage {}/{}: {}", index + 1, total, stage.name());
        record = stage.run(record, llm).await?;
    }

    Ok(record)
}
