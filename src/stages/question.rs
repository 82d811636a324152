use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::llm::{answer_prompt, category_prompt, parse_tags, tags_prompt, CompletionService};
use crate::models::QuestionRecord;
use crate::stages::{run_pipeline, PipelineStage};

/// Fallback question when none is supplied on the command line.
pub const DEFAULT_QUESTION: &str = "What is photosynthesis?";

/// Generate a free-form answer to the question.
pub struct GenerateAnswer;

#[async_trait]
impl PipelineStage<QuestionRecord> for GenerateAnswer {
    fn name(&self) -> &'static str {
        "generate_answer"
    }

    async fn run(
        &self,
        mut record: QuestionRecord,
        llm: &dyn CompletionService,
    ) -> Result<QuestionRecord> {
        let response = llm.complete(&answer_prompt(&record.question)).await?;
        debug!("Answer response: {}", response);

        record.answer = response.trim().to_string();
        Ok(record)
    }
}

/// Classify the question into a single-word category.
pub struct ClassifyQuestion;

#[async_trait]
impl PipelineStage<QuestionRecord> for ClassifyQuestion {
    fn name(&self) -> &'static str {
        "classify_question"
    }

    async fn run(
        &self,
        mut record: QuestionRecord,
        llm: &dyn CompletionService,
    ) -> Result<QuestionRecord> {
        let response = llm.complete(&category_prompt(&record.question)).await?;
        debug!("Category response: {}", response);

        record.category = response.trim().to_string();
        Ok(record)
    }
}

/// Generate weighted tags for the question.
pub struct GenerateTags;

#[async_trait]
impl PipelineStage<QuestionRecord> for GenerateTags {
    fn name(&self) -> &'static str {
        "generate_tags"
    }

    async fn run(
        &self,
        mut record: QuestionRecord,
        llm: &dyn CompletionService,
    ) -> Result<QuestionRecord> {
        let response = llm.complete(&tags_prompt(&record.question)).await?;
        debug!("Tags response: {}", response);

        record.tags = parse_tags(&response);
        info!("Parsed {} tags", record.tags.len());
        Ok(record)
    }
}

/// The question pipeline in execution order. The final aggregation is the
/// identity: all fields already coexist in the one record.
pub fn question_stages() -> Vec<Box<dyn PipelineStage<QuestionRecord>>> {
    vec![
        Box::new(GenerateAnswer),
        Box::new(ClassifyQuestion),
        Box::new(GenerateTags),
    ]
}

/// Run the full question pipeline over a single question.
pub async fn run_question(
    llm: &dyn CompletionService,
    question: impl Into<String>,
) -> Result<QuestionRecord> {
    run_pipeline(&question_stages(), QuestionRecord::new(question), llm).await
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::models::WeightedTag;

    struct Scripted {
        responses: Mutex<VecDeque<&'static str>>,
    }

    impl Scripted {
        fn new(responses: &[&'static str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().copied().collect()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for Scripted {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            let mut responses = self.responses.lock().unwrap();
            responses
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("scripted responses exhausted"))
        }
    }

    #[tokio::test]
    async fn test_question_pipeline_end_to_end() {
        let llm = Scripted::new(&[
            "Photosynthesis is how plants turn light into chemical energy.\n",
            "science",
            r#"{"tags": [{"tag": "plants", "weight": 0.9}, {"tag": "biology", "weight": 0.8}]}"#,
        ]);

        let record = run_question(&llm, DEFAULT_QUESTION).await.unwrap();

        assert_eq!(record.question, DEFAULT_QUESTION);
        assert_eq!(
            record.answer,
            "Photosynthesis is how plants turn light into chemical energy."
        );
        assert_eq!(record.category, "science");
        assert_eq!(record.tags.len(), 2);
        assert_eq!(record.tags[0], WeightedTag::new("plants", 0.9));
    }

    #[tokio::test]
    async fn test_question_pipeline_defaults_tags_on_bad_output() {
        let llm = Scripted::new(&[
            "An answer.",
            "general",
            "I am unable to produce tags right now.",
        ]);

        let record = run_question(&llm, "Anything?").await.unwrap();
        assert_eq!(record.tags, vec![WeightedTag::new("general", 1.0)]);
    }

    #[tokio::test]
    async fn test_question_record_serializes_for_dump() {
        let llm = Scripted::new(&[
            "An answer.",
            "science",
            r#"{"tags": [{"tag": "plants", "weight": 0.9}]}"#,
        ]);

        let record = run_question(&llm, "Q?").await.unwrap();
        let dump = serde_json::to_string_pretty(&record).unwrap();

        assert!(dump.contains("\"answer\""));
        assert!(dump.contains("\"category\""));
        assert!(dump.contains("\"tags\""));
    }
}
