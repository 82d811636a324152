use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::llm::{
    action_items_prompt, attendees_prompt, key_points_prompt, parse_action_items,
    parse_string_list, CompletionService,
};
use crate::models::MinutesRecord;
use crate::stages::{run_pipeline, PipelineStage};

/// Extract attendee names and roles from the transcript.
pub struct ExtractAttendees;

#[async_trait]
impl PipelineStage<MinutesRecord> for ExtractAttendees {
    fn name(&self) -> &'static str {
        "extract_attendees"
    }

    async fn run(
        &self,
        mut record: MinutesRecord,
        llm: &dyn CompletionService,
    ) -> Result<MinutesRecord> {
        let response = llm.complete(&attendees_prompt(&record.transcript)).await?;
        debug!("Attendees response: {}", response);

        record.attendees = parse_string_list(&response);
        info!("Parsed {} attendees", record.attendees.len());
        Ok(record)
    }
}

/// Extract key discussion points from the transcript.
pub struct ExtractKeyPoints;

#[async_trait]
impl PipelineStage<MinutesRecord> for ExtractKeyPoints {
    fn name(&self) -> &'static str {
        "extract_key_points"
    }

    async fn run(
        &self,
        mut record: MinutesRecord,
        llm: &dyn CompletionService,
    ) -> Result<MinutesRecord> {
        let response = llm.complete(&key_points_prompt(&record.transcript)).await?;
        debug!("Key points response: {}", response);

        record.key_points = parse_string_list(&response);
        info!("Parsed {} key points", record.key_points.len());
        Ok(record)
    }
}

/// Extract action items and assignees from the transcript.
pub struct ExtractActionItems;

#[async_trait]
impl PipelineStage<MinutesRecord> for ExtractActionItems {
    fn name(&self) -> &'static str {
        "extract_action_items"
    }

    async fn run(
        &self,
        mut record: MinutesRecord,
        llm: &dyn CompletionService,
    ) -> Result<MinutesRecord> {
        let response = llm
            .complete(&action_items_prompt(&record.transcript))
            .await?;
        debug!("Action items response: {}", response);

        record.action_items = parse_action_items(&response);
        info!("Parsed {} action items", record.action_items.len());
        Ok(record)
    }
}

/// Aggregate the extracted fields into the final minutes document.
/// Deterministic; makes no LLM call.
pub struct BuildMinutes;

#[async_trait]
impl PipelineStage<MinutesRecord> for BuildMinutes {
    fn name(&self) -> &'static str {
        "build_minutes"
    }

    async fn run(
        &self,
        mut record: MinutesRecord,
        _llm: &dyn CompletionService,
    ) -> Result<MinutesRecord> {
        record.minutes = render_minutes(&record);
        Ok(record)
    }
}

/// Render the minutes document from the accumulated record.
///
/// Section headers and placeholder lines are fixed; an item with an empty
/// action is skipped, and an item without an assignee gets a bare bullet.
pub fn render_minutes(record: &MinutesRecord) -> String {
    let mut minutes = String::from("# Meeting Minutes\n\n");

    minutes.push_str("## Attendees\n");
    if record.attendees.is_empty() {
        minutes.push_str("- No attendees recorded\n");
    } else {
        for attendee in &record.attendees {
            minutes.push_str(&format!("- {}\n", attendee));
        }
    }
    minutes.push('\n');

    minutes.push_str("## Key Discussion Points\n");
    if record.key_points.is_empty() {
        minutes.push_str("- No key points recorded\n");
    } else {
        for point in &record.key_points {
            minutes.push_str(&format!("- {}\n", point));
        }
    }
    minutes.push('\n');

    minutes.push_str("## Action Items\n");
    if record.action_items.is_empty() {
        minutes.push_str("- No action items recorded\n");
    } else {
        for item in &record.action_items {
            if item.action.is_empty() {
                continue;
            }
            if item.assignee.is_empty() {
                minutes.push_str(&format!("- {}\n", item.action));
            } else {
                minutes.push_str(&format!("- {} (Assigned to: {})\n", item.action, item.assignee));
            }
        }
    }

    minutes
}

/// The minutes pipeline in execution order.
pub fn minutes_stages() -> Vec<Box<dyn PipelineStage<MinutesRecord>>> {
    vec![
        Box::new(ExtractAttendees),
        Box::new(ExtractKeyPoints),
        Box::new(ExtractActionItems),
        Box::new(BuildMinutes),
    ]
}

/// Run the full minutes pipeline over a transcript.
pub async fn run_minutes(
    llm: &dyn CompletionService,
    transcript: impl Into<String>,
) -> Result<MinutesRecord> {
    run_pipeline(&minutes_stages(), MinutesRecord::new(transcript), llm).await
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::io::SAMPLE_TRANSCRIPT;
    use crate::models::ActionItem;

    /// Stub completion service that replays a fixed script of responses.
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

    #[test]
    fn test_render_empty_record_uses_placeholders() {
        let record = MinutesRecord::new("");
        let minutes = render_minutes(&record);

        assert!(minutes.contains("- No attendees recorded"));
        assert!(minutes.contains("- No key points recorded"));
        assert!(minutes.contains("- No action items recorded"));
        assert_eq!(minutes.matches("- ").count(), 3);
    }

    #[test]
    fn test_render_action_item_with_assignee() {
        let mut record = MinutesRecord::new("");
        record.action_items = vec![ActionItem::new("Prepare doc", "Rachel")];

        let minutes = render_minutes(&record);
        assert!(minutes.contains("- Prepare doc (Assigned to: Rachel)"));
    }

    #[test]
    fn test_render_action_item_without_assignee() {
        let mut record = MinutesRecord::new("");
        record.action_items = vec![ActionItem::new("Prepare doc", "")];

        let minutes = render_minutes(&record);
        assert!(minutes.contains("- Prepare doc\n"));
        assert!(!minutes.contains("Assigned to"));
    }

    #[test]
    fn test_render_skips_items_with_empty_action() {
        let mut record = MinutesRecord::new("");
        record.action_items = vec![
            ActionItem::new("", "Rachel"),
            ActionItem::new("Prepare doc", "Rachel"),
        ];

        let minutes = render_minutes(&record);
        assert!(!minutes.contains("No action items recorded"));
        assert_eq!(minutes.matches("Assigned to").count(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut record = MinutesRecord::new("");
        record.attendees = vec!["Sarah (Project Manager)".to_string()];
        record.key_points = vec!["Timeline agreed".to_string()];
        record.action_items = vec![ActionItem::new("Prepare doc", "Rachel")];

        assert_eq!(render_minutes(&record), render_minutes(&record));
    }

    #[tokio::test]
    async fn test_minutes_pipeline_end_to_end() {
        let llm = Scripted::new(&[
            r#"["Sarah (Project Manager)", "David (UX Designer)", "Michael (Backend Developer)", "Jennifer (Healthcare Specialist)", "Rachel (AI Engineer)"]"#,
            r#"["HIPAA compliance is a priority", "Prototype targeted in 6 weeks"]"#,
            r#"[{"action": "Prepare NLP methodology doc", "assignee": "Rachel"}]"#,
        ]);

        let record = run_minutes(&llm, SAMPLE_TRANSCRIPT).await.unwrap();

        assert_eq!(record.attendees.len(), 5);
        assert_eq!(record.key_points.len(), 2);
        assert_eq!(record.action_items.len(), 1);

        let attendees_at = record.minutes.find("## Attendees").unwrap();
        let key_points_at = record.minutes.find("## Key Discussion Points").unwrap();
        let actions_at = record.minutes.find("## Action Items").unwrap();
        assert!(attendees_at < key_points_at && key_points_at < actions_at);
        assert!(record
            .minutes
            .contains("- Prepare NLP methodology doc (Assigned to: Rachel)"));
    }

    #[tokio::test]
    async fn test_minutes_pipeline_defaults_on_unparseable_output() {
        let llm = Scripted::new(&[
            "The attendees were Sarah, David, Michael, Jennifer and Rachel.",
            "no list here either",
            "nor here",
        ]);

        let record = run_minutes(&llm, "short transcript").await.unwrap();

        assert!(record.attendees.is_empty());
        assert!(record.key_points.is_empty());
        assert!(record.action_items.is_empty());
        assert!(record.minutes.contains("- No attendees recorded"));
    }

    #[tokio::test]
    async fn test_minutes_pipeline_aborts_on_completion_error() {
        // Script exhausted after the first call: the second stage's error
        // must propagate, not default.
        let llm = Scripted::new(&[r#"["Sarah (Project Manager)"]"#]);

        let result = run_minutes(&llm, "short transcript").await;
        assert!(result.is_err());
    }
}
