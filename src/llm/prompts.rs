//! Prompt builders, one per LLM stage. Each embeds a single input field and
//! asks for machine-parseable output; the parsers in [`crate::llm::extract`]
//! tolerate the model ignoring that request.

/// Prompt for extracting attendee names and roles from a transcript.
pub fn attendees_prompt(transcript: &str) -> String {
    format!(
        "Extract the names and roles of all attendees from the following meeting transcript.\n\
         Return ONLY a valid JSON list of strings, with each string in the format 'Name (Role)'.\n\
         Do not include any other text or explanations.\n\
         \n\
         Transcript:\n\
         {transcript}\n"
    )
}

/// Prompt for extracting key discussion points from a transcript.
pub fn key_points_prompt(transcript: &str) -> String {
    format!(
        "Extract the key discussion points from the following meeting transcript.\n\
         Return ONLY a valid JSON list of strings, with each string representing one key point discussed.\n\
         Focus on the main topics, decisions, and important considerations mentioned.\n\
         Do not include any other text or explanations.\n\
         \n\
         Transcript:\n\
         {transcript}\n"
    )
}

/// Prompt for extracting action items and assignees from a transcript.
pub fn action_items_prompt(transcript: &str) -> String {
    format!(
        "Extract all action items and their assignees from the following meeting transcript.\n\
         Return ONLY a valid JSON list of objects, where each object has the keys 'action' and 'assignee'.\n\
         The 'action' value should be the task to be completed, and the 'assignee' value should be the person responsible.\n\
         Focus on explicit tasks that were assigned to specific people.\n\
         Do not include any other text or explanations.\n\
         \n\
         Transcript:\n\
         {transcript}\n"
    )
}

/// Prompt for answering a question in free-form text.
pub fn answer_prompt(question: &str) -> String {
    format!("Answer this question in a readable way: {question}")
}

/// Prompt for classifying a question into a single-word category.
pub fn category_prompt(question: &str) -> String {
    format!("Classify this question into a single word category: {question}")
}

/// Prompt for generating weighted tags for a question.
pub fn tags_prompt(question: &str) -> String {
    format!(
        "Generate 4 tags for this question with weights (0-1) showing importance.\n\
         Return ONLY valid JSON in this exact format:\n\
         {{\"tags\": [\n\
             {{\"tag\": \"example_tag1\", \"weight\": 0.9}},\n\
             {{\"tag\": \"example_tag2\", \"weight\": 0.8}}\n\
         ]}}\n\
         \n\
         Question: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_input() {
        assert!(attendees_prompt("the transcript").contains("the transcript"));
        assert!(key_points_prompt("the transcript").contains("the transcript"));
        assert!(action_items_prompt("the transcript").contains("the transcript"));
        assert!(answer_prompt("why?").contains("why?"));
        assert!(category_prompt("why?").contains("why?"));
        assert!(tags_prompt("why?").contains("why?"));
    }

    #[test]
    fn test_tags_prompt_shows_json_shape() {
        let prompt = tags_prompt("q");
        assert!(prompt.contains(r#"{"tags": ["#));
        assert!(prompt.contains(r#""weight": 0.9"#));
    }
}
