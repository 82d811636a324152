use serde::{Deserialize, Serialize};

/// Accumulating record for the question pipeline.
///
/// Same ownership rule as [`MinutesRecord`](crate::models::MinutesRecord):
/// one writer per field, record only grows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionRecord {
    /// Input question, immutable once set.
    pub question: String,
    /// Free-form answer text.
    pub answer: String,
    /// Single-word category, e.g. "science".
    pub category: String,
    /// Tags with importance weights in 0..=1.
    pub tags: Vec<WeightedTag>,
}

impl QuestionRecord {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }
}

/// A tag with an importance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTag {
    pub tag: String,
    pub weight: f64,
}

impl WeightedTag {
    pub fn new(tag: impl Into<String>, weight: f64) -> Self {
        Self {
            tag: tag.into(),
            weight,
        }
    }
}
