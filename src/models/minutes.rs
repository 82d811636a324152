use serde::{Deserialize, Serialize};

/// Accumulating record for the minutes pipeline.
///
/// Each field is written by exactly one stage and never mutated afterward.
/// Stages take the record by value and hand back a new one with a single
/// additional field set, so there is no aliasing across stage boundaries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MinutesRecord {
    /// Raw meeting transcript, immutable once set.
    pub transcript: String,
    /// Attendee strings in "Name (Role)" form.
    pub attendees: Vec<String>,
    /// Key discussion points, one string per point.
    pub key_points: Vec<String>,
    /// Action items with their assignees.
    pub action_items: Vec<ActionItem>,
    /// Final formatted minutes document.
    pub minutes: String,
}

impl MinutesRecord {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Default::default()
        }
    }
}

/// A single action item; `assignee` is empty when nobody was named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub action: String,
    pub assignee: String,
}

impl ActionItem {
    pub fn new(action: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            assignee: assignee.into(),
        }
    }
}
