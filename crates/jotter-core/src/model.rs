// ABOUTME: Defines the generic Record shape, the note and task payload variants, and input drafts.
// ABOUTME: Also holds field-bound validation and the Collection unit of persistence.

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field-bound violation detected before a draft reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Variant-specific record fields. Implementations supply the search and
/// validation behavior the engine needs without knowing the concrete shape.
pub trait Payload: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// True if `needle` occurs in any searchable payload field.
    /// `needle` must already be lowercased by the caller.
    fn matches(&self, needle: &str) -> bool;

    /// Completion flag, for variants that track one.
    fn done(&self) -> Option<bool> {
        None
    }

    /// Check variant field bounds.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Free-form note fields: body text plus an ordered tag list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePayload {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Payload for NotePayload {
    fn matches(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let len = self.content.chars().count();
        if !(1..=2000).contains(&len) {
            return Err(ValidationError::new(
                "content",
                format!("must be 1-2000 characters, got {len}"),
            ));
        }
        Ok(())
    }
}

/// Task fields: completion flag, priority, ordered label list, optional due date.
/// An absent due date is omitted from serialized output rather than written as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub done: bool,
    pub priority: u8,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Payload for TaskPayload {
    fn matches(&self, needle: &str) -> bool {
        self.labels
            .iter()
            .any(|l| l.to_lowercase().contains(needle))
    }

    fn done(&self) -> Option<bool> {
        Some(self.done)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.priority) {
            return Err(ValidationError::new(
                "priority",
                format!("must be between 1 and 5, got {}", self.priority),
            ));
        }
        Ok(())
    }
}

/// One stored note or task. The payload fields are flattened into the same
/// JSON object as the common fields, so a serialized note reads
/// `{"id":1,"created_at":...,"title":"...","content":"...","tags":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<P> {
    pub id: u64,
    pub created_at: f64,
    pub title: String,
    #[serde(flatten)]
    pub payload: P,
}

/// An incoming record body: everything the caller controls, nothing the
/// engine assigns. Shares the flattened wire shape with [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft<P> {
    pub title: String,
    #[serde(flatten)]
    pub payload: P,
}

impl<P: Payload> Draft<P> {
    /// Check the common title bound, then the variant fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let len = self.title.chars().count();
        if !(1..=120).contains(&len) {
            return Err(ValidationError::new(
                "title",
                format!("must be 1-120 characters, got {len}"),
            ));
        }
        self.payload.validate()
    }
}

/// The full ordered record sequence plus the id counter, the unit of
/// persistence. The array key is `notes` for every variant: the task
/// deployment inherited data files from the notes one and both share a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<P> {
    #[serde(rename = "notes")]
    pub records: Vec<Record<P>>,
    pub next_id: u64,
}

impl<P> Collection<P> {
    /// An empty collection with the id counter at its starting value.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Index of the record with the given id, if present.
    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

impl<P> Default for Collection<P> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Current wall-clock time as fractional seconds since the Unix epoch,
/// the unit `created_at` is stored in.
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
