//! Note domain model.
//!
//! # Responsibility
//! - Own a single todo entry: title, completion flag and lifecycle stamps.
//! - Enforce title validation before any mutation.
//!
//! # Invariants
//! - `title.trim()` is never empty.
//! - `created_at` never changes after construction.
//! - `updated_at`, when set, is `>= created_at`.
//! - `is_completed` never goes back to `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors for note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Read-only copy of a note's observable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSnapshot {
    pub title: String,
    pub is_completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last edit or completion.
    pub updated_at: Option<i64>,
}

impl Display for NoteSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mark = if self.is_completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {} (created_at={}", self.title, self.created_at)?;
        match self.updated_at {
            Some(updated_at) => write!(f, ", updated_at={updated_at})"),
            None => write!(f, ")"),
        }
    }
}

/// A single todo entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    is_completed: bool,
    created_at: i64,
    updated_at: Option<i64>,
}

impl Note {
    /// Creates an incomplete note stamped with `now_epoch_ms`.
    ///
    /// The title is stored as given; only the emptiness check trims.
    ///
    /// # Errors
    /// - `NoteValidationError::EmptyTitle` when `title` is blank.
    pub fn new(title: impl Into<String>, now_epoch_ms: i64) -> Result<Self, NoteValidationError> {
        let title = validate_title(title.into())?;
        Ok(Self {
            title,
            is_completed: false,
            created_at: now_epoch_ms,
            updated_at: None,
        })
    }

    /// Replaces the title and stamps `updated_at`.
    ///
    /// Setting the same title again still stamps.
    ///
    /// # Errors
    /// - `NoteValidationError::EmptyTitle` when `title` is blank; the note is
    ///   left untouched.
    pub fn edit(
        &mut self,
        title: impl Into<String>,
        now_epoch_ms: i64,
    ) -> Result<(), NoteValidationError> {
        self.title = validate_title(title.into())?;
        self.touch(now_epoch_ms);
        Ok(())
    }

    /// Marks the note completed and stamps `updated_at`.
    ///
    /// Re-entrant: an already completed note stays completed but still gets
    /// a fresh `updated_at`.
    pub fn mark_as_completed(&mut self, now_epoch_ms: i64) {
        self.is_completed = true;
        self.touch(now_epoch_ms);
    }

    /// Returns a snapshot of the observable fields.
    pub fn info(&self) -> NoteSnapshot {
        NoteSnapshot {
            title: self.title.clone(),
            is_completed: self.is_completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    fn touch(&mut self, now_epoch_ms: i64) {
        // A clock running backwards must not break `updated_at >= created_at`.
        self.updated_at = Some(now_epoch_ms.max(self.created_at));
    }
}

fn validate_title(title: String) -> Result<String, NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    Ok(title)
}
