use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::Schedulable;

/// Priority given to a task when none is specified.
pub const DEFAULT_PRIORITY: u8 = 2;

/// Storage format for due timestamps.
pub const DUE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored to-do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub description: String,
    /// 1 (highest) to 3 (lowest).
    pub priority: u8,
    pub done: bool,
    /// Percent complete, 0 to 100.
    pub progress: u8,
    pub due: NaiveDateTime,
}

impl Schedulable for Todo {
    fn due(&self) -> NaiveDateTime {
        self.due
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

/// A to-do that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub priority: u8,
    pub progress: u8,
    pub due: NaiveDateTime,
}

impl NewTodo {
    /// Build a to-do from command-line words.
    ///
    /// The words are joined with single spaces and a trailing period is added
    /// when missing.
    #[must_use]
    pub fn from_words(words: &[String], priority: u8, progress: u8, due: NaiveDateTime) -> Self {
        let mut description = words.join(" ");
        if !description.ends_with('.') {
            description.push('.');
        }
        Self {
            description,
            priority,
            progress,
            due,
        }
    }
}

/// A partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub description: Option<String>,
    pub priority: Option<u8>,
    pub done: Option<bool>,
    pub progress: Option<u8>,
    pub due: Option<NaiveDateTime>,
}

impl TodoPatch {
    /// The patch applied by `complete`: done, at 100%.
    #[must_use]
    pub fn completed() -> Self {
        Self {
            done: Some(true),
            progress: Some(100),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.priority.is_none()
            && self.done.is_none()
            && self.progress.is_none()
            && self.due.is_none()
    }
}
