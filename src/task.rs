//! To-do tasks

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::category::Category;
use crate::error::DecodeError;

/// A to-do task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// The display name of the task. Any text, including quotes and backslashes
    name: String,
    /// The day this task is due
    due_date: NaiveDate,
    category: Category,

    done: bool,
    urgent: bool,
}

impl Task {
    /// Create a brand new Task, that is neither done nor urgent
    pub fn new(name: String, due_date: NaiveDate, category: Category) -> Self {
        Self::new_with_parameters(name, due_date, category, false, false)
    }

    /// Create a new Task instance, with every field specified (e.g. when decoding it)
    pub fn new_with_parameters(name: String, due_date: NaiveDate, category: Category, done: bool, urgent: bool) -> Self {
        Self { name, due_date, category, done, urgent }
    }

    pub fn name(&self) -> &str            { &self.name     }
    pub fn due_date(&self) -> NaiveDate   { self.due_date  }
    pub fn category(&self) -> Category    { self.category  }
    pub fn done(&self) -> bool            { self.done      }
    pub fn urgent(&self) -> bool          { self.urgent    }

    // Only a TaskList mutates its tasks after they are built
    pub(crate) fn set_done(&mut self, done: bool) {
        self.done = done;
    }
    pub(crate) fn set_urgent(&mut self, urgent: bool) {
        self.urgent = urgent;
    }
    pub(crate) fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = due_date;
    }

    /// Encode this task into a single text record. See [`crate::codec::encode`]
    pub fn encode(&self) -> String {
        crate::codec::encode(self)
    }

    /// Parse a single text record. See [`crate::codec::decode`]
    pub fn decode(record: &str) -> Result<Self, DecodeError> {
        crate::codec::decode(record)
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}", self.name, self.due_date.format(crate::codec::DATE_FORMAT), self.category.label())?;
        if self.urgent {
            write!(f, " [URGENT]")?;
        }
        if self.done {
            write!(f, " [DONE]")?;
        }
        Ok(())
    }
}
