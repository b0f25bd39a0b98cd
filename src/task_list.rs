//! An ordered collection of tasks

use chrono::Days;

use crate::error::{Error, Result};
use crate::task::Task;

/// The list of tasks a user works with.
///
/// Tasks are stored in insertion order, and every index-based method addresses that storage order, so an index keeps
/// designating the same task whatever the mutations that reorder [`TaskList::list`].
/// Front ends display [`TaskList::indexed_list`] to know which index to send back for a displayed task.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole content of this list (e.g. by tasks that have just been loaded)
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The tasks, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The tasks, urgent ones first, then by ascending due date.
    ///
    /// Tasks that compare equal keep their insertion order. This is recomputed on every call.
    pub fn list(&self) -> Vec<&Task> {
        self.indexed_list()
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    /// Same order as [`Self::list`], with the index each task is addressed by
    pub fn indexed_list(&self) -> Vec<(usize, &Task)> {
        let mut indexed: Vec<(usize, &Task)> = self.tasks.iter().enumerate().collect();
        // sort_by_key is stable
        indexed.sort_by_key(|(_, task)| (task.urgent() == false, task.due_date()));
        indexed
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        self.check_index(index)?;
        Ok(&self.tasks[index])
    }

    pub fn mark_done(&mut self, index: usize) -> Result<()> {
        self.task_mut(index)?.set_done(true);
        Ok(())
    }

    pub fn mark_urgent(&mut self, index: usize) -> Result<()> {
        self.task_mut(index)?.set_urgent(true);
        Ok(())
    }

    /// Move the due date of a task by `days` (that can be negative)
    pub fn postpone(&mut self, index: usize, days: i64) -> Result<()> {
        let task = self.task_mut(index)?;
        let due_date = task.due_date();
        let shifted = if days >= 0 {
            due_date.checked_add_days(Days::new(days as u64))
        } else {
            due_date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        match shifted {
            Some(date) => {
                task.set_due_date(date);
                Ok(())
            },
            None => Err(Error::DateOverflow { days }),
        }
    }

    /// Remove every task that is done. The other ones keep their relative order
    pub fn remove_completed(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.done() == false);
        log::debug!("Removed {} completed tasks", before - self.tasks.len());
    }

    /// Remove a task. The indices of the tasks after it shift down by one
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange { index, len: self.tasks.len() })
        }
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
