//! This module stores a task list into a local file

use std::path::{Path, PathBuf};

use crate::codec;
use crate::crypto;
use crate::error::Result;
use crate::task_list::TaskList;


/// Saves and loads a [`TaskList`] to and from a single backing file
///
/// Saving overwrites the whole file in place. This is not atomic: a crash while writing can leave a corrupted file,
/// that will then load as an empty list.
/// Nothing here is synchronized: callers that share a file between threads or processes must serialize their accesses.
#[derive(Clone, Debug, PartialEq)]
pub struct PersistenceService {
    backing_file: PathBuf,
}

impl PersistenceService {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            backing_file: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the backing file
    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    /// Store a task list to the backing file, optionally encrypted.
    ///
    /// Failures are logged, and otherwise ignored.
    pub fn save(&self, tasks: &TaskList, encrypt: bool, passphrase: &str) {
        match self.try_save(tasks, encrypt, passphrase) {
            Ok(()) => log::debug!("Saved {} tasks to {:?}", tasks.len(), self.backing_file),
            Err(err) => log::error!("Unable to save tasks to {:?}: {}", self.backing_file, err),
        }
    }

    /// Same as [`Self::save`], but returns the error instead of logging it
    pub fn try_save(&self, tasks: &TaskList, encrypt: bool, passphrase: &str) -> Result<()> {
        let mut content = codec::encode_list(tasks.tasks());
        if encrypt {
            content = crypto::encrypt(&content, passphrase)?;
        }
        std::fs::write(&self.backing_file, content)?;
        Ok(())
    }

    /// Load the task list from the backing file, that is optionally encrypted.
    ///
    /// When the file does not exist, it is created with an empty list.
    /// Any failure (unreadable file, wrong passphrase, invalid content) is logged, and results in an empty list.
    pub fn load(&self, decrypt: bool, passphrase: &str) -> TaskList {
        match self.try_load(decrypt, passphrase) {
            Ok(tasks) => tasks,
            Err(err) => {
                log::warn!("Unable to load tasks from {:?}: {}. Using an empty list", self.backing_file, err);
                TaskList::new()
            },
        }
    }

    /// Same as [`Self::load`], but returns the error instead of logging it (the bootstrap of a missing file still happens)
    pub fn try_load(&self, decrypt: bool, passphrase: &str) -> Result<TaskList> {
        if self.backing_file.exists() == false {
            log::info!("{:?} does not exist yet. Creating it with an empty task list", self.backing_file);
            let empty = TaskList::new();
            self.try_save(&empty, decrypt, passphrase)?;
            return Ok(empty);
        }

        let mut content = std::fs::read_to_string(&self.backing_file)?;
        if decrypt {
            content = crypto::decrypt(&content, passphrase)?;
        }
        let tasks = codec::decode_list(&content)?;
        Ok(TaskList::from(tasks))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use crate::{Category, Task};

    #[test]
    fn serde_task_list() {
        let dir = tempfile::tempdir().unwrap();
        let service = PersistenceService::new(dir.path().join("tasks.json"));

        let mut tasks = TaskList::new();
        tasks.add(Task::new("shopping list".to_string(), NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(), Category::Perso));

        service.try_save(&tasks, false, "").unwrap();

        let retrieved = service.try_load(false, "").unwrap();
        assert_eq!(tasks, retrieved);
    }

    #[test]
    fn saved_file_is_readable_text() {
        let dir = tempfile::tempdir().unwrap();
        let service = PersistenceService::new(dir.path().join("tasks.json"));

        service.try_save(&TaskList::new(), false, "").unwrap();
        assert_eq!(std::fs::read_to_string(service.backing_file()).unwrap(), "[]");

        service.try_save(&TaskList::new(), true, "Test").unwrap();
        assert_eq!(std::fs::read_to_string(service.backing_file()).unwrap(), "Rx3Bdx9MzjgZEgwohtGf5g==");
    }
}
