//! Support for configuration options

use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::PersistenceService;

/// The file tasks are stored to, when nothing else is configured
pub const DEFAULT_FILE_NAME: &str = "tache.json";

/// What a front end hands to the persistence layer.
///
/// These are usually read from a JSON file such as
/// ```json
/// { "encryptionEnabled": true, "password": "my secret", "filePath": "/home/me/tasks.json" }
/// ```
/// where every key is optional.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub encryption_enabled: bool,
    /// The passphrase the encryption key is derived from
    pub password: String,
    pub file_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encryption_enabled: false,
            password: String::new(),
            file_path: PathBuf::from(DEFAULT_FILE_NAME),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let settings = serde_json::from_reader(file)?;
        Ok(settings)
    }

    /// The service that persists tasks to `file_path`
    pub fn persistence(&self) -> PersistenceService {
        PersistenceService::new(&self.file_path)
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("encryption_enabled", &self.encryption_enabled)
            .field("password", &"<redacted>")
            .field("file_path", &self.file_path)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn partial_settings_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "encryptionEnabled": true, "password": "Test" }"#).unwrap();
        assert_eq!(settings.encryption_enabled, true);
        assert_eq!(settings.password, "Test");
        assert_eq!(settings.file_path, PathBuf::from(DEFAULT_FILE_NAME));
        assert_eq!(settings.persistence().backing_file(), Path::new(DEFAULT_FILE_NAME));
    }

    #[test]
    fn settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        std::fs::write(&path, r#"{ "filePath": "/tmp/my-tasks.json" }"#).unwrap();
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.file_path, PathBuf::from("/tmp/my-tasks.json"));
        assert_eq!(settings.encryption_enabled, false);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::from_file(&path), Err(Error::Settings(_))));

        assert!(matches!(Settings::from_file(&dir.path().join("missing.json")), Err(Error::Io(_))));
    }

    #[test]
    fn password_is_not_printed() {
        let settings = Settings { password: "hunter2".to_string(), ..Settings::default() };
        assert!(format!("{:?}", settings).contains("hunter2") == false);
    }
}
