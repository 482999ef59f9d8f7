use std::path::{
    Path,
    PathBuf,
};

use tracing::{
    info,
    warn,
};

use crate::{
    core::{
        Credentials,
        StatsError,
    },
    persistence::{
        delete_data_file_at,
        get_data_file_path,
        load_json_from,
        save_json_to,
    },
};

pub const CREDENTIALS_FILE: &str = "credentials.json";

/// The stored `chat_id`/`api_key` pair that gates capture. Owned by whoever runs the
/// capture flow and passed in explicitly.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    credentials: Option<Credentials>,
}

impl CredentialStore {
    /// Store backed by `credentials.json` in the app data directory.
    pub fn open_default() -> Result<Self, StatsError> {
        Self::load(Self::default_path())
    }

    /// Like `open_default`, but an unreadable file counts as logged out.
    pub fn open_default_or_logged_out() -> Self {
        Self::load_or_logged_out(Self::default_path())
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StatsError> {
        let path = path.into();
        let credentials: Option<Credentials> = load_json_from(&path)?;
        Ok(Self { path, credentials })
    }

    /// A corrupt file reads as logged out. The path is kept, so the next `store` or `clear`
    /// replaces it.
    pub fn load_or_logged_out(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match load_json_from::<Option<Credentials>>(&path) {
            Ok(credentials) => Self { path, credentials },
            Err(e) => {
                warn!("Failed to load {}: {}. Treating as logged out.", path.display(), e);
                Self::logged_out_at(path)
            }
        }
    }

    /// Empty store that still writes through to `path`.
    pub fn logged_out_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), credentials: None }
    }

    pub fn default_path() -> PathBuf {
        get_data_file_path(CREDENTIALS_FILE)
    }

    /// Store that is never written to disk. Useful before a data dir is known and in tests.
    pub fn in_memory(credentials: Option<Credentials>) -> Self {
        Self { path: PathBuf::new(), credentials }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn store(&mut self, credentials: Credentials) -> Result<(), StatsError> {
        if !self.is_in_memory() {
            save_json_to(&Some(&credentials), &self.path)?;
        }
        info!(chat_id = credentials.chat_id, "Stored credentials");
        self.credentials = Some(credentials);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StatsError> {
        if !self.is_in_memory() {
            delete_data_file_at(&self.path)?;
        }
        self.credentials = None;
        Ok(())
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CREDENTIALS_FILE);

        let mut store = CredentialStore::load(&path).unwrap();
        assert!(!store.is_logged_in());

        store.store(Credentials { chat_id: 1001, api_key: "1001:abc".to_string() }).unwrap();
        let reopened = CredentialStore::load(&path).unwrap();
        assert_eq!(reopened.credentials().map(|c| c.chat_id), Some(1001));

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(!CredentialStore::load(&path).unwrap().is_logged_in());
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CREDENTIALS_FILE);
        std::fs::write(&path, "{ truncated").unwrap();

        assert!(CredentialStore::load(&path).is_err());

        let mut store = CredentialStore::load_or_logged_out(&path);
        assert!(!store.is_logged_in());
        assert_eq!(store.path(), path.as_path());

        store.store(Credentials { chat_id: 7, api_key: "7:key".to_string() }).unwrap();
        let reopened = CredentialStore::load(&path).unwrap();
        assert_eq!(reopened.credentials().map(|c| c.chat_id), Some(7));
    }

    #[test]
    fn test_logout_removes_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CREDENTIALS_FILE);
        std::fs::write(&path, "{ truncated").unwrap();

        let mut store = CredentialStore::load_or_logged_out(&path);
        store.clear().unwrap();
        assert!(!path.exists());
        assert!(!CredentialStore::load(&path).unwrap().is_logged_in());
    }

    #[test]
    fn test_in_memory_store_touches_no_files() {
        let mut store = CredentialStore::in_memory(None);
        store.store(Credentials { chat_id: 1, api_key: "k".to_string() }).unwrap();
        assert!(store.is_logged_in());
        store.clear().unwrap();
        assert!(!store.is_logged_in());
    }
}
