//! JSON-file store.
//!
//! The whole store lives in one JSON document. Every mutation is applied to
//! a copy of the state, written to a temporary file next to the target, and
//! renamed into place. A quiz and all of its questions and answers therefore
//! land together or not at all.
//!
//! Several processes may share one file. Each operation takes an advisory
//! lock on `<path>.lock` (shared for reads, exclusive for writes) and
//! re-reads the document under it, so a write never overwrites a commit made
//! by another handle.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use fd_lock::RwLock;
use tokio::sync::Mutex;
use uuid::Uuid;

use quizdesk_core::model::{Admin, Quiz, QuizUpdate, User};
use quizdesk_core::report::SubmissionRecord;
use quizdesk_core::traits::{QuizFilter, QuizStore};

use crate::error::StoreError;
use crate::state::StoreState;

/// A store persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    // Serializes tasks within this process; the lock file covers the rest.
    local: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// An existing file is parsed once here so a corrupt store is reported
    /// up front.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            read_state(&path)?;
        } else {
            tracing::debug!("store file {} not found, starting empty", path.display());
        }

        let mut lock_path = OsString::from(path.as_os_str());
        lock_path.push(".lock");

        Ok(Self {
            path,
            lock_path: PathBuf::from(lock_path),
            local: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_file(&self) -> Result<RwLock<File>> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .with_context(|| format!("failed to open lock file: {}", self.lock_path.display()))?;
        Ok(RwLock::new(file))
    }

    /// Run `f` against the current contents of the file.
    async fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T> {
        let _local = self.local.lock().await;
        if !self.path.exists() {
            return Ok(f(&StoreState::default()));
        }

        let lock = self.lock_file()?;
        let _held = lock
            .read()
            .with_context(|| format!("failed to lock store: {}", self.path.display()))?;
        let state = read_state(&self.path)?;
        Ok(f(&state))
    }

    /// Re-read the file, apply `f`, and commit the result if `f` succeeds.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T> {
        let _local = self.local.lock().await;
        create_parent_dir(&self.path)?;

        let mut lock = self.lock_file()?;
        let _held = lock
            .write()
            .with_context(|| format!("failed to lock store: {}", self.path.display()))?;

        let mut state = if self.path.exists() {
            read_state(&self.path)?
        } else {
            StoreState::default()
        };
        let out = f(&mut state)?;
        write_atomically(&self.path, &state)?;
        Ok(out)
    }
}

fn read_state(path: &Path) -> Result<StoreState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read store file: {}", path.display()))?;
    let state = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(state)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create store directory: {}", dir.display()))
}

fn write_atomically(path: &Path, state: &StoreState) -> Result<()> {
    let json = serde_json::to_vec_pretty(state).context("failed to serialize store")?;
    let io_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent_dir(path)).map_err(io_err)?;
    tmp.write_all(&json).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::debug!(bytes = json.len(), "committed store to {}", path.display());
    Ok(())
}

#[async_trait]
impl QuizStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn insert_admin(&self, admin: Admin) -> Result<Admin> {
        self.mutate(|s| s.insert_admin(admin)).await
    }

    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>> {
        self.read(|s| s.get_admin(id)).await
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        self.read(|s| s.get_admin_by_email(email)).await
    }

    async fn get_or_create_user(&self, email: &str) -> Result<User> {
        if let Some(user) = self.read(|s| s.find_user_by_email(email)).await? {
            return Ok(user);
        }
        self.mutate(|s| {
            Ok(match s.find_user_by_email(email) {
                Some(user) => user,
                None => s.create_user(email),
            })
        })
        .await
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.read(|s| s.get_user(id)).await
    }

    async fn insert_quiz(&self, quiz: Quiz) -> Result<Quiz> {
        self.mutate(|s| s.insert_quiz(quiz)).await
    }

    async fn get_quiz(&self, id: Uuid) -> Result<Option<Quiz>> {
        self.read(|s| s.get_quiz(id)).await
    }

    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>> {
        self.read(|s| s.list_quizzes(filter)).await
    }

    async fn update_quiz(&self, id: Uuid, update: &QuizUpdate) -> Result<Option<Quiz>> {
        if self.read(|s| s.get_quiz(id).is_none()).await? {
            return Ok(None);
        }
        self.mutate(|s| Ok(s.update_quiz(id, update))).await
    }

    async fn delete_quiz(&self, id: Uuid) -> Result<bool> {
        if self.read(|s| s.get_quiz(id).is_none()).await? {
            return Ok(false);
        }
        self.mutate(|s| Ok(s.delete_quiz(id))).await
    }

    async fn insert_submission(&self, record: SubmissionRecord) -> Result<SubmissionRecord> {
        self.mutate(|s| s.insert_submission(record)).await
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<SubmissionRecord>> {
        self.read(|s| s.get_submission(id)).await
    }

    async fn list_submissions(&self, quiz_id: Uuid) -> Result<Vec<SubmissionRecord>> {
        self.read(|s| s.list_submissions(quiz_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn admin(email: &str) -> Admin {
        Admin {
            id: Uuid::new_v4(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/store.json");

        let store = JsonFileStore::open(&path).unwrap();
        let created = store.insert_admin(admin("a@example.com")).await.unwrap();
        let user = store.get_or_create_user("u@example.com").await.unwrap();
        assert!(path.exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_admin(created.id).await.unwrap(), Some(created));
        assert_eq!(
            reopened.get_or_create_user("u@example.com").await.unwrap().id,
            user.id
        );
    }

    #[tokio::test]
    async fn failed_mutation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open(&path).unwrap();

        store.insert_admin(admin("a@example.com")).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = store.insert_admin(admin("a@example.com")).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn missing_file_starts_empty_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open(&path).unwrap();

        assert!(store
            .list_quizzes(&QuizFilter::default())
            .await
            .unwrap()
            .is_empty());
        assert!(!store.delete_quiz(Uuid::new_v4()).await.unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn reads_see_writes_from_other_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let first = JsonFileStore::open(&path).unwrap();
        let second = JsonFileStore::open(&path).unwrap();

        let a = first.insert_admin(admin("a@example.com")).await.unwrap();
        let b = second.insert_admin(admin("b@example.com")).await.unwrap();

        assert_eq!(first.get_admin(b.id).await.unwrap(), Some(b));
        assert_eq!(second.get_admin(a.id).await.unwrap(), Some(a));
        assert!(second
            .insert_admin(admin("a@example.com"))
            .await
            .unwrap_err()
            .to_string()
            .contains("already exists"));
    }
}
