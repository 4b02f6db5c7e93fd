//! In-memory store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quizdesk_core::model::{Admin, Quiz, QuizUpdate, User};
use quizdesk_core::report::SubmissionRecord;
use quizdesk_core::traits::{QuizFilter, QuizStore};

use crate::state::StoreState;

/// A store that keeps everything in process memory.
///
/// Useful for tests and for embedding the service without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submission records held.
    pub async fn submission_count(&self) -> usize {
        self.state.read().await.submissions.len()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert_admin(&self, admin: Admin) -> anyhow::Result<Admin> {
        Ok(self.state.write().await.insert_admin(admin)?)
    }

    async fn get_admin(&self, id: Uuid) -> anyhow::Result<Option<Admin>> {
        Ok(self.state.read().await.get_admin(id))
    }

    async fn get_admin_by_email(&self, email: &str) -> anyhow::Result<Option<Admin>> {
        Ok(self.state.read().await.get_admin_by_email(email))
    }

    async fn get_or_create_user(&self, email: &str) -> anyhow::Result<User> {
        let mut state = self.state.write().await;
        if let Some(user) = state.find_user_by_email(email) {
            return Ok(user);
        }
        Ok(state.create_user(email))
    }

    async fn get_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.state.read().await.get_user(id))
    }

    async fn insert_quiz(&self, quiz: Quiz) -> anyhow::Result<Quiz> {
        Ok(self.state.write().await.insert_quiz(quiz)?)
    }

    async fn get_quiz(&self, id: Uuid) -> anyhow::Result<Option<Quiz>> {
        Ok(self.state.read().await.get_quiz(id))
    }

    async fn list_quizzes(&self, filter: &QuizFilter) -> anyhow::Result<Vec<Quiz>> {
        Ok(self.state.read().await.list_quizzes(filter))
    }

    async fn update_quiz(&self, id: Uuid, update: &QuizUpdate) -> anyhow::Result<Option<Quiz>> {
        Ok(self.state.write().await.update_quiz(id, update))
    }

    async fn delete_quiz(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.state.write().await.delete_quiz(id))
    }

    async fn insert_submission(
        &self,
        record: SubmissionRecord,
    ) -> anyhow::Result<SubmissionRecord> {
        Ok(self.state.write().await.insert_submission(record)?)
    }

    async fn get_submission(&self, id: Uuid) -> anyhow::Result<Option<SubmissionRecord>> {
        Ok(self.state.read().await.get_submission(id))
    }

    async fn list_submissions(&self, quiz_id: Uuid) -> anyhow::Result<Vec<SubmissionRecord>> {
        Ok(self.state.read().await.list_submissions(quiz_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_user_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.get_or_create_user("a@example.com").await.unwrap();
        let second = store.get_or_create_user("a@example.com").await.unwrap();
        assert_eq!(first.id, second.id);

        let other = store.get_or_create_user("b@example.com").await.unwrap();
        assert_ne!(first.id, other.id);
        assert_eq!(store.get_user(other.id).await.unwrap(), Some(other));
    }

    #[tokio::test]
    async fn missing_entities_are_none() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(store.get_quiz(id).await.unwrap().is_none());
        assert!(store.get_admin(id).await.unwrap().is_none());
        assert!(store.get_submission(id).await.unwrap().is_none());
        assert!(store
            .update_quiz(id, &QuizUpdate::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_quiz(id).await.unwrap());
        assert_eq!(store.name(), "memory");
    }
}
