//! Store trait definition.
//!
//! Implemented by the backends in `quizdesk-store`. The service layer only
//! ever talks to storage through [`QuizStore`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Admin, Quiz, QuizUpdate, User};
use crate::report::SubmissionRecord;

/// Filter and window for quiz listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFilter {
    /// Only quizzes owned by this admin.
    pub admin_id: Option<Uuid>,
    /// Only quizzes with this active flag.
    pub is_active: Option<bool>,
    /// Number of matching quizzes to skip.
    pub skip: usize,
    /// Maximum number of quizzes to return.
    pub limit: usize,
}

impl Default for QuizFilter {
    fn default() -> Self {
        Self {
            admin_id: None,
            is_active: None,
            skip: 0,
            limit: 100,
        }
    }
}

impl QuizFilter {
    /// Returns `true` if `quiz` passes the admin/active filters (ignores the window).
    pub fn matches(&self, quiz: &Quiz) -> bool {
        self.admin_id.is_none_or(|id| quiz.admin_id == id)
            && self.is_active.is_none_or(|active| quiz.is_active == active)
    }
}

/// Persistence backend for admins, users, quizzes, and submission records.
///
/// Listings return entities in creation order.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Human-readable backend name (e.g. "memory").
    fn name(&self) -> &str;

    // -- admins -------------------------------------------------------------

    /// Store a new admin. Fails if the email is already taken.
    async fn insert_admin(&self, admin: Admin) -> anyhow::Result<Admin>;

    async fn get_admin(&self, id: Uuid) -> anyhow::Result<Option<Admin>>;

    async fn get_admin_by_email(&self, email: &str) -> anyhow::Result<Option<Admin>>;

    // -- users --------------------------------------------------------------

    /// Return the user with this email, creating it if needed.
    async fn get_or_create_user(&self, email: &str) -> anyhow::Result<User>;

    async fn get_user(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    // -- quizzes ------------------------------------------------------------

    /// Store a quiz with all of its questions and answers as one unit.
    /// Either everything is stored or nothing is.
    async fn insert_quiz(&self, quiz: Quiz) -> anyhow::Result<Quiz>;

    /// Load a quiz with its questions (sorted by order) and answers.
    async fn get_quiz(&self, id: Uuid) -> anyhow::Result<Option<Quiz>>;

    async fn list_quizzes(&self, filter: &QuizFilter) -> anyhow::Result<Vec<Quiz>>;

    /// Apply a partial update. Returns `None` if the quiz does not exist.
    async fn update_quiz(&self, id: Uuid, update: &QuizUpdate) -> anyhow::Result<Option<Quiz>>;

    /// Delete a quiz and its submission records. Returns `false` if absent.
    async fn delete_quiz(&self, id: Uuid) -> anyhow::Result<bool>;

    // -- submissions --------------------------------------------------------

    async fn insert_submission(&self, record: SubmissionRecord) -> anyhow::Result<SubmissionRecord>;

    async fn get_submission(&self, id: Uuid) -> anyhow::Result<Option<SubmissionRecord>>;

    async fn list_submissions(&self, quiz_id: Uuid) -> anyhow::Result<Vec<SubmissionRecord>>;
}
