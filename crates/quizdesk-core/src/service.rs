//! Quiz service orchestrator.
//!
//! Ties validation and scoring to a [`QuizStore`]: every check that can
//! reject a request runs before the first write, and a submission writes
//! exactly one summary record.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::{QuizError, QuizResult};
use crate::model::{Admin, PublicQuiz, Quiz, QuizDefinition, QuizListItem, QuizUpdate, User};
use crate::report::{SubmissionRecord, SubmissionResponse, SubmissionSummary};
use crate::scoring::{score_submission, SubmittedAnswers};
use crate::traits::{QuizFilter, QuizStore};
use crate::validate::{validate_quiz_definition, validate_update};

/// Configuration for the quiz service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Page size used when a listing does not ask for one.
    pub default_page_limit: usize,
    /// Largest page size a listing may ask for.
    pub max_page_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 100,
            max_page_limit: 100,
        }
    }
}

/// A window into a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    /// `None` uses the configured default.
    pub limit: Option<usize>,
}

/// A set of answers submitted for grading.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub email: String,
    pub answers: SubmittedAnswers,
}

/// Admin and public quiz operations over a store.
pub struct QuizService {
    store: Arc<dyn QuizStore>,
    config: ServiceConfig,
}

impl QuizService {
    pub fn new(store: Arc<dyn QuizStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // -- accounts -----------------------------------------------------------

    /// Register a new admin. Emails must be unique.
    #[instrument(skip(self))]
    pub async fn register_admin(&self, email: &str) -> QuizResult<Admin> {
        let email = normalize_email(email)?;
        if self.store.get_admin_by_email(&email).await?.is_some() {
            return Err(QuizError::AlreadyRegistered(email));
        }

        let admin = self
            .store
            .insert_admin(Admin {
                id: Uuid::new_v4(),
                email,
                created_at: chrono::Utc::now(),
            })
            .await?;
        tracing::info!(admin_id = %admin.id, "admin registered");
        Ok(admin)
    }

    pub async fn admin_by_email(&self, email: &str) -> QuizResult<Admin> {
        let email = normalize_email(email)?;
        let admin = self.store.get_admin_by_email(&email).await?;
        admin.ok_or(QuizError::NotFound {
            entity: "admin",
            id: email,
        })
    }

    /// Create or fetch a quiz taker by email. Idempotent.
    pub async fn register_user(&self, email: &str) -> QuizResult<User> {
        let email = normalize_email(email)?;
        Ok(self.store.get_or_create_user(&email).await?)
    }

    // -- quizzes ------------------------------------------------------------

    /// Validate and store a new quiz with all of its questions and answers.
    ///
    /// Nothing is written if validation fails or the admin is unknown.
    #[instrument(skip(self, definition), fields(title = %definition.title))]
    pub async fn create_quiz(
        &self,
        definition: &QuizDefinition,
        admin_id: Uuid,
    ) -> QuizResult<Quiz> {
        validate_quiz_definition(definition)?;

        if self.store.get_admin(admin_id).await?.is_none() {
            return Err(QuizError::NotFound {
                entity: "admin",
                id: admin_id.to_string(),
            });
        }

        let quiz = self
            .store
            .insert_quiz(Quiz::from_definition(definition, admin_id))
            .await?;
        tracing::info!(
            quiz_id = %quiz.id,
            questions = quiz.question_count(),
            "quiz created"
        );
        Ok(quiz)
    }

    /// Full quiz including answers.
    pub async fn get_quiz_for_admin(&self, id: Uuid) -> QuizResult<Quiz> {
        self.store
            .get_quiz(id)
            .await?
            .ok_or_else(|| QuizError::quiz_not_found(id))
    }

    /// Quiz without answers. Inactive quizzes are refused.
    pub async fn get_quiz_for_public(&self, id: Uuid) -> QuizResult<PublicQuiz> {
        let quiz = self.get_active_quiz(id).await?;
        Ok(quiz.to_public())
    }

    pub async fn list_quizzes_for_admin(
        &self,
        admin_id: Uuid,
        page: Page,
    ) -> QuizResult<Vec<QuizListItem>> {
        self.list(Some(admin_id), None, page).await
    }

    pub async fn list_active_quizzes(&self, page: Page) -> QuizResult<Vec<QuizListItem>> {
        self.list(None, Some(true), page).await
    }

    /// Update title, description, or active flag. Only the owner may update.
    #[instrument(skip(self, update))]
    pub async fn update_quiz(
        &self,
        id: Uuid,
        update: &QuizUpdate,
        admin_id: Uuid,
    ) -> QuizResult<Quiz> {
        self.get_owned_quiz(id, admin_id).await?;
        validate_update(update)?;

        let quiz = self
            .store
            .update_quiz(id, update)
            .await?
            .ok_or_else(|| QuizError::quiz_not_found(id))?;
        tracing::info!(quiz_id = %id, is_active = quiz.is_active, "quiz updated");
        Ok(quiz)
    }

    /// Delete a quiz and its submission records. Only the owner may delete.
    #[instrument(skip(self))]
    pub async fn delete_quiz(&self, id: Uuid, admin_id: Uuid) -> QuizResult<()> {
        self.get_owned_quiz(id, admin_id).await?;

        if !self.store.delete_quiz(id).await? {
            return Err(QuizError::quiz_not_found(id));
        }
        tracing::info!(quiz_id = %id, "quiz deleted");
        Ok(())
    }

    // -- submissions --------------------------------------------------------

    /// Grade a submission and record its score.
    ///
    /// Only the score and question count are stored; the per-question
    /// results are returned to the caller and then dropped.
    #[instrument(skip(self, request))]
    pub async fn submit(
        &self,
        quiz_id: Uuid,
        request: &SubmissionRequest,
    ) -> QuizResult<SubmissionResponse> {
        let email = normalize_email(&request.email)?;
        let quiz = self.get_active_quiz(quiz_id).await?;
        let user = self.store.get_or_create_user(&email).await?;

        let graded = score_submission(&quiz, &request.answers);
        let record = self
            .store
            .insert_submission(SubmissionRecord::new(
                quiz.id,
                user.id,
                graded.score,
                graded.total_questions(),
            ))
            .await?;

        tracing::info!(
            submission_id = %record.id,
            score = record.score,
            total = record.total_questions,
            "submission graded"
        );

        Ok(SubmissionResponse {
            submission_id: record.id,
            quiz_id: quiz.id,
            quiz_title: quiz.title,
            user_email: user.email,
            score: record.score,
            total_questions: record.total_questions,
            percentage: record.percentage(),
            submitted_at: record.submitted_at,
            results: graded.results,
        })
    }

    pub async fn get_submission(&self, id: Uuid) -> QuizResult<SubmissionSummary> {
        self.store
            .get_submission(id)
            .await?
            .map(|r| r.summary())
            .ok_or(QuizError::NotFound {
                entity: "submission",
                id: id.to_string(),
            })
    }

    /// Score summaries for a quiz. Only the owner may list them.
    pub async fn list_submissions(
        &self,
        quiz_id: Uuid,
        admin_id: Uuid,
    ) -> QuizResult<Vec<SubmissionSummary>> {
        self.get_owned_quiz(quiz_id, admin_id).await?;
        let records = self.store.list_submissions(quiz_id).await?;
        Ok(records.iter().map(SubmissionRecord::summary).collect())
    }

    // -- helpers ------------------------------------------------------------

    async fn get_active_quiz(&self, id: Uuid) -> QuizResult<Quiz> {
        let quiz = self.get_quiz_for_admin(id).await?;
        if !quiz.is_active {
            return Err(QuizError::Inactive(id));
        }
        Ok(quiz)
    }

    async fn get_owned_quiz(&self, id: Uuid, admin_id: Uuid) -> QuizResult<Quiz> {
        let quiz = self.get_quiz_for_admin(id).await?;
        if quiz.admin_id != admin_id {
            tracing::warn!(quiz_id = %id, %admin_id, "rejected change by non-owner");
            return Err(QuizError::Unauthorized { quiz_id: id });
        }
        Ok(quiz)
    }

    async fn list(
        &self,
        admin_id: Option<Uuid>,
        is_active: Option<bool>,
        page: Page,
    ) -> QuizResult<Vec<QuizListItem>> {
        let limit = page.limit.unwrap_or(self.config.default_page_limit);
        if limit == 0 || limit > self.config.max_page_limit {
            return Err(QuizError::InvalidPage {
                limit,
                max: self.config.max_page_limit,
            });
        }

        let filter = QuizFilter {
            admin_id,
            is_active,
            skip: page.skip,
            limit,
        };
        let quizzes = self.store.list_quizzes(&filter).await?;
        Ok(quizzes.iter().map(Quiz::list_item).collect())
    }
}

/// Trim an email address and check its basic shape: one `@`, a non-empty
/// local part, and a dotted domain.
pub fn normalize_email(email: &str) -> QuizResult<String> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email.to_string())
    } else {
        Err(QuizError::InvalidEmail(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::model::{AnswerDefinition, QuestionDefinition, QuestionType};

    /// A store that knows a single admin and refuses every write.
    struct ReadOnlyStore {
        admin: Admin,
        calls: AtomicU32,
    }

    impl ReadOnlyStore {
        fn new() -> Self {
            Self {
                admin: Admin {
                    id: Uuid::new_v4(),
                    email: "admin@example.com".into(),
                    created_at: chrono::Utc::now(),
                },
                calls: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::Relaxed)
        }

        fn touch(&self) {
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[async_trait]
    impl QuizStore for ReadOnlyStore {
        fn name(&self) -> &str {
            "read-only"
        }

        async fn insert_admin(&self, _admin: Admin) -> anyhow::Result<Admin> {
            self.touch();
            anyhow::bail!("store is read-only")
        }

        async fn get_admin(&self, id: Uuid) -> anyhow::Result<Option<Admin>> {
            self.touch();
            Ok((id == self.admin.id).then(|| self.admin.clone()))
        }

        async fn get_admin_by_email(&self, email: &str) -> anyhow::Result<Option<Admin>> {
            self.touch();
            Ok((email == self.admin.email).then(|| self.admin.clone()))
        }

        async fn get_or_create_user(&self, _email: &str) -> anyhow::Result<User> {
            self.touch();
            anyhow::bail!("store is read-only")
        }

        async fn get_user(&self, _id: Uuid) -> anyhow::Result<Option<User>> {
            self.touch();
            Ok(None)
        }

        async fn insert_quiz(&self, _quiz: Quiz) -> anyhow::Result<Quiz> {
            self.touch();
            anyhow::bail!("store is read-only")
        }

        async fn get_quiz(&self, _id: Uuid) -> anyhow::Result<Option<Quiz>> {
            self.touch();
            Ok(None)
        }

        async fn list_quizzes(&self, _filter: &QuizFilter) -> anyhow::Result<Vec<Quiz>> {
            self.touch();
            Ok(vec![])
        }

        async fn update_quiz(
            &self,
            _id: Uuid,
            _update: &QuizUpdate,
        ) -> anyhow::Result<Option<Quiz>> {
            self.touch();
            anyhow::bail!("store is read-only")
        }

        async fn delete_quiz(&self, _id: Uuid) -> anyhow::Result<bool> {
            self.touch();
            anyhow::bail!("store is read-only")
        }

        async fn insert_submission(
            &self,
            _record: SubmissionRecord,
        ) -> anyhow::Result<SubmissionRecord> {
            self.touch();
            anyhow::bail!("store is read-only")
        }

        async fn get_submission(&self, _id: Uuid) -> anyhow::Result<Option<SubmissionRecord>> {
            self.touch();
            Ok(None)
        }

        async fn list_submissions(
            &self,
            _quiz_id: Uuid,
        ) -> anyhow::Result<Vec<SubmissionRecord>> {
            self.touch();
            Ok(vec![])
        }
    }

    fn one_question_quiz(title: &str) -> QuizDefinition {
        QuizDefinition {
            title: title.into(),
            description: None,
            is_active: true,
            questions: vec![QuestionDefinition {
                question_type: QuestionType::TrueFalse,
                question_text: "Is water wet?".into(),
                options: None,
                order: 0,
                answer: AnswerDefinition {
                    correct_answer: "true".into(),
                    explanation: None,
                },
            }],
        }
    }

    #[tokio::test]
    async fn rejected_definition_never_reaches_the_store() {
        let store = Arc::new(ReadOnlyStore::new());
        let service = QuizService::new(store.clone(), ServiceConfig::default());

        let err = service
            .create_quiz(&one_question_quiz(""), store.admin.id)
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn store_failures_are_not_client_errors() {
        let store = Arc::new(ReadOnlyStore::new());
        let service = QuizService::new(store.clone(), ServiceConfig::default());

        let err = service
            .create_quiz(&one_question_quiz("Water"), store.admin.id)
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Store(_)));
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "store is read-only");
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn page_limits_checked_before_listing() {
        let store = Arc::new(ReadOnlyStore::new());
        let service = QuizService::new(
            store.clone(),
            ServiceConfig {
                default_page_limit: 10,
                max_page_limit: 20,
            },
        );

        assert!(service.list_active_quizzes(Page::default()).await.is_ok());
        let err = service
            .list_active_quizzes(Page {
                skip: 0,
                limit: Some(21),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidPage { limit: 21, max: 20 }));
        assert_eq!(store.call_count(), 1);
    }

    #[test]
    fn email_shapes() {
        assert_eq!(normalize_email(" a@example.com ").unwrap(), "a@example.com");
        assert!(normalize_email("first.last@sub.example.org").is_ok());
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@b",
            "a@@example.com",
            "a b@example.com",
            "a@.com",
            "a@example.",
        ] {
            assert!(
                matches!(normalize_email(bad), Err(QuizError::InvalidEmail(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.default_page_limit, 100);
        assert_eq!(config.max_page_limit, 100);
        assert_eq!(Page::default().limit, None);
    }
}
