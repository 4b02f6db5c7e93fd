//! Service error types.
//!
//! The request layer maps these onto caller-visible failures.
//! [`QuizError::is_client_error`] separates caller mistakes from
//! storage failures.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::ValidationError;

/// Errors returned by [`crate::service::QuizService`].
#[derive(Debug, Error)]
pub enum QuizError {
    /// The quiz definition or update broke a structural rule.
    #[error("invalid quiz: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The quiz exists but is not accepting views or submissions.
    #[error("quiz is not active: {0}")]
    Inactive(Uuid),

    /// The acting admin does not own the quiz.
    #[error("unauthorized to modify quiz {quiz_id}")]
    Unauthorized { quiz_id: Uuid },

    #[error("email already registered: {0}")]
    AlreadyRegistered(String),

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("invalid page: limit must be between 1 and {max}, got {limit}")]
    InvalidPage { limit: usize, max: usize },

    /// The store failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl QuizError {
    pub fn quiz_not_found(id: Uuid) -> Self {
        QuizError::NotFound {
            entity: "quiz",
            id: id.to_string(),
        }
    }

    /// Returns `true` if the caller caused this error and retrying the same
    /// request cannot succeed.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QuizError::Store(_))
    }
}

/// Result alias for service operations.
pub type QuizResult<T> = Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(QuizError::Inactive(Uuid::nil()).is_client_error());
        assert!(QuizError::from(ValidationError::NoQuestions).is_client_error());
        assert!(!QuizError::from(anyhow::anyhow!("disk full")).is_client_error());
    }

    #[test]
    fn messages() {
        let err = QuizError::quiz_not_found(Uuid::nil());
        assert_eq!(
            err.to_string(),
            "quiz not found: 00000000-0000-0000-0000-000000000000"
        );
        let err = QuizError::from(ValidationError::MissingOptions(2));
        assert_eq!(err.to_string(), "invalid quiz: MCQ question at order 2 must have options");
    }
}
