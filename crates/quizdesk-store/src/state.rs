//! The in-memory state shared by both backends.
//!
//! Entities are kept in insertion order so listings come back in creation
//! order without an index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizdesk_core::model::{Admin, Quiz, QuizUpdate, User};
use quizdesk_core::report::SubmissionRecord;
use quizdesk_core::traits::QuizFilter;

use crate::error::StoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub submissions: Vec<SubmissionRecord>,
}

impl StoreState {
    pub fn insert_admin(&mut self, admin: Admin) -> Result<Admin, StoreError> {
        if self.admins.iter().any(|a| a.email == admin.email) {
            return Err(StoreError::Duplicate {
                entity: "admin",
                id: admin.email,
            });
        }
        self.admins.push(admin.clone());
        Ok(admin)
    }

    pub fn get_admin(&self, id: Uuid) -> Option<Admin> {
        self.admins.iter().find(|a| a.id == id).cloned()
    }

    pub fn get_admin_by_email(&self, email: &str) -> Option<Admin> {
        self.admins.iter().find(|a| a.email == email).cloned()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|u| u.email == email).cloned()
    }

    pub fn create_user(&mut self, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.users.push(user.clone());
        user
    }

    pub fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn insert_quiz(&mut self, mut quiz: Quiz) -> Result<Quiz, StoreError> {
        if self.quizzes.iter().any(|q| q.id == quiz.id) {
            return Err(StoreError::Duplicate {
                entity: "quiz",
                id: quiz.id.to_string(),
            });
        }
        quiz.questions.sort_by_key(|q| q.order);
        self.quizzes.push(quiz.clone());
        Ok(quiz)
    }

    pub fn get_quiz(&self, id: Uuid) -> Option<Quiz> {
        self.quizzes.iter().find(|q| q.id == id).cloned()
    }

    pub fn list_quizzes(&self, filter: &QuizFilter) -> Vec<Quiz> {
        self.quizzes
            .iter()
            .filter(|q| filter.matches(q))
            .skip(filter.skip)
            .take(filter.limit)
            .cloned()
            .collect()
    }

    pub fn update_quiz(&mut self, id: Uuid, update: &QuizUpdate) -> Option<Quiz> {
        let quiz = self.quizzes.iter_mut().find(|q| q.id == id)?;
        quiz.apply_update(update);
        Some(quiz.clone())
    }

    pub fn delete_quiz(&mut self, id: Uuid) -> bool {
        let before = self.quizzes.len();
        self.quizzes.retain(|q| q.id != id);
        if self.quizzes.len() == before {
            return false;
        }
        self.submissions.retain(|s| s.quiz_id != id);
        true
    }

    pub fn insert_submission(
        &mut self,
        record: SubmissionRecord,
    ) -> Result<SubmissionRecord, StoreError> {
        if self.submissions.iter().any(|s| s.id == record.id) {
            return Err(StoreError::Duplicate {
                entity: "submission",
                id: record.id.to_string(),
            });
        }
        self.submissions.push(record.clone());
        Ok(record)
    }

    pub fn get_submission(&self, id: Uuid) -> Option<SubmissionRecord> {
        self.submissions.iter().find(|s| s.id == id).cloned()
    }

    pub fn list_submissions(&self, quiz_id: Uuid) -> Vec<SubmissionRecord> {
        self.submissions
            .iter()
            .filter(|s| s.quiz_id == quiz_id)
            .cloned()
            .collect()
    }
}
