//! Core data model types for quizdesk.
//!
//! Two families live here: the author-supplied *definitions* (what an admin
//! submits before anything is stored) and the persisted *aggregate* (quiz,
//! questions, answers) that the store hands back with identifiers assigned.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a quiz title, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// The kind of a question, which decides how it is validated and shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "true_false")]
    TrueFalse,
    #[serde(rename = "text")]
    Text,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "mcq"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::Text => write!(f, "text"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" | "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "true_false" | "truefalse" => Ok(QuestionType::TrueFalse),
            "text" => Ok(QuestionType::Text),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Option key → option label, e.g. `{"A": "Paris", "B": "London"}`.
pub type Options = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Definitions (not yet persisted)
// ---------------------------------------------------------------------------

/// The correct answer for a question, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerDefinition {
    /// For MCQ this is an option key; for true/false `"true"` or `"false"`.
    pub correct_answer: String,
    /// Shown to the user after grading.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A single question as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(default)]
    pub options: Option<Options>,
    /// Position within the quiz. Must be unique across the quiz.
    pub order: i32,
    pub answer: AnswerDefinition,
}

/// A complete quiz as authored, prior to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub questions: Vec<QuestionDefinition>,
}

fn default_true() -> bool {
    true
}

/// Partial update of a quiz's details. Questions cannot be changed this way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl QuizUpdate {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_active.is_none()
    }
}

// ---------------------------------------------------------------------------
// Persisted aggregate
// ---------------------------------------------------------------------------

/// A quiz author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Someone who takes quizzes. Identified only by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A stored correct answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A stored question with its (optional) answer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(default)]
    pub options: Option<Options>,
    pub order: i32,
    #[serde(default)]
    pub answer: Option<Answer>,
}

/// A stored quiz. `questions` is kept sorted by `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Build a new aggregate from an accepted definition, assigning fresh
    /// identifiers. Does not validate.
    pub fn from_definition(definition: &QuizDefinition, admin_id: Uuid) -> Self {
        let quiz_id = Uuid::new_v4();
        let mut questions: Vec<Question> = definition
            .questions
            .iter()
            .map(|q| {
                let question_id = Uuid::new_v4();
                Question {
                    id: question_id,
                    quiz_id,
                    question_type: q.question_type,
                    question_text: q.question_text.clone(),
                    options: q.options.clone(),
                    order: q.order,
                    answer: Some(Answer {
                        id: Uuid::new_v4(),
                        question_id,
                        correct_answer: q.answer.correct_answer.clone(),
                        explanation: q.answer.explanation.clone(),
                    }),
                }
            })
            .collect();
        questions.sort_by_key(|q| q.order);

        Self {
            id: quiz_id,
            admin_id,
            title: definition.title.clone(),
            description: definition.description.clone(),
            is_active: definition.is_active,
            created_at: Utc::now(),
            questions,
        }
    }

    /// Apply the fields present in `update`.
    pub fn apply_update(&mut self, update: &QuizUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Summary used in listings.
    pub fn list_item(&self) -> QuizListItem {
        QuizListItem {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            question_count: self.question_count(),
        }
    }

    /// The quiz as shown to someone taking it: no answers.
    pub fn to_public(&self) -> PublicQuiz {
        PublicQuiz {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            questions: self
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    id: q.id,
                    question_type: q.question_type,
                    question_text: q.question_text.clone(),
                    options: q.options.clone(),
                    order: q.order,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Summary of a quiz for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizListItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
}

/// A question without its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: Uuid,
    pub question_type: QuestionType,
    pub question_text: String,
    pub options: Option<Options>,
    pub order: i32,
}

/// A quiz without answers, for people taking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuiz {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<PublicQuestion>,
}
