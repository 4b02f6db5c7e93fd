//! Structural validation of quiz definitions.
//!
//! [`validate_quiz_definition`] is a fail-fast decision: it returns the first
//! rule a definition breaks and never mutates it. It must run before any part
//! of a quiz is written. [`lint_quiz_definition`] reports softer issues that
//! do not block creation.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::{QuestionType, QuizDefinition, QuizUpdate, MAX_TITLE_LEN};

/// Why a quiz definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two or more questions share the same `order`.
    #[error("duplicate question order found: {0}")]
    DuplicateOrder(i32),

    #[error("quiz must have at least one question")]
    NoQuestions,

    #[error("quiz title must not be empty")]
    EmptyTitle,

    #[error("quiz title is {0} characters, maximum is 255")]
    TitleTooLong(usize),

    #[error("question at order {0} has an empty prompt")]
    EmptyPrompt(i32),

    #[error("MCQ question at order {0} must have options")]
    MissingOptions(i32),

    #[error("MCQ question at order {order}: correct answer '{answer}' must be one of the option keys")]
    AnswerNotInOptions { order: i32, answer: String },

    #[error("true/false question at order {order}: answer '{answer}' must be 'true' or 'false'")]
    InvalidBooleanAnswer { order: i32, answer: String },
}

impl ValidationError {
    /// The order of the offending question, if the error is about one.
    pub fn order(&self) -> Option<i32> {
        match self {
            ValidationError::DuplicateOrder(order)
            | ValidationError::EmptyPrompt(order)
            | ValidationError::MissingOptions(order)
            | ValidationError::AnswerNotInOptions { order, .. }
            | ValidationError::InvalidBooleanAnswer { order, .. } => Some(*order),
            ValidationError::NoQuestions
            | ValidationError::EmptyTitle
            | ValidationError::TitleTooLong(_) => None,
        }
    }
}

/// Check a quiz definition before persistence.
///
/// Rules are evaluated in a fixed order and the first failure is returned:
/// duplicate orders, question count, title, then each question in the order
/// given (not sorted by `order`).
pub fn validate_quiz_definition(definition: &QuizDefinition) -> Result<(), ValidationError> {
    if let Some(order) = first_duplicate_order(definition) {
        return Err(ValidationError::DuplicateOrder(order));
    }

    if definition.questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    validate_title(&definition.title)?;

    for question in &definition.questions {
        let order = question.order;

        if question.question_text.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt(order));
        }

        match question.question_type {
            QuestionType::MultipleChoice => {
                let options = match &question.options {
                    Some(options) if !options.is_empty() => options,
                    _ => return Err(ValidationError::MissingOptions(order)),
                };
                // Membership is an exact key match; grading later compares
                // case-insensitively.
                if !options.contains_key(&question.answer.correct_answer) {
                    return Err(ValidationError::AnswerNotInOptions {
                        order,
                        answer: question.answer.correct_answer.clone(),
                    });
                }
            }
            QuestionType::TrueFalse => {
                let normalized = question.answer.correct_answer.trim().to_lowercase();
                if normalized != "true" && normalized != "false" {
                    return Err(ValidationError::InvalidBooleanAnswer {
                        order,
                        answer: question.answer.correct_answer.clone(),
                    });
                }
            }
            QuestionType::Text => {}
        }
    }

    Ok(())
}

/// Check a partial update. Only the title has rules; questions are untouched.
pub fn validate_update(update: &QuizUpdate) -> Result<(), ValidationError> {
    match &update.title {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong(len));
    }
    Ok(())
}

fn first_duplicate_order(definition: &QuizDefinition) -> Option<i32> {
    let mut seen = HashSet::new();
    definition
        .questions
        .iter()
        .map(|q| q.order)
        .find(|order| !seen.insert(*order))
}

/// A non-fatal issue found in a quiz definition.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question order (if applicable).
    pub order: Option<i32>,
    /// Warning message.
    pub message: String,
}

/// Report issues that do not block creation but are likely mistakes.
pub fn lint_quiz_definition(definition: &QuizDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for question in &definition.questions {
        let order = Some(question.order);

        match question.question_type {
            QuestionType::MultipleChoice => {
                // Keys that differ only by case are indistinguishable when grading.
                let mut by_lower: HashMap<String, &str> = HashMap::new();
                for key in question.options.iter().flat_map(|o| o.keys()) {
                    if let Some(previous) = by_lower.insert(key.trim().to_lowercase(), key) {
                        warnings.push(ValidationWarning {
                            order,
                            message: format!(
                                "option keys '{previous}' and '{key}' are graded as the same answer"
                            ),
                        });
                    }
                }
            }
            QuestionType::TrueFalse | QuestionType::Text => {
                if question.options.as_ref().is_some_and(|o| !o.is_empty()) {
                    warnings.push(ValidationWarning {
                        order,
                        message: format!(
                            "options are ignored for {} questions",
                            question.question_type
                        ),
                    });
                }
            }
        }

        if question.question_type == QuestionType::Text
            && question.answer.correct_answer.trim().is_empty()
        {
            warnings.push(ValidationWarning {
                order,
                message: "correct answer is blank, so no submission can be graded correct".into(),
            });
        }
    }

    warnings
}
