//! Grading of submitted answers.
//!
//! Scoring is total: every input, including missing answers, unknown
//! question ids and extra keys, yields a defined result. Nothing here
//! touches storage, and raw answers only live as long as the returned
//! [`ScoreResult`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{QuestionType, Quiz};

/// Question id (as a string) → raw answer typed by the user.
pub type SubmittedAnswers = HashMap<String, String>;

/// The grading outcome for a single question. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: Uuid,
    pub question_text: String,
    /// The user's answer, trimmed. Empty if the question was not answered.
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Aggregate score plus per-question breakdown, in the quiz's question order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub results: Vec<QuestionResult>,
}

impl ScoreResult {
    /// Number of graded questions.
    pub fn total_questions(&self) -> u32 {
        self.results.len() as u32
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total_questions())
    }
}

/// `score / total * 100`, or `0.0` when there are no questions.
pub fn percentage(score: u32, total_questions: u32) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    (score as f64 / total_questions as f64) * 100.0
}

/// Grade `submitted` against the stored answers of `quiz`.
///
/// Questions are visited in the order they are held by the quiz. A question
/// without an answer record grades against an empty correct answer and can
/// never be correct.
pub fn score_submission(quiz: &Quiz, submitted: &SubmittedAnswers) -> ScoreResult {
    let mut score = 0u32;
    let mut results = Vec::with_capacity(quiz.questions.len());

    for question in &quiz.questions {
        let user_answer = submitted
            .get(&question.id.to_string())
            .map(|a| a.trim())
            .unwrap_or_default();

        let (correct_answer, explanation) = match &question.answer {
            Some(answer) => (answer.correct_answer.as_str(), answer.explanation.clone()),
            None => ("", None),
        };

        let is_correct = check_answer(question.question_type, user_answer, correct_answer);
        if is_correct {
            score += 1;
        }

        results.push(QuestionResult {
            question_id: question.id,
            question_text: question.question_text.clone(),
            user_answer: user_answer.to_string(),
            correct_answer: correct_answer.to_string(),
            is_correct,
            explanation,
        });
    }

    ScoreResult { score, results }
}

/// Decide whether a single answer is correct.
///
/// A blank answer is always wrong. Otherwise both sides are trimmed and
/// lowercased and must be equal; no other normalization is applied.
pub fn check_answer(question_type: QuestionType, user_answer: &str, correct_answer: &str) -> bool {
    let user = user_answer.trim();
    if user.is_empty() {
        return false;
    }

    let user = user.to_lowercase();
    let correct = correct_answer.trim().to_lowercase();

    // Option keys, "true"/"false" tokens and free text all compare the same
    // way; text gets no fuzzy or partial matching.
    match question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse | QuestionType::Text => {
            user == correct
        }
    }
}
