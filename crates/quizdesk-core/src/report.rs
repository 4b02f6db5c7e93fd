//! Submission records and graded responses.
//!
//! A [`SubmissionRecord`] is the only durable trace of a submission: score
//! and question count, never the answers. The [`SubmissionResponse`] carries
//! the full per-question breakdown back to the caller and is not stored.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{self, QuestionResult};

/// Persisted summary of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    /// Number of correct answers.
    pub score: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(quiz_id: Uuid, user_id: Uuid, score: u32, total_questions: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz_id,
            user_id,
            score,
            total_questions,
            submitted_at: Utc::now(),
        }
    }

    pub fn percentage(&self) -> f64 {
        scoring::percentage(self.score, self.total_questions)
    }

    /// Summary view including the derived percentage.
    pub fn summary(&self) -> SubmissionSummary {
        SubmissionSummary {
            id: self.id,
            quiz_id: self.quiz_id,
            user_id: self.user_id,
            score: self.score,
            total_questions: self.total_questions,
            percentage: self.percentage(),
            submitted_at: self.submitted_at,
        }
    }
}

/// A submission record as shown to admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub submitted_at: DateTime<Utc>,
}

/// The graded result returned to the person who submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub user_email: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub submitted_at: DateTime<Utc>,
    pub results: Vec<QuestionResult>,
}

impl SubmissionResponse {
    /// Save the response as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        Ok(())
    }

    /// Load a response from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read results from {}", path.display()))?;
        let response: SubmissionResponse =
            serde_json::from_str(&content).context("failed to parse results JSON")?;
        Ok(response)
    }

    /// Format the results as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.quiz_title));
        md.push_str(&format!(
            "**Score:** {}/{} ({:.1}%)\n\n",
            self.score, self.total_questions, self.percentage
        ));

        if !self.results.is_empty() {
            md.push_str("| # | Question | Your answer | Correct answer | Result |\n");
            md.push_str("|---|----------|-------------|----------------|--------|\n");
            for (i, r) in self.results.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    i + 1,
                    escape_cell(&r.question_text),
                    escape_cell(&r.user_answer),
                    escape_cell(&r.correct_answer),
                    if r.is_correct { "correct" } else { "wrong" }
                ));
            }

            let explained: Vec<_> = self
                .results
                .iter()
                .enumerate()
                .filter_map(|(i, r)| r.explanation.as_ref().map(|e| (i + 1, e)))
                .collect();
            if !explained.is_empty() {
                md.push_str("\n### Explanations\n\n");
                for (n, e) in explained {
                    md.push_str(&format!("{n}. {e}\n"));
                }
            }
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
