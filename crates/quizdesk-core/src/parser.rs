//! Quiz definition file parser.
//!
//! Loads quiz definitions and answer sheets from TOML or JSON files and
//! directories. Question types are parsed strictly: an unknown type is an
//! error, never a question that can't be graded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerDefinition, QuestionDefinition, QuestionType, QuizDefinition};
use crate::scoring::SubmittedAnswers;

/// On-disk format of a definition or answer file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            _ => anyhow::bail!(
                "unsupported file extension (expected .toml or .json): {}",
                path.display()
            ),
        }
    }
}

/// Intermediate structure for parsing quiz definition files.
///
/// TOML files carry the quiz fields under a `[quiz]` table and questions as
/// `[[questions]]`; JSON files use the flat `QuizDefinition` shape.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_true")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct JsonQuizFile {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "type")]
    question_type: String,
    #[serde(alias = "prompt")]
    question_text: String,
    #[serde(default)]
    options: Option<BTreeMap<String, String>>,
    order: i32,
    answer: RawAnswer,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Parse a single definition file into a `QuizDefinition`.
pub fn parse_quiz_definition(path: &Path) -> Result<QuizDefinition> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz definition: {}", path.display()))?;

    parse_quiz_definition_str(&content, format, path)
}

/// Parse a definition from a string (useful for testing).
pub fn parse_quiz_definition_str(
    content: &str,
    format: FileFormat,
    source_path: &Path,
) -> Result<QuizDefinition> {
    let (title, description, is_active, raw_questions) = match format {
        FileFormat::Toml => {
            let parsed: TomlQuizFile = toml::from_str(content)
                .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
            (
                parsed.quiz.title,
                parsed.quiz.description,
                parsed.quiz.is_active,
                parsed.questions,
            )
        }
        FileFormat::Json => {
            let parsed: JsonQuizFile = serde_json::from_str(content)
                .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
            (
                parsed.title,
                parsed.description,
                parsed.is_active,
                parsed.questions,
            )
        }
    };

    let questions = raw_questions
        .into_iter()
        .map(|q| {
            let question_type: QuestionType = q.question_type.parse().map_err(|e: String| {
                anyhow::anyhow!("{}: question at order {}: {}", source_path.display(), q.order, e)
            })?;

            Ok(QuestionDefinition {
                question_type,
                question_text: q.question_text,
                options: q.options,
                order: q.order,
                answer: AnswerDefinition {
                    correct_answer: q.answer.correct_answer,
                    explanation: q.answer.explanation,
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizDefinition {
        title,
        description,
        is_active,
        questions,
    })
}

/// Recursively load all `.toml` and `.json` definitions from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_definition_directory(dir: &Path) -> Result<Vec<(PathBuf, QuizDefinition)>> {
    let mut definitions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            definitions.extend(load_definition_directory(&path)?);
        } else if FileFormat::from_path(&path).is_ok() {
            match parse_quiz_definition(&path) {
                Ok(definition) => definitions.push((path, definition)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(definitions)
}

/// Parse an answer sheet: a flat map of question id → answer.
pub fn parse_answers(path: &Path) -> Result<SubmittedAnswers> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;

    let answers = match format {
        FileFormat::Toml => toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML answers: {}", path.display()))?,
        FileFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON answers: {}", path.display()))?,
    };
    Ok(answers)
}
