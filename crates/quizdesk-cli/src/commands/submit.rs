//! The `quizdesk submit` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use quizdesk_core::parser::parse_answers;
use quizdesk_core::scoring::SubmittedAnswers;
use quizdesk_core::service::SubmissionRequest;

use super::open_service;

pub async fn execute(
    id: Uuid,
    email: String,
    answers_path: Option<PathBuf>,
    answer_pairs: Vec<String>,
    json: bool,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut answers = match &answers_path {
        Some(path) => parse_answers(path)?,
        None => SubmittedAnswers::new(),
    };
    for pair in &answer_pairs {
        let (question_id, value) = parse_answer_pair(pair)?;
        answers.insert(question_id, value);
    }

    let service = open_service(config_path.as_deref())?;
    let response = service
        .submit(id, &SubmissionRequest { email, answers })
        .await?;

    if let Some(path) = &output {
        response.save_json(path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", response.to_markdown());
    }
    Ok(())
}

/// Split a `QUESTION_ID=VALUE` argument. The value may be empty or contain `=`.
fn parse_answer_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), value.to_string()))
        }
        _ => anyhow::bail!("invalid --answer '{pair}': expected QUESTION_ID=VALUE"),
    }
}
