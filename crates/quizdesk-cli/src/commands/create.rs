//! The `quizdesk create` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdesk_core::parser::parse_quiz_definition;
use quizdesk_core::validate::lint_quiz_definition;

use super::{acting_admin, open_service};

pub async fn execute(
    quiz_path: PathBuf,
    admin_email: String,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let definition = parse_quiz_definition(&quiz_path)?;
    for w in lint_quiz_definition(&definition) {
        tracing::warn!(order = ?w.order, "{}", w.message);
    }

    let service = open_service(config_path.as_deref())?;
    let admin = acting_admin(&service, &admin_email).await?;
    let quiz = service.create_quiz(&definition, admin.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
    } else {
        println!(
            "Created quiz \"{}\" ({}) with {} questions",
            quiz.title,
            quiz.id,
            quiz.question_count()
        );
    }
    Ok(())
}
