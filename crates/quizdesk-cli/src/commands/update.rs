//! The `quizdesk update` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use quizdesk_core::model::QuizUpdate;

use super::{acting_admin, open_service};

pub async fn execute(
    id: Uuid,
    admin_email: String,
    title: Option<String>,
    description: Option<String>,
    is_active: Option<bool>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let update = QuizUpdate {
        title,
        description,
        is_active,
    };
    anyhow::ensure!(
        !update.is_empty(),
        "nothing to update: pass --title, --description, or --active"
    );

    let service = open_service(config_path.as_deref())?;
    let admin = acting_admin(&service, &admin_email).await?;
    let quiz = service.update_quiz(id, &update, admin.id).await?;

    println!(
        "Updated quiz \"{}\" ({}) [{}]",
        quiz.title,
        quiz.id,
        if quiz.is_active { "active" } else { "inactive" }
    );
    Ok(())
}
