//! The `quizdesk delete` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use super::{acting_admin, open_service};

pub async fn execute(id: Uuid, admin_email: String, config_path: Option<PathBuf>) -> Result<()> {
    let service = open_service(config_path.as_deref())?;
    let admin = acting_admin(&service, &admin_email).await?;
    service.delete_quiz(id, admin.id).await?;
    println!("Deleted quiz {id}");
    Ok(())
}
