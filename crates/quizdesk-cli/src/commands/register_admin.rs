//! The `quizdesk register-admin` command.

use std::path::PathBuf;

use anyhow::Result;

use super::open_service;

pub async fn execute(email: String, config_path: Option<PathBuf>) -> Result<()> {
    let service = open_service(config_path.as_deref())?;
    let admin = service.register_admin(&email).await?;
    println!("Registered admin {} ({})", admin.email, admin.id);
    Ok(())
}
