pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod register_admin;
pub mod show;
pub mod submissions;
pub mod submit;
pub mod update;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};

use quizdesk_core::model::Admin;
use quizdesk_core::service::QuizService;
use quizdesk_store::config::load_config_from;
use quizdesk_store::create_store;

/// Load the config and open the store it names.
pub fn open_service(config_path: Option<&Path>) -> Result<QuizService> {
    let config = load_config_from(config_path)?;
    let store = create_store(&config.store)?;
    tracing::debug!(backend = store.name(), "store opened");
    Ok(QuizService::new(store, config.service_config()))
}

/// Resolve the acting admin from an email address.
pub async fn acting_admin(service: &QuizService, email: &str) -> Result<Admin> {
    Ok(service.admin_by_email(email).await?)
}

pub fn format_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
