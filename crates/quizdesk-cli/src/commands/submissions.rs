//! The `quizdesk submissions` and `quizdesk submission` commands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use quizdesk_core::report::SubmissionResponse;
use uuid::Uuid;

use super::{acting_admin, format_time, open_service};

pub async fn execute(
    quiz_id: Uuid,
    admin_email: String,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let service = open_service(config_path.as_deref())?;
    let admin = acting_admin(&service, &admin_email).await?;
    let summaries = service.list_submissions(quiz_id, admin.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    if summaries.is_empty() {
        println!("No submissions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Submission", "User", "Score", "Percentage", "Submitted"]);
    for s in &summaries {
        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(s.user_id),
            Cell::new(format!("{}/{}", s.score, s.total_questions)),
            Cell::new(format!("{:.1}%", s.percentage)),
            Cell::new(format_time(&s.submitted_at)),
        ]);
    }
    println!("{table}");

    let mean = summaries.iter().map(|s| s.percentage).sum::<f64>() / summaries.len() as f64;
    println!("{} submission(s), mean {mean:.1}%", summaries.len());
    Ok(())
}

pub async fn execute_one(id: Uuid, config_path: Option<PathBuf>) -> Result<()> {
    let service = open_service(config_path.as_deref())?;
    let summary = service.get_submission(id).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Print a graded result saved earlier with `submit --output`.
pub fn execute_saved(path: PathBuf) -> Result<()> {
    let response = SubmissionResponse::load_json(&path)?;
    print!("{}", response.to_markdown());
    Ok(())
}
