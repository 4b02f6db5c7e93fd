//! The `quizdesk list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdesk_core::model::QuizListItem;
use quizdesk_core::service::Page;

use super::{acting_admin, format_time, open_service};

pub async fn execute(
    admin_email: Option<String>,
    skip: usize,
    limit: Option<usize>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let service = open_service(config_path.as_deref())?;
    let page = Page { skip, limit };

    let quizzes = match &admin_email {
        Some(email) => {
            let admin = acting_admin(&service, email).await?;
            service.list_quizzes_for_admin(admin.id, page).await?
        }
        None => service.list_active_quizzes(page).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&quizzes)?);
    } else if quizzes.is_empty() {
        println!("No quizzes found.");
    } else {
        print_table(&quizzes);
    }
    Ok(())
}

fn print_table(quizzes: &[QuizListItem]) {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Questions", "Active", "Created"]);

    for quiz in quizzes {
        table.add_row(vec![
            Cell::new(quiz.id),
            Cell::new(&quiz.title),
            Cell::new(quiz.question_count),
            Cell::new(if quiz.is_active { "yes" } else { "no" }),
            Cell::new(format_time(&quiz.created_at)),
        ]);
    }

    println!("{table}");
}
