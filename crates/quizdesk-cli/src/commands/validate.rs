//! The `quizdesk validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdesk_core::parser;
use quizdesk_core::validate::{lint_quiz_definition, validate_quiz_definition};

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let definitions = if quiz_path.is_dir() {
        parser::load_definition_directory(&quiz_path)?
    } else {
        let definition = parser::parse_quiz_definition(&quiz_path)?;
        vec![(quiz_path, definition)]
    };

    let mut invalid = 0;
    let mut total_warnings = 0;

    for (path, definition) in &definitions {
        println!(
            "Quiz: {} ({} questions) [{}]",
            definition.title,
            definition.questions.len(),
            path.display()
        );

        if let Err(e) = validate_quiz_definition(definition) {
            println!("  ERROR: {e}");
            invalid += 1;
        }

        let warnings = lint_quiz_definition(definition);
        for w in &warnings {
            let prefix = w
                .order
                .map(|order| format!("  [order {order}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} quiz definition(s) invalid", definitions.len());
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
