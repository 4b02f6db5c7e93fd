//! The `quizdesk init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quizdesk.toml").exists() {
        println!("quizdesk.toml already exists, skipping.");
    } else {
        std::fs::write("quizdesk.toml", SAMPLE_CONFIG)?;
        println!("Created quizdesk.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizdesk validate --quiz quizzes/example.toml");
    println!("  2. Run: quizdesk register-admin --email you@example.com");
    println!("  3. Run: quizdesk create --quiz quizzes/example.toml --admin you@example.com");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdesk configuration

# Largest page a listing may ask for, and the page size used when none is given.
max_page_limit = 100
default_page_limit = 100

[store]
type = "json"
path = "./quizdesk-data/store.json"

# Keep everything in memory instead (nothing survives the process):
# [store]
# type = "memory"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "Example Quiz"
description = "One question of each kind"
is_active = true

[[questions]]
question_type = "mcq"
question_text = "Which planet is closest to the sun?"
order = 0
options = { A = "Venus", B = "Mercury", C = "Mars" }

[questions.answer]
correct_answer = "B"
explanation = "Mercury orbits at about 0.39 AU."

[[questions]]
question_type = "true_false"
question_text = "Water boils at 100 degrees Celsius at sea level."
order = 1

[questions.answer]
correct_answer = "true"

[[questions]]
question_type = "text"
question_text = "What is the chemical symbol for gold?"
order = 2

[questions.answer]
correct_answer = "Au"
explanation = "From the Latin aurum."
"#;
