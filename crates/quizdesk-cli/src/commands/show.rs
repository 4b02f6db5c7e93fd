//! The `quizdesk show` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use quizdesk_core::model::{Options, PublicQuiz, Quiz};

use super::open_service;

pub async fn execute(
    id: Uuid,
    public: bool,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let service = open_service(config_path.as_deref())?;

    if public {
        let quiz = service.get_quiz_for_public(id).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        } else {
            print_public(&quiz);
        }
    } else {
        let quiz = service.get_quiz_for_admin(id).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        } else {
            print_full(&quiz);
        }
    }
    Ok(())
}

fn print_header(title: &str, id: Uuid, description: Option<&str>) {
    println!("{title} ({id})");
    if let Some(description) = description {
        println!("{description}");
    }
    println!();
}

fn print_options(options: Option<&Options>) {
    for (key, label) in options.into_iter().flatten() {
        println!("     {key}) {label}");
    }
}

fn print_public(quiz: &PublicQuiz) {
    print_header(&quiz.title, quiz.id, quiz.description.as_deref());
    for (i, q) in quiz.questions.iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, q.question_type, q.question_text);
        println!("     id: {}", q.id);
        print_options(q.options.as_ref());
    }
}

fn print_full(quiz: &Quiz) {
    print_header(&quiz.title, quiz.id, quiz.description.as_deref());
    println!(
        "Status: {}",
        if quiz.is_active { "active" } else { "inactive" }
    );
    println!();

    for (i, q) in quiz.questions.iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, q.question_type, q.question_text);
        println!("     id: {}", q.id);
        print_options(q.options.as_ref());
        match &q.answer {
            Some(answer) => {
                println!("     answer: {}", answer.correct_answer);
                if let Some(explanation) = &answer.explanation {
                    println!("     explanation: {explanation}");
                }
            }
            None => println!("     answer: (missing)"),
        }
    }
}
