use std::collections::BTreeMap;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizdesk_core::model::{AnswerDefinition, QuestionDefinition, QuestionType, QuizDefinition};
use quizdesk_core::parser::{parse_quiz_definition_str, FileFormat};
use quizdesk_core::validate::{lint_quiz_definition, validate_quiz_definition};

fn make_definition(n: i32) -> QuizDefinition {
    let questions = (0..n)
        .map(|order| QuestionDefinition {
            question_type: QuestionType::MultipleChoice,
            question_text: format!("Question {order}"),
            options: Some(BTreeMap::from([
                ("A".to_string(), "yes".to_string()),
                ("B".to_string(), "no".to_string()),
                ("C".to_string(), "maybe".to_string()),
            ])),
            order,
            answer: AnswerDefinition {
                correct_answer: "C".into(),
                explanation: None,
            },
        })
        .collect();

    QuizDefinition {
        title: "bench".into(),
        description: None,
        is_active: true,
        questions,
    }
}

fn make_toml(n: usize) -> String {
    let mut s = String::from("[quiz]\ntitle = \"bench\"\n\n");
    for i in 0..n {
        s.push_str(&format!(
            r#"[[questions]]
question_type = "true_false"
question_text = "Statement {i} is true."
order = {i}
answer = {{ correct_answer = "true" }}

"#
        ));
    }
    s
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for n in [10, 100, 1000] {
        let def = make_definition(n);
        group.bench_function(format!("valid/{n}"), |b| {
            b.iter(|| validate_quiz_definition(black_box(&def)))
        });
        group.bench_function(format!("lint/{n}"), |b| {
            b.iter(|| lint_quiz_definition(black_box(&def)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_definition");

    for n in [10, 100] {
        let toml = make_toml(n);
        group.bench_function(format!("toml/{n}"), |b| {
            b.iter(|| {
                parse_quiz_definition_str(
                    black_box(&toml),
                    FileFormat::Toml,
                    Path::new("bench.toml"),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_parse);
criterion_main!(benches);
