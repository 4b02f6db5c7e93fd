//! End-to-end workflow through the `quizdesk` binary over a JSON-file store.
//!
//! Each step is a separate process, so these tests also check that state
//! survives between invocations.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("quizdesk.toml");
        let store = dir.path().join("data").join("store.json");
        std::fs::write(
            &config,
            format!("[store]\ntype = \"json\"\npath = '{}'\n", store.display()),
        )
        .unwrap();
        Self { dir, config }
    }

    fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("quizdesk").unwrap();
        cmd.env_remove("QUIZDESK_STORE_PATH")
            .current_dir(self.dir.path());
        cmd
    }

    /// Run a subcommand with `--config` appended and return its stdout.
    fn run(&self, args: &[&str]) -> String {
        let output = self
            .cmd()
            .args(args)
            .arg("--config")
            .arg(&self.config)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(output).unwrap()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        serde_json::from_str(&self.run(args)).unwrap()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn sample(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../quizzes")
        .join(name)
        .display()
        .to_string()
}

/// Create the geography quiz and return its id and question ids in order.
fn create_geography(ws: &Workspace, admin: &str) -> (String, Vec<String>) {
    let quiz = ws.run_json(&[
        "create",
        "--quiz",
        &sample("geography.toml"),
        "--admin",
        admin,
        "--json",
    ]);
    let id = quiz["id"].as_str().unwrap().to_string();
    let questions = quiz["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect();
    (id, questions)
}

#[test]
fn author_take_and_review_a_quiz() {
    let ws = Workspace::new();

    let out = ws.run(&["register-admin", "--email", "owner@example.com"]);
    assert!(out.contains("Registered admin owner@example.com"));

    let (quiz_id, questions) = create_geography(&ws, "owner@example.com");
    assert_eq!(questions.len(), 3);

    // Public view hides answers.
    let public = ws.run(&["show", "--id", &quiz_id, "--public"]);
    assert!(public.contains("What is the capital of France?"));
    assert!(!public.contains("answer:"));

    let listed = ws.run_json(&["list", "--json"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["question_count"], 3);

    // Everything right, with case and whitespace differences.
    let result_path = ws.path("result.json");
    let result = ws.run_json(&[
        "submit",
        "--id",
        &quiz_id,
        "--email",
        "taker@example.com",
        "--answer",
        &format!("{}=a", questions[0]),
        "--answer",
        &format!("{}=FALSE", questions[1]),
        "--answer",
        &format!("{}= lisbon ", questions[2]),
        "--json",
        "--output",
        result_path.to_str().unwrap(),
    ]);
    assert_eq!(result["score"], 3);
    assert_eq!(result["total_questions"], 3);
    assert_eq!(result["percentage"], 100.0);
    assert_eq!(result["results"][2]["user_answer"], "lisbon");
    assert!(result_path.exists());

    // The saved result can be rendered again without the store.
    let saved = ws.run(&["submission", "--from", result_path.to_str().unwrap()]);
    assert!(saved.contains("## European Capitals"));
    assert!(saved.contains("**Score:** 3/3 (100.0%)"));

    // A wrong answer and two blanks, from an answer sheet.
    let sheet = ws.path("answers.json");
    std::fs::write(&sheet, format!(r#"{{"{}": "B"}}"#, questions[0])).unwrap();
    let markdown = ws.run(&[
        "submit",
        "--id",
        &quiz_id,
        "--email",
        "taker@example.com",
        "--answers",
        sheet.to_str().unwrap(),
    ]);
    assert!(markdown.contains("**Score:** 0/3 (0.0%)"));
    assert!(markdown.contains("### Explanations"));

    let summaries = ws.run_json(&[
        "submissions",
        "--id",
        &quiz_id,
        "--admin",
        "owner@example.com",
        "--json",
    ]);
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["user_id"], summaries[1]["user_id"]);

    let submission_id = result["submission_id"].as_str().unwrap();
    let one = ws.run_json(&["submission", "--id", submission_id]);
    assert_eq!(one["score"], 3);
}

#[test]
fn only_the_owner_changes_a_quiz() {
    let ws = Workspace::new();
    ws.run(&["register-admin", "--email", "owner@example.com"]);
    ws.run(&["register-admin", "--email", "other@example.com"]);
    let (quiz_id, _) = create_geography(&ws, "owner@example.com");

    ws.cmd()
        .args([
            "update",
            "--id",
            quiz_id.as_str(),
            "--admin",
            "other@example.com",
            "--active",
            "false",
        ])
        .arg("--config")
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized"));

    let out = ws.run(&[
        "update",
        "--id",
        &quiz_id,
        "--admin",
        "owner@example.com",
        "--active",
        "false",
    ]);
    assert!(out.contains("[inactive]"));

    // Closed quizzes take no submissions and drop out of the public listing.
    ws.cmd()
        .args(["submit", "--id", quiz_id.as_str(), "--email", "taker@example.com"])
        .arg("--config")
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not active"));
    assert!(ws.run(&["list"]).contains("No quizzes found"));
    assert!(ws
        .run(&["list", "--admin", "owner@example.com"])
        .contains("European Capitals"));

    ws.run(&["delete", "--id", &quiz_id, "--admin", "owner@example.com"]);
    ws.cmd()
        .args(["show", "--id", quiz_id.as_str()])
        .arg("--config")
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiz not found"));
}

#[test]
fn duplicate_admin_and_invalid_quiz_are_rejected() {
    let ws = Workspace::new();
    ws.run(&["register-admin", "--email", "owner@example.com"]);

    ws.cmd()
        .args(["register-admin", "--email", "owner@example.com"])
        .arg("--config")
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));

    let bad = ws.path("bad.toml");
    std::fs::write(&bad, "[quiz]\ntitle = \"Empty\"\n").unwrap();
    ws.cmd()
        .args([
            "create",
            "--quiz",
            bad.to_str().unwrap(),
            "--admin",
            "owner@example.com",
        ])
        .arg("--config")
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one question"));

    assert!(ws
        .run(&["list", "--admin", "owner@example.com"])
        .contains("No quizzes found"));
}
