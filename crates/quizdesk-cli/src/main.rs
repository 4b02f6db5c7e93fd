//! quizdesk CLI: author quizzes, take them, and review the scores.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "quizdesk", version, about = "Quiz authoring and grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and an example quiz
    Init,

    /// Check quiz definition files without storing them
    Validate {
        /// Path to a .toml/.json quiz definition or a directory of them
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Register a quiz author
    RegisterAdmin {
        #[arg(long)]
        email: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate and store a quiz definition
    Create {
        /// Path to a .toml/.json quiz definition
        #[arg(long)]
        quiz: PathBuf,

        /// Email of the owning admin
        #[arg(long)]
        admin: String,

        /// Print the stored quiz as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List quizzes (an admin's own, or every active quiz)
    List {
        /// Only quizzes owned by this admin, active or not
        #[arg(long)]
        admin: Option<String>,

        #[arg(long, default_value = "0")]
        skip: usize,

        /// Page size (defaults to the configured page limit)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a quiz
    Show {
        #[arg(long)]
        id: Uuid,

        /// Hide answers and refuse inactive quizzes
        #[arg(long)]
        public: bool,

        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Change a quiz's title, description, or active flag
    Update {
        #[arg(long)]
        id: Uuid,

        /// Email of the owning admin
        #[arg(long)]
        admin: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Open (true) or close (false) the quiz
        #[arg(long)]
        active: Option<bool>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete a quiz and its submission records
    Delete {
        #[arg(long)]
        id: Uuid,

        /// Email of the owning admin
        #[arg(long)]
        admin: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Submit answers to a quiz and print the graded result
    Submit {
        #[arg(long)]
        id: Uuid,

        /// Email of the person taking the quiz
        #[arg(long)]
        email: String,

        /// Answer sheet (.json or .toml map of question id to answer)
        #[arg(long)]
        answers: Option<PathBuf>,

        /// A single answer as QUESTION_ID=VALUE (repeatable)
        #[arg(long = "answer")]
        answer: Vec<String>,

        /// Print the result as JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Also save the result as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List score summaries for a quiz
    Submissions {
        #[arg(long)]
        id: Uuid,

        /// Email of the owning admin
        #[arg(long)]
        admin: String,

        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show one submission's score summary, or a result saved by `submit --output`
    Submission {
        #[arg(long, required_unless_present = "from", conflicts_with = "from")]
        id: Option<Uuid>,

        /// Result file written by `submit --output`
        #[arg(long)]
        from: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizdesk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::RegisterAdmin { email, config } => {
            commands::register_admin::execute(email, config).await
        }
        Commands::Create {
            quiz,
            admin,
            json,
            config,
        } => commands::create::execute(quiz, admin, json, config).await,
        Commands::List {
            admin,
            skip,
            limit,
            json,
            config,
        } => commands::list::execute(admin, skip, limit, json, config).await,
        Commands::Show {
            id,
            public,
            json,
            config,
        } => commands::show::execute(id, public, json, config).await,
        Commands::Update {
            id,
            admin,
            title,
            description,
            active,
            config,
        } => commands::update::execute(id, admin, title, description, active, config).await,
        Commands::Delete { id, admin, config } => {
            commands::delete::execute(id, admin, config).await
        }
        Commands::Submit {
            id,
            email,
            answers,
            answer,
            json,
            output,
            config,
        } => commands::submit::execute(id, email, answers, answer, json, output, config).await,
        Commands::Submissions {
            id,
            admin,
            json,
            config,
        } => commands::submissions::execute(id, admin, json, config).await,
        Commands::Submission { id, from, config } => match (id, from) {
            (_, Some(path)) => commands::submissions::execute_saved(path),
            (Some(id), None) => commands::submissions::execute_one(id, config).await,
            (None, None) => Err(anyhow::anyhow!("either --id or --from is required")),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
