//! CLI Adapter.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::app::api::{self, GenerateOutcome, GenerateRequest};
use crate::domain::daily_content::parse_date_key;
use crate::domain::{AppError, DailyContent, GenerationMode};

const DEFAULT_LOG_FILTER: &str = "brillianse=info";

#[derive(Parser)]
#[command(name = "brillianse")]
#[command(version)]
#[command(about = "Publish daily yes/no questions and sort respondents into groups", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ./brillianse.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, archive and publish the day's questions
    #[clap(visible_alias = "gen")]
    Generate {
        /// Topic sourcing mode (self-sourced, headlines)
        #[arg(short, long)]
        mode: Option<GenerationMode>,
        /// Publish for this date instead of today (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date_key)]
        date: Option<NaiveDate>,
        /// Generate and print without writing to the store
        #[arg(long)]
        dry_run: bool,
    },
    /// Assign a user to a group from their answers
    #[clap(visible_alias = "a")]
    Assign {
        /// User identifier
        user: String,
        /// Answers in question order (yes/no, agree/disagree, 1/0)
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,
    },
    /// Show the group for a set of answers without registering anyone
    #[clap(visible_alias = "c")]
    Classify {
        /// Answers in question order
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,
    },
    /// List the members of a group
    #[clap(visible_alias = "m")]
    Members {
        /// Group name
        group: String,
    },
    /// Show the answer pattern for every group
    Groups,
}

/// Entry point for the CLI.
pub fn run() {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate { mode, date, dry_run } => {
            run_generate(config, GenerateRequest { mode, date, dry_run })
        }
        Commands::Assign { user, answers } => run_assign(config, &user, &answers),
        Commands::Classify { answers } => run_classify(config, &answers),
        Commands::Members { group } => run_members(config, &group),
        Commands::Groups => run_groups(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run_generate(config: Option<&Path>, request: GenerateRequest) -> Result<(), AppError> {
    let outcome = api::generate(config, &request)?;

    match &outcome {
        GenerateOutcome::Published { content, headline_count, .. } => {
            if request.dry_run {
                println!(
                    "✅ Generated {} questions for {} (dry run, nothing written)",
                    content.questions().len(),
                    content.date_key()
                );
            } else {
                println!(
                    "✅ Published {} questions for {}",
                    content.questions().len(),
                    content.date_key()
                );
            }
            if *headline_count > 0 {
                println!("  {} seeded from headlines", headline_count);
            }
        }
        GenerateOutcome::Republished { content } => {
            println!("✅ Republished archived questions for {}", content.date_key());
        }
    }
    print_questions(outcome.content());
    Ok(())
}

fn print_questions(content: &DailyContent) {
    for (position, question) in content.questions().iter().enumerate() {
        println!("  {}. {}", position + 1, question);
    }
}

fn run_assign(config: Option<&Path>, user: &str, answers: &[String]) -> Result<(), AppError> {
    let group = api::assign(config, user, answers)?;
    println!("✅ Assigned {} to {} ({})", user, group, group.pattern());
    Ok(())
}

fn run_classify(config: Option<&Path>, answers: &[String]) -> Result<(), AppError> {
    let group = api::classify(config, answers)?;
    println!("{} ({})", group, group.pattern());
    Ok(())
}

fn run_members(config: Option<&Path>, group: &str) -> Result<(), AppError> {
    let (identity, members) = api::members(config, group)?;
    if members.is_empty() {
        println!("No members in {}", identity);
        return Ok(());
    }
    for member in members {
        println!("{}", member);
    }
    Ok(())
}

fn run_groups(config: Option<&Path>) -> Result<(), AppError> {
    for group in api::groups(config)? {
        println!("{}  {}", group.pattern(), group);
    }
    Ok(())
}
