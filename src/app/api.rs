//! API Facade for the application.
//!
//! Each function loads configuration, wires the adapters it needs and runs
//! one command.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{Local, NaiveDate, Utc};

use crate::adapters::{
    FirestoreStore, HttpGeminiClient, HttpHeadlineSource, MemoryStore, RetryPolicy,
    RetryingTextGenerator,
};
use crate::app::AppContext;
use crate::app::commands;
use crate::domain::configuration::load_config;
use crate::domain::{AppConfig, GroupTable};
use crate::ports::ContentStore;

pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use crate::domain::{AppError, GenerationMode, GroupIdentity, UserId};

/// Options for a generate run as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Overrides `[generation].mode`.
    pub mode: Option<GenerationMode>,
    /// Overrides the local calendar date.
    pub date: Option<NaiveDate>,
    /// Generate without writing to Firestore.
    pub dry_run: bool,
}

fn load(config_path: Option<&Path>) -> Result<(AppConfig, GroupTable), AppError> {
    let config = load_config(config_path)?;
    let table = config.groups.table()?;
    Ok((config, table))
}

/// Generate, archive and publish the day's questions.
pub fn generate(
    config_path: Option<&Path>,
    request: &GenerateRequest,
) -> Result<GenerateOutcome, AppError> {
    let config = load_config(config_path)?;
    let options = GenerateOptions {
        mode: request.mode.unwrap_or(config.generation.mode),
        date: request.date.unwrap_or_else(|| Local::now().date_naive()),
        now: Utc::now(),
    };

    if request.dry_run {
        return run_generate(&config, MemoryStore::new(), &options);
    }
    let store = FirestoreStore::from_env_with_config(&config.firestore)?;
    run_generate(&config, store, &options)
}

fn run_generate<C: ContentStore>(
    config: &AppConfig,
    store: C,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let transport = HttpGeminiClient::from_env_with_config(&config.gemini)?;
    let generator =
        RetryingTextGenerator::new(Box::new(transport), RetryPolicy::from_config(&config.gemini));
    let headlines = match options.mode {
        GenerationMode::Headlines => {
            Some(HttpHeadlineSource::from_env_with_config(&config.headlines)?)
        }
        GenerationMode::SelfSourced => None,
    };

    let ctx = AppContext::new(generator, headlines, store, config.generation.clone());
    commands::generate::execute(&ctx, options)
}

/// Map answers to a group without touching any store.
pub fn classify(config_path: Option<&Path>, answers: &[String]) -> Result<GroupIdentity, AppError> {
    let (_, table) = load(config_path)?;
    commands::groups::classify(&table, answers)
}

/// Classify the answers and register the user in the resulting group.
pub fn assign(
    config_path: Option<&Path>,
    user: &str,
    answers: &[String],
) -> Result<GroupIdentity, AppError> {
    let (config, table) = load(config_path)?;
    let connect = || FirestoreStore::from_env_with_config(&config.firestore);
    commands::assign::execute(&table, connect, user, answers)
}

/// Sorted members of a group.
pub fn members(
    config_path: Option<&Path>,
    group: &str,
) -> Result<(GroupIdentity, BTreeSet<UserId>), AppError> {
    let (config, table) = load(config_path)?;
    let connect = || FirestoreStore::from_env_with_config(&config.firestore);
    commands::members::execute(&table, connect, group)
}

/// The configured pattern-to-group table.
pub fn groups(config_path: Option<&Path>) -> Result<Vec<GroupIdentity>, AppError> {
    let (_, table) = load(config_path)?;
    Ok(commands::groups::list(&table))
}
