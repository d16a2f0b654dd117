use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::AppError;

const QUESTION_BATCH_TEMPLATE: &str = include_str!("../../assets/prompts/question_batch.j2");
const HEADLINE_STATEMENT_TEMPLATE: &str =
    include_str!("../../assets/prompts/headline_statement.j2");

/// Inputs for a self-sourced question batch.
#[derive(Debug, Clone)]
pub struct QuestionBatchPrompt<'a> {
    /// Human-readable date, e.g. `Monday, November 03, 2025`.
    pub today: String,
    pub location: &'a str,
    pub count: usize,
    /// Questions already produced for the day that the batch must not repeat.
    pub existing: &'a [String],
}

pub fn render_question_batch(prompt: &QuestionBatchPrompt<'_>) -> Result<String, AppError> {
    render(
        "question_batch",
        QUESTION_BATCH_TEMPLATE,
        context! {
            today => prompt.today,
            location => prompt.location,
            count => prompt.count,
            existing => prompt.existing,
        },
    )
}

pub fn render_headline_statement(headline: &str) -> Result<String, AppError> {
    render("headline_statement", HEADLINE_STATEMENT_TEMPLATE, context! { headline => headline })
}

fn render(name: &str, template: &str, ctx: minijinja::Value) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.render_str(template, ctx).map_err(|err| {
        AppError::config_error(format!("Failed to render prompt '{}': {}", name, err))
    })
}
