//! Daily question generation and publication.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::domain::prompt::{
    QuestionBatchPrompt, normalize_statement, parse_question_batch, render_headline_statement,
    render_question_batch,
};
use crate::domain::{AppError, DailyContent, GenerationMode};
use crate::ports::{
    ArchiveWrite, CompletionRequest, ContentStore, HeadlineSource, TextGenerator,
};

const PROMPT_DATE_FORMAT: &str = "%A, %B %d, %Y";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub mode: GenerationMode,
    /// Calendar day the batch is published for.
    pub date: NaiveDate,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    /// A fresh batch was archived and published.
    Published { content: DailyContent, archive: ArchiveWrite, headline_count: usize },
    /// The day was already archived; the archived batch was written to the daily document.
    Republished { content: DailyContent },
}

impl GenerateOutcome {
    pub fn content(&self) -> &DailyContent {
        match self {
            GenerateOutcome::Published { content, .. } => content,
            GenerateOutcome::Republished { content } => content,
        }
    }
}

/// Execute the generate command.
///
/// The archive is written before the daily document, so a failed run never
/// leaves a published batch without its archived copy.
pub fn execute<G, H, C>(
    ctx: &AppContext<G, H, C>,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    G: TextGenerator,
    H: HeadlineSource,
    C: ContentStore,
{
    let expected = ctx.settings().question_count;

    if let Some(archived) = ctx.store().get_archive(options.date)? {
        if archived.questions().len() != expected {
            return Err(AppError::InvalidArchive {
                date: archived.date_key(),
                reason: format!(
                    "expected {} questions, found {}",
                    expected,
                    archived.questions().len()
                ),
            });
        }
        info!(date = %archived.date_key(), "archive exists, republishing");
        ctx.store().put_daily(&archived)?;
        return Ok(GenerateOutcome::Republished { content: archived });
    }

    let (questions, headline_count) = generate_questions(ctx, options)?;
    let content = DailyContent::new(options.date, questions, options.now, expected)?;

    let archive = ctx.store().put_archive(&content)?;
    ctx.store().put_daily(&content)?;

    info!(
        date = %content.date_key(),
        mode = %options.mode,
        questions = content.questions().len(),
        headline_count,
        "published daily questions"
    );
    Ok(GenerateOutcome::Published { content, archive, headline_count })
}

fn generate_questions<G, H, C>(
    ctx: &AppContext<G, H, C>,
    options: &GenerateOptions,
) -> Result<(Vec<String>, usize), AppError>
where
    G: TextGenerator,
    H: HeadlineSource,
    C: ContentStore,
{
    let settings = ctx.settings();
    let expected = settings.question_count;
    let mut questions = Vec::with_capacity(expected);

    if options.mode == GenerationMode::Headlines {
        for headline in fetch_headlines(ctx).iter().take(expected) {
            let prompt = render_headline_statement(headline)?;
            let raw = ctx.generator().complete(&CompletionRequest::text(prompt))?;
            questions.push(normalize_statement(&raw)?);
        }
    }

    let headline_count = questions.len();
    let remaining = expected - headline_count;
    if remaining > 0 {
        let today = options.date.format(PROMPT_DATE_FORMAT).to_string();
        let prompt = render_question_batch(&QuestionBatchPrompt {
            today,
            location: &settings.location,
            count: remaining,
            existing: &questions,
        })?;
        debug!(count = remaining, "requesting self-sourced questions");
        let raw = ctx.generator().complete(&CompletionRequest::json(prompt))?;
        questions.extend(parse_question_batch(&raw, remaining)?);
    }

    Ok((questions, headline_count))
}

/// Headline snippets, or none when the source is missing or unreachable.
fn fetch_headlines<G, H, C>(ctx: &AppContext<G, H, C>) -> Vec<String>
where
    G: TextGenerator,
    H: HeadlineSource,
    C: ContentStore,
{
    let Some(source) = ctx.headlines() else {
        warn!("headline mode without a headline source, using self-sourced questions");
        return Vec::new();
    };

    match source.fetch_headlines() {
        Ok(headlines) => headlines,
        Err(err) => {
            warn!("headline fetch failed, using self-sourced questions: {}", err);
            Vec::new()
        }
    }
}
