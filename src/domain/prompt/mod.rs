//! Prompt rendering and strict parsing of generator output.

mod parse;
mod render;

pub use parse::{normalize_statement, parse_question_batch};
pub use render::{QuestionBatchPrompt, render_headline_statement, render_question_batch};
