use serde::Deserialize;

use crate::domain::AppError;

#[derive(Debug, Deserialize)]
struct QuestionBatch {
    questions: Vec<String>,
}

/// Parse a `{"questions": [...]}` completion holding exactly `expected` entries.
///
/// Output is never repaired: malformed JSON, a missing key, a wrong count or
/// an empty entry all fail.
pub fn parse_question_batch(raw: &str, expected: usize) -> Result<Vec<String>, AppError> {
    let batch: QuestionBatch = serde_json::from_str(raw.trim())
        .map_err(|err| AppError::generation(format!("malformed question batch: {}", err)))?;

    if batch.questions.len() != expected {
        return Err(AppError::generation(format!(
            "expected {} questions, got {}",
            expected,
            batch.questions.len()
        )));
    }

    batch
        .questions
        .into_iter()
        .enumerate()
        .map(|(position, question)| {
            let question = question.trim().to_string();
            if question.is_empty() {
                Err(AppError::generation(format!("question {} is empty", position + 1)))
            } else {
                Ok(question)
            }
        })
        .collect()
}

/// Clean a free-text statement completion.
pub fn normalize_statement(raw: &str) -> Result<String, AppError> {
    let mut statement = raw.trim();
    for (open, close) in [('"', '"'), ('\u{201c}', '\u{201d}'), ('\'', '\'')] {
        if statement.len() >= open.len_utf8() + close.len_utf8()
            && statement.starts_with(open)
            && statement.ends_with(close)
        {
            statement = statement[open.len_utf8()..statement.len() - close.len_utf8()].trim();
            break;
        }
    }

    if statement.is_empty() {
        return Err(AppError::generation("empty statement"));
    }
    Ok(statement.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_batch() {
        let raw = r#"{"questions": ["Is AI moving too fast?", " Are athletes paid too much? "]}"#;
        let questions = parse_question_batch(raw, 2).unwrap();
        assert_eq!(questions, vec!["Is AI moving too fast?", "Are athletes paid too much?"]);
    }

    #[test]
    fn wrong_count_is_failure() {
        let raw = r#"{"questions": ["a?", "b?", "c?", "d?"]}"#;
        let err = parse_question_batch(raw, 5).unwrap_err();
        assert!(matches!(err, AppError::GenerationFailure { .. }));
        assert!(err.to_string().contains("expected 5 questions, got 4"));
    }

    #[test]
    fn malformed_json_is_failure() {
        assert!(parse_question_batch("questions: a, b", 2).is_err());
        assert!(parse_question_batch(r#"{"items": ["a?"]}"#, 1).is_err());
    }

    #[test]
    fn fenced_json_is_not_repaired() {
        let raw = "```json\n{\"questions\": [\"a?\"]}\n```";
        assert!(parse_question_batch(raw, 1).is_err());
    }

    #[test]
    fn blank_entry_is_failure() {
        let raw = r#"{"questions": ["a?", "  "]}"#;
        assert!(parse_question_batch(raw, 2).is_err());
    }

    #[test]
    fn statement_quotes_are_stripped() {
        assert_eq!(
            normalize_statement("  \"Remote work kills culture.\"\n").unwrap(),
            "Remote work kills culture."
        );
        assert_eq!(
            normalize_statement("\u{201c}Tipping has gone too far.\u{201d}").unwrap(),
            "Tipping has gone too far."
        );
    }

    #[test]
    fn empty_statement_is_failure() {
        assert!(normalize_statement("  \"\"  ").is_err());
        assert!(normalize_statement("").is_err());
    }
}
