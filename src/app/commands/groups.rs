use crate::domain::{AppError, GroupIdentity, GroupTable, ResponseVector};

/// Every group in table order, from all-deny to all-affirm.
pub fn list(table: &GroupTable) -> Vec<GroupIdentity> {
    table.identities().collect()
}

/// Classify raw answer tokens without touching any store.
pub fn classify<S: AsRef<str>>(table: &GroupTable, answers: &[S]) -> Result<GroupIdentity, AppError> {
    table.classify(&ResponseVector::parse(answers)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_patterns_in_order() {
        let patterns: Vec<_> = list(&GroupTable::default())
            .iter()
            .map(|g| format!("{} {}", g.pattern(), g.name()))
            .collect();
        assert_eq!(patterns.first().unwrap(), "000 Nova");
        assert_eq!(patterns.last().unwrap(), "111 Flora");
        assert_eq!(patterns.len(), 8);
    }

    #[test]
    fn classify_accepts_mixed_tokens() {
        let group = classify(&GroupTable::default(), &["Y", "no", "1"]).unwrap();
        assert_eq!(group.name(), "Anubis");
    }

    #[test]
    fn classify_rejects_unknown_token() {
        let err = classify(&GroupTable::default(), &["yes", "perhaps", "no"]).unwrap_err();
        assert!(matches!(err, AppError::InvalidResponseVector(_)));
    }
}
