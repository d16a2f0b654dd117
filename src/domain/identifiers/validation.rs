/// Validates a string for use as a document identifier.
///
/// Checks:
/// - Non-empty and at most 128 characters
/// - No path separators (/, \)
/// - Not "." or ".."
/// - Not wrapped in double underscores (reserved by the document store)
/// - Characters are alphanumeric, '-', or '_'
pub fn validate_identifier(id: &str) -> bool {
    if id.is_empty() || id.chars().count() > MAX_IDENTIFIER_CHARS {
        return false;
    }
    if id.contains('/') || id.contains('\\') {
        return false;
    }
    if id == "." || id == ".." {
        return false;
    }
    if id.len() > 4 && id.starts_with("__") && id.ends_with("__") {
        return false;
    }
    id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

const MAX_IDENTIFIER_CHARS: usize = 128;

#[macro_export]
macro_rules! impl_validated_id {
    ($name:ident, $err_variant:path) => {
        impl $name {
            /// Validate and create a new instance.
            pub fn new(id: &str) -> Result<Self, $crate::domain::AppError> {
                if $crate::domain::identifiers::validation::validate_identifier(id) {
                    Ok(Self(id.to_string()))
                } else {
                    Err($err_variant(id.to_string()))
                }
            }

            /// Return the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
