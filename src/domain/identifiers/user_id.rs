use crate::domain::AppError;
use crate::impl_validated_id;

/// A validated user identifier.
///
/// Guarantees:
/// - Non-empty
/// - Contains only alphanumeric characters, `-`, or `_`
/// - Usable verbatim as a membership array element and document id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(String);

impl_validated_id!(UserId, AppError::InvalidUserId);

impl From<UserId> for String {
    fn from(val: UserId) -> Self {
        val.0
    }
}
