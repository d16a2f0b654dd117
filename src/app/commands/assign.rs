//! Group assignment: classify a response vector and register the user.

use tracing::info;

use crate::domain::{AppError, GroupIdentity, GroupTable, ResponseVector, UserId};
use crate::ports::MembershipStore;

/// Classifies responses against a validated table and records membership.
///
/// Never reads or removes existing members; registration is a single
/// additive request to the store with no retry.
pub struct GroupAssigner<'a, M: MembershipStore + ?Sized> {
    table: &'a GroupTable,
    store: &'a M,
}

impl<'a, M: MembershipStore + ?Sized> GroupAssigner<'a, M> {
    pub fn new(table: &'a GroupTable, store: &'a M) -> Self {
        Self { table, store }
    }

    /// Pure mapping from responses to group. No I/O.
    pub fn classify(&self, responses: &ResponseVector) -> Result<GroupIdentity, AppError> {
        self.table.classify(responses)
    }

    /// Add `user` to `group`. Re-registering an existing member is a no-op.
    pub fn register(&self, user: &UserId, group: &GroupIdentity) -> Result<(), AppError> {
        self.store.add_member(group, user)?;
        info!(user = %user, group = %group, pattern = %group.pattern(), "user registered");
        Ok(())
    }

    /// Classify, then register. Nothing is written when classification fails.
    pub fn assign_and_register(
        &self,
        user: &UserId,
        responses: &ResponseVector,
    ) -> Result<GroupIdentity, AppError> {
        let group = self.classify(responses)?;
        self.register(user, &group)?;
        Ok(group)
    }
}

/// Execute the assign command from raw user input.
///
/// Input is validated and classified before `connect` is called, so a bad
/// answer vector is reported as such and never opens the store.
pub fn execute<M, F>(
    table: &GroupTable,
    connect: F,
    user: &str,
    answers: &[String],
) -> Result<GroupIdentity, AppError>
where
    M: MembershipStore,
    F: FnOnce() -> Result<M, AppError>,
{
    let user = UserId::new(user)?;
    let responses = ResponseVector::parse(answers)?;
    let group = table.classify(&responses)?;

    let store = connect()?;
    GroupAssigner::new(table, &store).register(&user, &group)?;
    Ok(group)
}
