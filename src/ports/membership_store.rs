use std::collections::BTreeSet;

use crate::domain::{AppError, GroupIdentity, UserId};

/// Port for group membership sets.
pub trait MembershipStore {
    /// Add `user` to the group's member set in a single atomic request.
    ///
    /// Adding an existing member is a no-op. Implementations must not read
    /// the set and write it back.
    fn add_member(&self, group: &GroupIdentity, user: &UserId) -> Result<(), AppError>;

    /// Current members of the group; empty when the group has none yet.
    fn members(&self, group: &GroupIdentity) -> Result<BTreeSet<UserId>, AppError>;
}

impl<T: MembershipStore + ?Sized> MembershipStore for &T {
    fn add_member(&self, group: &GroupIdentity, user: &UserId) -> Result<(), AppError> {
        (**self).add_member(group, user)
    }

    fn members(&self, group: &GroupIdentity) -> Result<BTreeSet<UserId>, AppError> {
        (**self).members(group)
    }
}
