use std::collections::BTreeSet;

use crate::domain::{AppError, GroupIdentity, GroupTable, UserId};
use crate::ports::MembershipStore;

/// List the members of the named group, sorted.
///
/// The group name is resolved before `connect` is called.
pub fn execute<M, F>(
    table: &GroupTable,
    connect: F,
    group: &str,
) -> Result<(GroupIdentity, BTreeSet<UserId>), AppError>
where
    M: MembershipStore,
    F: FnOnce() -> Result<M, AppError>,
{
    let identity = table.find(group)?;
    let members = connect()?.members(&identity)?;
    Ok((identity, members))
}
