use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::domain::{AppError, DailyContent, GroupIdentity, UserId};
use crate::ports::{ArchiveWrite, ContentStore, MembershipStore};

/// In-memory document store for dry runs and tests.
///
/// One mutex guards all documents, so each operation is atomic with respect
/// to every other operation on clones of the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    daily: Option<DailyContent>,
    archive: BTreeMap<NaiveDate, DailyContent>,
    groups: HashMap<String, BTreeSet<UserId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current-day document, if written.
    pub fn daily(&self) -> Option<DailyContent> {
        self.lock().daily.clone()
    }

    /// Number of archived dates.
    pub fn archive_len(&self) -> usize {
        self.lock().archive.len()
    }

    /// Number of groups with at least one member.
    pub fn group_count(&self) -> usize {
        self.lock().groups.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ContentStore for MemoryStore {
    fn put_daily(&self, content: &DailyContent) -> Result<(), AppError> {
        self.lock().daily = Some(content.clone());
        Ok(())
    }

    fn put_archive(&self, content: &DailyContent) -> Result<ArchiveWrite, AppError> {
        let mut state = self.lock();
        match state.archive.get(&content.date()) {
            Some(existing) if existing.same_batch(content) => Ok(ArchiveWrite::Unchanged),
            Some(_) => Err(AppError::ArchiveConflict { date: content.date_key() }),
            None => {
                state.archive.insert(content.date(), content.clone());
                Ok(ArchiveWrite::Created)
            }
        }
    }

    fn get_archive(&self, date: NaiveDate) -> Result<Option<DailyContent>, AppError> {
        Ok(self.lock().archive.get(&date).cloned())
    }
}

impl MembershipStore for MemoryStore {
    fn add_member(&self, group: &GroupIdentity, user: &UserId) -> Result<(), AppError> {
        self.lock().groups.entry(group.name().to_string()).or_default().insert(user.clone());
        Ok(())
    }

    fn members(&self, group: &GroupIdentity) -> Result<BTreeSet<UserId>, AppError> {
        Ok(self.lock().groups.get(group.name()).cloned().unwrap_or_default())
    }
}
