mod content_store;
mod headline_source;
mod membership_store;
mod text_generator;

pub use content_store::{ArchiveWrite, ContentStore};
pub use headline_source::HeadlineSource;
pub use membership_store::MembershipStore;
pub use text_generator::{CompletionRequest, ResponseFormat, TextGenerator};
