pub mod configuration;
pub mod daily_content;
pub mod error;
pub mod group;
pub mod identifiers;
pub mod prompt;
pub mod response;

pub use configuration::{
    AppConfig, FirestoreConfig, GeminiConfig, GenerationConfig, GenerationMode, GroupsConfig,
    HeadlinesConfig,
};
pub use daily_content::DailyContent;
pub use error::AppError;
pub use group::{GroupIdentity, GroupTable};
pub use identifiers::UserId;
pub use response::{Response, ResponseVector};
