pub mod app_config;
pub mod loader;

pub use app_config::{
    AppConfig, FirestoreConfig, GeminiConfig, GenerationConfig, GenerationMode, GroupsConfig,
    HeadlinesConfig,
};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
