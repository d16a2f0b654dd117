pub mod firestore_store;
pub mod gemini_client_http;
pub mod headlines_http;
pub mod memory_store;
pub mod text_generator_retrying;

pub use firestore_store::FirestoreStore;
pub use gemini_client_http::HttpGeminiClient;
pub use headlines_http::HttpHeadlineSource;
pub use memory_store::MemoryStore;
pub use text_generator_retrying::{RetryPolicy, RetryingTextGenerator};
