// Re-export network modules
pub mod api_client;
pub mod config;
pub mod status_source;

// Re-export commonly used items
pub use api_client::{ApiClient, FetchReply};
pub use config::ViewerConfig;
pub use status_source::{ArtifactProbe, QueueStatusSource};
