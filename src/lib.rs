// Re-export modules
pub mod config;
pub mod error;
pub mod fetchers;
pub mod generation;
pub mod parsers;
pub mod results;
pub mod router;
pub mod server;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{FetchConfig, GenerationSettings, ServerConfig};
pub use error::{FetchError, GenerationError};
pub use fetchers::{HttpClient, ReqwestClient, fetch_webpage, fetch_youtube};
pub use results::{PageContent, PageKind, TranscriptSource};
pub use router::{SourceKind, fetch_source, looks_like_url, normalize_url};
