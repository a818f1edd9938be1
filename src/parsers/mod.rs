pub mod captions;
pub mod html;
pub mod text;
pub mod youtube;


pub use html::{PageMetadata, extract_metadata, html_to_text};
