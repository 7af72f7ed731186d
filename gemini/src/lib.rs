//! Gemini Developer API provider for `herbarium`.
//!
//! Implements the `herbarium` model traits over the Gemini REST endpoints:
//! [`herbarium::ResearchModel`] as a web-search-grounded `generateContent`
//! call plus a function-calling extraction call, and
//! [`herbarium::ImageModel`] as image-modality `generateContent` calls for
//! both generation and editing.
//!
//! # Quick start
//!
//! ```no_run
//! use herbarium::{ResearchRequest, Studio};
//! use herbarium_gemini::GeminiBackend;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = GeminiBackend::new(std::env::var("GEMINI_API_KEY")?);
//! let studio = Studio::new(backend.clone(), backend);
//! studio.submit(ResearchRequest::new("Fingerroot")).await;
//! # Ok(()) }
//! ```

mod client;
mod config;
mod error;
mod image;
mod research;
mod types;

pub use config::{
    AuthMode, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GEMINI_API_BASE_URL, GeminiBackend,
};
pub use error::GeminiError;
pub use research::RECORD_FUNCTION;
