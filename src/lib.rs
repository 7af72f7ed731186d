//! # herbarium
//!
//! Herb research and infographic studio over hosted generative models.
//!
//! The application is a thin orchestration layer: a hosted text model does
//! web-grounded research on an herb, a hosted image model renders the
//! researched prompt as an infographic, and an optional spreadsheet
//! capability stores a condensed record. This crate holds everything that
//! is ours to own:
//!
//! - [`prompt`] — instruction strings for the model calls
//! - [`parse`] — scraping `FACTS:` / `IMAGE_PROMPT:` sections and citation
//!   dedupe, the single most failure-prone seam
//! - [`model`] — provider traits ([`ResearchModel`], [`ImageModel`])
//! - [`pipeline`] — the research pipeline with its best-effort
//!   structured-extraction sub-call
//! - [`studio`] — the `Idle -> Researching -> Imaging -> Idle` session
//!   controller with newest-first history
//! - [`host`] — optional host capabilities (key gate, sheet sink) with
//!   null-object fallbacks
//!
//! Providers implement the [`model`] traits; `herbarium-gemini` is the
//! reference implementation.
//!
//! ```no_run
//! use herbarium::{ResearchRequest, Studio};
//! # async fn run(research: impl herbarium::ResearchModel,
//! #              images: impl herbarium::ImageModel) {
//! let studio = Studio::new(research, images);
//! studio.submit(ResearchRequest::new("Fingerroot")).await;
//! if let Some(artifact) = studio.latest() {
//!     println!("{} -> {} bytes of data URI", artifact.topic, artifact.image.as_str().len());
//! }
//! # }
//! ```

pub mod host;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod studio;
pub mod types;

pub use host::{HostError, KeyAlwaysReady, KeyGate, SheetSink, SimulatedSheet};
pub use model::{GroundedReply, ImageModel, RecordRequest, ResearchModel};
pub use pipeline::ResearchPipeline;
pub use studio::{Outcome, Phase, SaveOutcome, SessionView, Studio};
pub use types::{
    Artifact, AspectRatio, ComplexityLevel, HerbRecord, ImageUri, Language, ResearchRequest,
    ResearchResult, SheetRow, Source, VisualStyle,
};
