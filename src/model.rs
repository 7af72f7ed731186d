//! Trait seams between the pipelines and hosted model providers.
//!
//! Providers implement these the way `herbarium-gemini` does; tests swap in
//! in-memory fakes. Every call is a stateless single shot with no retry and
//! no streaming.

use std::future::Future;

use crate::types::{ComplexityLevel, HerbRecord, ImageUri, Source};

/// Raw output of one web-search-grounded text generation call.
#[derive(Debug, Clone, Default)]
pub struct GroundedReply {
    /// Free text produced by the model.
    pub text: String,
    /// Citation metadata attached to the response, in response order and
    /// possibly containing duplicate URLs.
    pub citations: Vec<Source>,
}

/// Input to the best-effort structured-extraction call.
#[derive(Debug, Clone)]
pub struct RecordRequest {
    /// Herb topic under research.
    pub topic: String,
    /// Audience level of the originating request.
    pub level: ComplexityLevel,
    /// Free text from the grounded call, handed back to the model so it can
    /// fill the record schema from its own prior output.
    pub research_text: String,
}

/// A text-generation endpoint with web-search grounding and a
/// function-call mechanism.
pub trait ResearchModel: Send + Sync {
    /// Provider-specific error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issues one grounded generation call for the given prompt.
    fn grounded_generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<GroundedReply, Self::Error>> + Send;

    /// Asks the model to populate the fixed herb-record schema through its
    /// function-call mechanism. Callers treat any failure as "no record".
    fn extract_record(
        &self,
        request: &RecordRequest,
    ) -> impl Future<Output = Result<HerbRecord, Self::Error>> + Send;
}

/// An image-generation endpoint that can also edit a prior image.
pub trait ImageModel: Send + Sync {
    /// Provider-specific error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generates one infographic for the prompt, as a PNG data URI.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<ImageUri, Self::Error>> + Send;

    /// Applies an instruction to a prior image and returns the new image as
    /// a PNG data URI.
    fn edit(
        &self,
        image: &ImageUri,
        instruction: &str,
    ) -> impl Future<Output = Result<ImageUri, Self::Error>> + Send;
}
