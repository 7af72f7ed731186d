//! Research pipeline: grounded call, section scraping, citation dedupe,
//! best-effort structured extraction.

use crate::{
    model::{RecordRequest, ResearchModel},
    parse, prompt,
    types::{ResearchRequest, ResearchResult},
};

/// Drives one research invocation end to end over any [`ResearchModel`].
#[derive(Debug, Clone)]
pub struct ResearchPipeline<M> {
    model: M,
}

impl<M: ResearchModel> ResearchPipeline<M> {
    /// Wraps a research model.
    pub const fn new(model: M) -> Self {
        Self { model }
    }

    /// Runs the full research pipeline for a request.
    ///
    /// Propagates a failure only when the grounded call itself fails. A
    /// missing facts section, a missing image-prompt section, and any
    /// failure of the structured-extraction sub-call all degrade instead.
    pub async fn research(&self, request: &ResearchRequest) -> Result<ResearchResult, M::Error> {
        let instruction = prompt::research_prompt(request);
        let reply = self.model.grounded_generate(&instruction).await?;
        tracing::debug!(
            topic = %request.topic,
            citations = reply.citations.len(),
            "grounded research call completed"
        );

        let extracted = parse::extract_sections(&reply.text, &request.topic);
        let sources = parse::dedupe_sources(reply.citations);

        // Best-effort enrichment: the record is nice to have for the sheet
        // hand-off, never worth failing the whole research over.
        let record_request = RecordRequest {
            topic: request.topic.clone(),
            level: request.level,
            research_text: reply.text,
        };
        let record = match self.model.extract_record(&record_request).await {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::debug!(%error, "structured extraction skipped");
                None
            }
        };

        Ok(ResearchResult {
            image_prompt: extracted.image_prompt,
            facts: extracted.facts,
            sources,
            record,
        })
    }
}
