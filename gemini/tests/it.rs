//! Integration tests for the Gemini backend.
//!
//! Live tests are `#[ignore]`d: they need `GEMINI_API_KEY`, network access,
//! and quota on both the text and image models.

use herbarium::model::{ImageModel, RecordRequest, ResearchModel};
use herbarium::types::ComplexityLevel;
use herbarium_gemini::GeminiBackend;
use std::env;

fn api_key() -> String {
    env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set")
}

#[tokio::test]
#[ignore = "Requires external Gemini API quota and network access."]
async fn grounded_research_returns_text_and_citations() {
    let backend = GeminiBackend::new(api_key());
    let reply = backend
        .grounded_generate(
            "Use web search to research turmeric. Reply with:\nFACTS: three bullet \
             points\nIMAGE_PROMPT: a detailed English image description",
        )
        .await
        .expect("grounded call failed");
    assert!(!reply.text.is_empty());
    println!("citations: {}", reply.citations.len());
}

#[tokio::test]
#[ignore = "Requires external Gemini API quota and network access."]
async fn extraction_populates_the_record_schema() {
    let backend = GeminiBackend::new(api_key());
    let record = backend
        .extract_record(&RecordRequest {
            topic: "Turmeric".into(),
            level: ComplexityLevel::GeneralPublic,
            research_text: "Turmeric (Curcuma longa) is a rhizome used as an \
                            anti-inflammatory and digestive aid."
                .into(),
        })
        .await
        .expect("extraction failed");
    assert!(!record.name.is_empty());
    assert!(!record.properties.is_empty());
}

#[tokio::test]
#[ignore = "Requires external Gemini API quota and network access."]
async fn generate_then_edit_round_trips_a_png_data_uri() {
    let backend = GeminiBackend::new(api_key());
    let image = backend
        .generate("A simple botanical illustration of a ginger rhizome")
        .await
        .expect("generation failed");
    assert!(image.as_str().starts_with("data:image/png;base64,"));

    let edited = backend
        .edit(&image, "Add a small caption label at the bottom")
        .await
        .expect("edit failed");
    assert!(edited.as_str().starts_with("data:image/png;base64,"));
}
