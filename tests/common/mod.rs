//! Scripted in-memory models for controller and pipeline tests.
// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use herbarium::model::{GroundedReply, ImageModel, RecordRequest, ResearchModel};
use herbarium::types::{HerbRecord, ImageUri, Source};
use tokio::sync::Semaphore;

#[derive(Debug)]
pub struct FakeError(pub &'static str);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FakeError {}

/// Research model driven entirely by the test's script.
pub struct ScriptedResearch {
    pub text: String,
    pub citations: Vec<Source>,
    pub fail_grounded: bool,
    /// `None` makes the extraction sub-call fail.
    pub record: Option<HerbRecord>,
    pub grounded_calls: Arc<AtomicUsize>,
    /// When set, `grounded_generate` blocks until a permit is released,
    /// letting tests hold a submit in flight.
    pub gate: Option<Arc<Semaphore>>,
}

impl Default for ScriptedResearch {
    fn default() -> Self {
        Self {
            text: "FACTS:\n- soothes\n- heals\nIMAGE_PROMPT: a botanical plate".into(),
            citations: vec![Source {
                title: "Herbal DB".into(),
                url: "https://example.com/herb".into(),
            }],
            fail_grounded: false,
            record: None,
            grounded_calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }
}

impl ResearchModel for ScriptedResearch {
    type Error = FakeError;

    async fn grounded_generate(&self, _prompt: &str) -> Result<GroundedReply, FakeError> {
        self.grounded_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        if self.fail_grounded {
            return Err(FakeError("research endpoint down"));
        }
        Ok(GroundedReply {
            text: self.text.clone(),
            citations: self.citations.clone(),
        })
    }

    async fn extract_record(&self, _request: &RecordRequest) -> Result<HerbRecord, FakeError> {
        self.record.clone().ok_or(FakeError("model declined"))
    }
}

/// Image model returning fixed payloads, distinct for generate and edit.
pub struct ScriptedImages {
    pub fail_generate: bool,
    pub fail_edit: bool,
    pub generate_calls: Arc<AtomicUsize>,
}

impl Default for ScriptedImages {
    fn default() -> Self {
        Self {
            fail_generate: false,
            fail_edit: false,
            generate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub const GENERATED_PAYLOAD: &str = "R0VORVJBVEVE";
pub const EDITED_PAYLOAD: &str = "RURJVEVE";

impl ImageModel for ScriptedImages {
    type Error = FakeError;

    async fn generate(&self, _prompt: &str) -> Result<ImageUri, FakeError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_generate {
            return Err(FakeError("no image produced"));
        }
        Ok(ImageUri::wrap_png(GENERATED_PAYLOAD))
    }

    async fn edit(&self, image: &ImageUri, _instruction: &str) -> Result<ImageUri, FakeError> {
        if self.fail_edit {
            return Err(FakeError("no image produced"));
        }
        // Real providers resubmit the stripped payload; mirror the contract.
        assert!(!image.base64_payload().starts_with("data:"));
        Ok(ImageUri::wrap_png(EDITED_PAYLOAD))
    }
}
