//! View state controller: a flat `Idle -> Researching -> Imaging -> Idle`
//! machine driving which pipeline call is in flight, the newest-first
//! artifact history, and the single-slot error display.
//!
//! The controller owns all session state behind a mutex that is never held
//! across an await; there is no parallelism to coordinate, only sequential
//! asynchronous continuation, so the lock only guards against interleaved
//! task steps on the same executor.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::{
    host::{SheetSink, SimulatedSheet},
    model::{ImageModel, ResearchModel},
    pipeline::ResearchPipeline,
    types::{Artifact, ResearchRequest, SheetRow, Source},
};

/// User-facing message for a failed submit (research or image stage).
pub const SUBMIT_ERROR: &str = "Could not create the learning material right now.";
/// User-facing message for a failed edit.
pub const EDIT_ERROR: &str = "Could not update the image.";
/// Prefix for a failed sheet save; the underlying error text is appended.
pub const SAVE_ERROR_PREFIX: &str = "Could not save to the sheet: ";

/// How long a save confirmation stays visible.
pub const SAVE_NOTE_TTL: Duration = Duration::from_secs(5);

/// Which pipeline call is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in flight; submit and edit are accepted.
    #[default]
    Idle,
    /// The grounded research call is running.
    Researching,
    /// The image generation or edit call is running.
    Imaging,
}

/// Result of a submit or edit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new artifact was prepended to history.
    Completed,
    /// Another operation was already in flight; the request was ignored.
    Busy,
    /// The topic or instruction was blank; the request was ignored.
    EmptyInput,
    /// Edit was requested with an empty history.
    NoArtifact,
    /// The operation failed; an error message was recorded.
    Failed,
}

/// Result of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The sink confirmed the save; a transient note was recorded.
    Saved,
    /// A save was already in flight; the request was ignored.
    Busy,
    /// There is nothing in history to save.
    NoArtifact,
    /// The sink failed; an error message was recorded.
    Failed,
}

/// Light/dark rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Explicitly-scoped presentation preferences (no ambient globals).
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayPrefs {
    /// Current theme.
    pub mode: DisplayMode,
    /// Whether the onboarding intro has been dismissed this session.
    pub intro_seen: bool,
}

/// Snapshot of displayable session state for the presentation layer.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Current phase.
    pub phase: Phase,
    /// Facts from the most recent research, shown while imaging.
    pub facts: Vec<String>,
    /// Deduplicated sources from the most recent research.
    pub sources: Vec<Source>,
    /// Single-slot error message, if any.
    pub error: Option<String>,
    /// Whether a sheet save is in flight.
    pub saving: bool,
    /// Save confirmation, present until its TTL elapses.
    pub save_note: Option<String>,
    /// Number of artifacts in history.
    pub history_len: usize,
    /// Presentation preferences.
    pub prefs: DisplayPrefs,
}

#[derive(Debug, Default)]
struct SessionState {
    phase: Phase,
    history: Vec<Artifact>,
    facts: Vec<String>,
    sources: Vec<Source>,
    error: Option<String>,
    saving: bool,
    save_note: Option<(String, Instant)>,
    prefs: DisplayPrefs,
    seq: u64,
}

impl SessionState {
    fn next_artifact_id(&mut self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        self.seq += 1;
        format!("{millis}-{}", self.seq)
    }
}

/// Session controller over a research model, an image model, and a sheet
/// sink. At most one research-or-image operation is in flight at a time;
/// saves are independently single-flight.
#[derive(Debug)]
pub struct Studio<R, I, S = SimulatedSheet> {
    research: ResearchPipeline<R>,
    images: I,
    sheet: S,
    state: Mutex<SessionState>,
}

impl<R, I> Studio<R, I>
where
    R: ResearchModel,
    I: ImageModel,
{
    /// Builds a studio with the simulated sheet sink.
    pub fn new(research: R, images: I) -> Self {
        Self::with_sheet(research, images, SimulatedSheet)
    }
}

impl<R, I, S> Studio<R, I, S>
where
    R: ResearchModel,
    I: ImageModel,
    S: SheetSink,
{
    /// Builds a studio with an explicit sheet sink.
    pub fn with_sheet(research: R, images: I, sheet: S) -> Self {
        Self {
            research: ResearchPipeline::new(research),
            images,
            sheet,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs the success path `Idle -> Researching -> Imaging -> Idle` for a
    /// topic, prepending the finished artifact to history. A request while
    /// another is in flight is ignored, not queued.
    pub async fn submit(&self, request: ResearchRequest) -> Outcome {
        if request.topic.trim().is_empty() {
            return Outcome::EmptyInput;
        }
        {
            let mut state = self.state();
            if state.phase != Phase::Idle {
                return Outcome::Busy;
            }
            state.phase = Phase::Researching;
            state.error = None;
            state.save_note = None;
            state.facts.clear();
            state.sources.clear();
        }
        tracing::info!(topic = %request.topic, "researching herb");

        let research = match self.research.research(&request).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(%error, "research call failed");
                return self.fail(SUBMIT_ERROR);
            }
        };
        {
            let mut state = self.state();
            state.facts.clone_from(&research.facts);
            state.sources.clone_from(&research.sources);
            state.phase = Phase::Imaging;
        }
        tracing::info!(topic = %request.topic, "rendering infographic");

        match self.images.generate(&research.image_prompt).await {
            Ok(image) => {
                let mut state = self.state();
                let artifact = Artifact {
                    id: state.next_artifact_id(),
                    image,
                    prompt: request.topic.clone(),
                    topic: request.topic,
                    created_at: SystemTime::now(),
                    level: request.level,
                    style: request.style,
                    language: request.language,
                    record: research.record,
                };
                state.history.insert(0, artifact);
                state.phase = Phase::Idle;
                Outcome::Completed
            }
            Err(error) => {
                tracing::warn!(%error, "image generation failed");
                self.fail(SUBMIT_ERROR)
            }
        }
    }

    /// Edits the most recent artifact (`Idle -> Imaging -> Idle`, research
    /// skipped). The new artifact keeps the prior one's level, style,
    /// language, and record; only image data and prompt text change.
    pub async fn edit_latest(&self, instruction: &str) -> Outcome {
        if instruction.trim().is_empty() {
            return Outcome::EmptyInput;
        }
        let base = {
            let mut state = self.state();
            if state.phase != Phase::Idle {
                return Outcome::Busy;
            }
            let Some(latest) = state.history.first().cloned() else {
                return Outcome::NoArtifact;
            };
            state.phase = Phase::Imaging;
            latest
        };
        tracing::info!(topic = %base.topic, "editing latest infographic");

        match self.images.edit(&base.image, instruction).await {
            Ok(image) => {
                let mut state = self.state();
                let artifact = Artifact {
                    id: state.next_artifact_id(),
                    image,
                    prompt: instruction.to_owned(),
                    created_at: SystemTime::now(),
                    ..base
                };
                state.history.insert(0, artifact);
                state.phase = Phase::Idle;
                state.error = None;
                Outcome::Completed
            }
            Err(error) => {
                tracing::warn!(%error, "image edit failed");
                self.fail(EDIT_ERROR)
            }
        }
    }

    /// Sends the latest artifact's condensed fields to the sheet sink.
    /// Independent of the research/imaging machine; gated by its own
    /// in-flight flag.
    pub async fn save_latest(&self) -> SaveOutcome {
        let row = {
            let mut state = self.state();
            if state.saving {
                return SaveOutcome::Busy;
            }
            let Some(latest) = state.history.first() else {
                return SaveOutcome::NoArtifact;
            };
            let row = sheet_row(latest, &state.sources);
            state.saving = true;
            state.save_note = None;
            row
        };

        let saved = self.sheet.save(&row).await;
        let mut state = self.state();
        state.saving = false;
        match saved {
            Ok(message) => {
                state.save_note = Some((message, Instant::now()));
                state.error = None;
                SaveOutcome::Saved
            }
            Err(error) => {
                state.error = Some(format!("{SAVE_ERROR_PREFIX}{error}"));
                SaveOutcome::Failed
            }
        }
    }

    /// Current displayable state.
    pub fn snapshot(&self) -> SessionView {
        self.snapshot_at(Instant::now())
    }

    /// Displayable state as of `now`; save notes older than
    /// [`SAVE_NOTE_TTL`] are no longer reported.
    pub fn snapshot_at(&self, now: Instant) -> SessionView {
        let state = self.state();
        SessionView {
            phase: state.phase,
            facts: state.facts.clone(),
            sources: state.sources.clone(),
            error: state.error.clone(),
            saving: state.saving,
            save_note: state
                .save_note
                .as_ref()
                .filter(|(_, at)| now.duration_since(*at) < SAVE_NOTE_TTL)
                .map(|(note, _)| note.clone()),
            history_len: state.history.len(),
            prefs: state.prefs,
        }
    }

    /// Clone of the most recent artifact, if any.
    pub fn latest(&self) -> Option<Artifact> {
        self.state().history.first().cloned()
    }

    /// Clone of the whole history, newest first.
    pub fn history(&self) -> Vec<Artifact> {
        self.state().history.clone()
    }

    /// Flips between light and dark mode.
    pub fn toggle_display_mode(&self) {
        let mut state = self.state();
        state.prefs.mode = match state.prefs.mode {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        };
    }

    /// Marks the onboarding intro as dismissed.
    pub fn dismiss_intro(&self) {
        self.state().prefs.intro_seen = true;
    }

    fn fail(&self, message: &str) -> Outcome {
        let mut state = self.state();
        state.error = Some(message.to_owned());
        state.phase = Phase::Idle;
        Outcome::Failed
    }
}

/// Builds the condensed sheet row for an artifact, substituting fallbacks
/// for anything the structured record did not supply: properties fall back
/// to the raw topic, the category to "general", and the source URL to the
/// record's own reference, then the first session citation, then "N/A".
#[must_use]
pub fn sheet_row(artifact: &Artifact, session_sources: &[Source]) -> SheetRow {
    let record = artifact.record.as_ref();
    let source_url = record
        .and_then(|r| r.sources.clone())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| session_sources.first().map(|s| s.url.clone()))
        .unwrap_or_else(|| "N/A".to_owned());
    SheetRow {
        name: record
            .map(|r| r.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| artifact.topic.clone()),
        properties: record
            .map(|r| r.properties.clone())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| artifact.topic.clone()),
        category: record
            .map(|r| r.category.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "general".to_owned()),
        level: artifact.level.label().to_owned(),
        sources: source_url,
    }
}
