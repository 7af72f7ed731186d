//! Interactive terminal front end for herbarium.
//!
//! Type an herb name to research it and render an infographic; the PNG is
//! written into the output directory. `/edit`, `/save`, `/dark` and `/quit`
//! drive the rest of the session.

mod sheet;

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use clap::{Parser, ValueEnum};
use herbarium::host::KeyGate;
use herbarium::studio::{DisplayMode, Outcome, SaveOutcome};
use herbarium::types::{ComplexityLevel, Language, VisualStyle};
use herbarium::{HostError, ResearchRequest, Studio};
use herbarium_gemini::GeminiBackend;
use sheet::Sink;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Primary,
    Secondary,
    Expert,
    General,
}

impl From<LevelArg> for ComplexityLevel {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::Primary => Self::PrimaryStudent,
            LevelArg::Secondary => Self::SecondaryStudent,
            LevelArg::Expert => Self::Expert,
            LevelArg::General => Self::GeneralPublic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Botanical,
    Photo,
    Cartoon,
    Infographic,
    Sketch,
}

impl From<StyleArg> for VisualStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Botanical => Self::BotanicalIllustration,
            StyleArg::Photo => Self::RealisticPhoto,
            StyleArg::Cartoon => Self::Cartoon,
            StyleArg::Infographic => Self::Infographic,
            StyleArg::Sketch => Self::TechnicalSketch,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
    Thai,
    English,
}

impl From<LangArg> for Language {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::Thai => Self::Thai,
            LangArg::English => Self::English,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "herbarium", about = "Research herbs and render infographics")]
struct Args {
    /// Herb to research immediately; omit to start the interactive loop.
    topic: Option<String>,

    /// Audience complexity level.
    #[arg(long, value_enum, default_value_t = LevelArg::Secondary)]
    level: LevelArg,

    /// Visual style for the infographic.
    #[arg(long, value_enum, default_value_t = StyleArg::Infographic)]
    style: StyleArg,

    /// Language facts are written in.
    #[arg(long, value_enum, default_value_t = LangArg::Thai)]
    language: LangArg,

    /// Directory generated PNGs are written into.
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Apps Script web-app URL for real sheet saves; simulated when absent.
    #[arg(long)]
    sheet_url: Option<String>,

    /// Override the research model.
    #[arg(long)]
    text_model: Option<String>,

    /// Override the image model.
    #[arg(long)]
    image_model: Option<String>,
}

/// Key gate backed by the `GEMINI_API_KEY` environment variable.
struct EnvKeyGate;

impl KeyGate for EnvKeyGate {
    async fn has_selected_key(&self) -> bool {
        std::env::var("GEMINI_API_KEY").is_ok_and(|key| !key.is_empty())
    }

    async fn open_selector(&self) -> Result<(), HostError> {
        Err(HostError::NoKeySelector)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    if !EnvKeyGate.has_selected_key().await {
        anyhow::bail!("GEMINI_API_KEY is not set; export a billing-enabled API key first");
    }
    let api_key = std::env::var("GEMINI_API_KEY")?;

    let mut backend = GeminiBackend::new(api_key);
    if let Some(model) = &args.text_model {
        backend = backend.with_text_model(model);
    }
    if let Some(model) = &args.image_model {
        backend = backend.with_image_model(model);
    }

    let studio = Studio::with_sheet(
        backend.clone(),
        backend,
        Sink::from_url(args.sheet_url.clone()),
    );

    if let Some(topic) = &args.topic {
        submit(&studio, &args, topic).await;
        return Ok(());
    }

    if !studio.snapshot().prefs.intro_seen {
        println!("herbarium — type an herb name to research it.");
        println!("Commands: /edit <instruction>, /save, /dark, /quit");
        studio.dismiss_intro();
    }
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("/quit") || line.eq_ignore_ascii_case("/exit") {
            break;
        }
        if line.eq_ignore_ascii_case("/dark") {
            studio.toggle_display_mode();
            let mode = match studio.snapshot().prefs.mode {
                DisplayMode::Dark => "dark",
                DisplayMode::Light => "light",
            };
            println!("display mode: {mode}");
            continue;
        }
        if line.eq_ignore_ascii_case("/save") {
            save(&studio).await;
            continue;
        }
        if let Some(instruction) = line.strip_prefix("/edit") {
            edit(&studio, &args, instruction.trim()).await;
            continue;
        }
        submit(&studio, &args, line).await;
    }
    Ok(())
}

async fn submit(studio: &Studio<GeminiBackend, GeminiBackend, Sink>, args: &Args, topic: &str) {
    let request = ResearchRequest::new(topic)
        .level(args.level.into())
        .style(args.style.into())
        .language(args.language.into());
    println!("researching {topic}...");
    match studio.submit(request).await {
        Outcome::Completed => report_artifact(studio, &args.out),
        Outcome::EmptyInput => println!("nothing to research"),
        Outcome::Busy => println!("an operation is already running"),
        Outcome::NoArtifact => {}
        Outcome::Failed => report_error(studio),
    }
}

async fn edit(studio: &Studio<GeminiBackend, GeminiBackend, Sink>, args: &Args, instruction: &str) {
    println!("editing latest infographic...");
    match studio.edit_latest(instruction).await {
        Outcome::Completed => report_artifact(studio, &args.out),
        Outcome::EmptyInput => println!("usage: /edit <instruction>"),
        Outcome::Busy => println!("an operation is already running"),
        Outcome::NoArtifact => println!("nothing to edit yet"),
        Outcome::Failed => report_error(studio),
    }
}

async fn save(studio: &Studio<GeminiBackend, GeminiBackend, Sink>) {
    match studio.save_latest().await {
        SaveOutcome::Saved => {
            if let Some(note) = studio.snapshot().save_note {
                println!("{note}");
            }
        }
        SaveOutcome::Busy => println!("a save is already running"),
        SaveOutcome::NoArtifact => println!("nothing to save yet"),
        SaveOutcome::Failed => report_error(studio),
    }
}

fn report_artifact(studio: &Studio<GeminiBackend, GeminiBackend, Sink>, out: &Path) {
    let view = studio.snapshot();
    if !view.facts.is_empty() {
        println!("facts:");
        for fact in &view.facts {
            println!("  - {fact}");
        }
    }
    if !view.sources.is_empty() {
        println!("sources:");
        for source in &view.sources {
            println!("  {} <{}>", source.title, source.url);
        }
    }
    let Some(artifact) = studio.latest() else {
        return;
    };
    match write_png(out, &artifact.id, artifact.image.base64_payload()) {
        Ok(path) => println!("wrote {}", path.display()),
        Err(error) => println!("could not write image: {error}"),
    }
}

fn report_error(studio: &Studio<GeminiBackend, GeminiBackend, Sink>) {
    if let Some(error) = studio.snapshot().error {
        println!("{error}");
    }
}

fn write_png(dir: &Path, id: &str, base64_payload: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let bytes = BASE64
        .decode(base64_payload)
        .context("decoding image payload")?;
    let path = dir.join(format!("{id}.png"));
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
