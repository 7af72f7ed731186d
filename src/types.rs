//! Value objects shared across the pipelines, the controller, and providers.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Audience the generated material is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityLevel {
    /// Primary-school students (ages 6-12).
    PrimaryStudent,
    /// Secondary-school students.
    #[default]
    SecondaryStudent,
    /// Pharmacists and botany professionals.
    Expert,
    /// General public.
    GeneralPublic,
}

impl ComplexityLevel {
    /// Human-readable label used in prompts and sheet rows.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrimaryStudent => "primary student",
            Self::SecondaryStudent => "secondary student",
            Self::Expert => "expert",
            Self::GeneralPublic => "general public",
        }
    }
}

/// Visual treatment requested for the infographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualStyle {
    /// Classic botanical illustration plates.
    BotanicalIllustration,
    /// High-quality photographic rendering.
    RealisticPhoto,
    /// Bright educational cartoon.
    Cartoon,
    /// Clean modern infographic.
    #[default]
    Infographic,
    /// Technical pencil sketch.
    TechnicalSketch,
}

/// Output language for facts and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// Thai.
    #[default]
    Thai,
    /// English.
    English,
}

impl Language {
    /// Name of the language as written into prompts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Thai => "Thai",
            Self::English => "English",
        }
    }
}

/// Aspect ratios understood by the image endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 16:9 landscape. All infographics are generated at this ratio.
    #[default]
    Wide16x9,
    /// 9:16 portrait.
    Tall9x16,
    /// 1:1.
    Square,
}

impl AspectRatio {
    /// Wire representation expected by the image endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wide16x9 => "16:9",
            Self::Tall9x16 => "9:16",
            Self::Square => "1:1",
        }
    }
}

/// One research submission. Immutable once built.
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    /// Herb name or topic as typed by the user.
    pub topic: String,
    /// Audience complexity level.
    pub level: ComplexityLevel,
    /// Visual style for the infographic.
    pub style: VisualStyle,
    /// Output language.
    pub language: Language,
}

impl ResearchRequest {
    /// Builds a request with default level/style/language.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            level: ComplexityLevel::default(),
            style: VisualStyle::default(),
            language: Language::default(),
        }
    }

    /// Sets the audience level.
    #[must_use]
    pub const fn level(mut self, level: ComplexityLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the visual style.
    #[must_use]
    pub const fn style(mut self, style: VisualStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the output language.
    #[must_use]
    pub const fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// A cited web source attached to a grounded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title reported by the grounding metadata.
    pub title: String,
    /// Page URL.
    pub url: String,
}

/// Structured record the model fills in through the function-call schema.
///
/// `name`, `properties`, `category` and `level` are required by the declared
/// schema; `sources` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbRecord {
    /// Herb name.
    pub name: String,
    /// Short summary of medicinal properties.
    pub properties: String,
    /// Usage category.
    pub category: String,
    /// Target audience level, as free text from the model.
    pub level: String,
    /// Primary reference URL, when the model supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<String>,
}

/// Everything one research pipeline invocation produced. Never mutated.
#[derive(Debug, Clone)]
pub struct ResearchResult {
    /// Detailed English prompt for the image model.
    pub image_prompt: String,
    /// Fact snippets shown while the image renders.
    pub facts: Vec<String>,
    /// Cited sources, unique by URL (last-seen title wins).
    pub sources: Vec<Source>,
    /// Best-effort structured record; absent whenever the extraction
    /// sub-call failed or the model declined to call the function.
    pub record: Option<HerbRecord>,
}

/// A generated image carried around as a base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUri(String);

impl ImageUri {
    const PNG_PREFIX: &'static str = "data:image/png;base64,";

    /// Wraps raw encoded bytes as a PNG data URI.
    #[must_use]
    pub fn wrap_png(base64_data: &str) -> Self {
        Self(format!("{}{base64_data}", Self::PNG_PREFIX))
    }

    /// Accepts an already-formed data URI verbatim.
    #[must_use]
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The full `data:image/...;base64,...` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base64 payload with any `data:image/(png|jpeg|jpg);base64,` prefix
    /// removed, whatever encoding tag the URI carried.
    #[must_use]
    pub fn base64_payload(&self) -> &str {
        for tag in ["png", "jpeg", "jpg"] {
            let prefix = format!("data:image/{tag};base64,");
            if let Some(rest) = self.0.strip_prefix(&prefix) {
                return rest;
            }
        }
        &self.0
    }

    /// True when there is no payload at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base64_payload().is_empty()
    }
}

impl std::fmt::Display for ImageUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated (or edited) infographic plus its originating metadata,
/// as stored in session history.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Creation-time derived token, unique within the session.
    pub id: String,
    /// The rendered image.
    pub image: ImageUri,
    /// Prompt text: the submitted topic, or the edit instruction for
    /// artifacts produced by an edit.
    pub prompt: String,
    /// Topic the artifact originally came from.
    pub topic: String,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Audience level carried from the request.
    pub level: ComplexityLevel,
    /// Visual style carried from the request.
    pub style: VisualStyle,
    /// Language carried from the request.
    pub language: Language,
    /// Structured record carried over from the research result.
    pub record: Option<HerbRecord>,
}

/// Condensed fields forwarded to the spreadsheet capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Herb name.
    pub name: String,
    /// Properties summary.
    pub properties: String,
    /// Usage category.
    pub category: String,
    /// Audience level label.
    pub level: String,
    /// Primary reference URL.
    pub sources: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_data_uri_round_trips() {
        let uri = ImageUri::wrap_png("aGVsbG8=");
        assert_eq!(uri.as_str(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(uri.base64_payload(), "aGVsbG8=");
    }

    #[test]
    fn payload_strips_jpeg_and_jpg_tags() {
        for tag in ["jpeg", "jpg"] {
            let uri = ImageUri::from_data_uri(format!("data:image/{tag};base64,Zm9v"));
            assert_eq!(uri.base64_payload(), "Zm9v");
        }
    }

    #[test]
    fn bare_payload_passes_through() {
        let uri = ImageUri::from_data_uri("Zm9v");
        assert_eq!(uri.base64_payload(), "Zm9v");
        assert!(!uri.is_empty());
    }

    #[test]
    fn rewrap_normalizes_encoding_tag_to_png() {
        let jpeg = ImageUri::from_data_uri("data:image/jpeg;base64,Zm9v");
        let rewrapped = ImageUri::wrap_png(jpeg.base64_payload());
        assert_eq!(rewrapped.as_str(), "data:image/png;base64,Zm9v");
    }
}
