//! Instruction strings for the model calls.
//!
//! Pure string assembly. The research prompt pins the `FACTS:` /
//! `IMAGE_PROMPT:` layout that [`crate::parse`] scrapes back out of the
//! free-text response.

use crate::types::{ComplexityLevel, Language, ResearchRequest, VisualStyle};

/// Sentinel opening the facts section of a research response.
pub const FACTS_MARKER: &str = "FACTS:";
/// Sentinel opening the image-prompt section of a research response.
pub const IMAGE_PROMPT_MARKER: &str = "IMAGE_PROMPT:";

const fn level_clause(level: ComplexityLevel) -> &'static str {
    match level {
        ComplexityLevel::PrimaryStudent => {
            "Target audience: primary-school students (ages 6-12). Favor bright colors, \
             simple wording, and large labels."
        }
        ComplexityLevel::SecondaryStudent => {
            "Target audience: secondary-school students. Favor academically accurate \
             information with clear diagrams and captions."
        }
        ComplexityLevel::Expert => {
            "Target audience: experts and pharmacists. Favor plant structure detail, \
             active chemical compounds, and in-depth medicinal properties."
        }
        ComplexityLevel::GeneralPublic => {
            "Target audience: the general public. Favor visual appeal and benefits \
             that apply to everyday life."
        }
    }
}

const fn style_clause(style: VisualStyle) -> &'static str {
    match style {
        VisualStyle::BotanicalIllustration => "Style: classic botanical illustration.",
        VisualStyle::RealisticPhoto => "Style: high-quality realistic photo, natural light.",
        VisualStyle::Cartoon => "Style: educational cartoon, bright colors.",
        VisualStyle::Infographic => "Style: clean modern infographic.",
        VisualStyle::TechnicalSketch => "Style: modern educational digital illustration.",
    }
}

/// Builds the web-search-grounded research instruction for a request.
///
/// Total on its input domain; no error conditions, no side effects.
#[must_use]
pub fn research_prompt(request: &ResearchRequest) -> String {
    format!(
        "You are an expert in botany and Thai medicinal herbs.\n\
         Your goal is to research \"{topic}\" to produce learning material.\n\
         \n\
         Important: use web search to find the most accurate information available.\n\
         {level}\n\
         {style}\n\
         Write facts in {language}.\n\
         \n\
         Reply in exactly this layout:\n\
         {facts} 3-5 bullet points summarizing the medicinal properties\n\
         {image} a very detailed image description in English",
        topic = request.topic,
        level = level_clause(request.level),
        style = style_clause(request.style),
        language = request.language.name(),
        facts = FACTS_MARKER,
        image = IMAGE_PROMPT_MARKER,
    )
}

/// Generic image prompt used when the response carries no recognizable
/// `IMAGE_PROMPT:` section.
#[must_use]
pub fn fallback_image_prompt(topic: &str) -> String {
    format!("Botanical illustration of {topic}")
}

/// Instruction for the best-effort structured-extraction call.
#[must_use]
pub fn record_prompt(topic: &str, level: ComplexityLevel, research_text: &str) -> String {
    format!(
        "Record the herb research below into the database by calling the \
         record_herb_research function.\n\
         Herb: {topic}\n\
         Audience level: {level}\n\
         \n\
         Research notes:\n{research_text}",
        level = level.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn prompt_embeds_topic_and_markers() {
        let request = ResearchRequest::new("Fingerroot");
        let prompt = research_prompt(&request);
        assert!(prompt.contains("\"Fingerroot\""));
        assert!(prompt.contains(FACTS_MARKER));
        assert!(prompt.contains(IMAGE_PROMPT_MARKER));
    }

    #[test]
    fn each_level_selects_a_distinct_clause() {
        let levels = [
            ComplexityLevel::PrimaryStudent,
            ComplexityLevel::SecondaryStudent,
            ComplexityLevel::Expert,
            ComplexityLevel::GeneralPublic,
        ];
        let clauses: Vec<&str> = levels.iter().map(|l| level_clause(*l)).collect();
        for (i, a) in clauses.iter().enumerate() {
            for b in &clauses[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn language_clause_follows_request() {
        let request = ResearchRequest::new("Turmeric").language(Language::English);
        assert!(research_prompt(&request).contains("Write facts in English."));
    }

    #[test]
    fn fallback_prompt_names_topic() {
        assert_eq!(
            fallback_image_prompt("Turmeric"),
            "Botanical illustration of Turmeric"
        );
    }
}
