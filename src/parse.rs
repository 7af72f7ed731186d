//! Scraping structure back out of free-text research responses.
//!
//! The text endpoint gives no schema guarantee, so everything here is a
//! pure function over the raw response string and degrades instead of
//! failing: a missing `FACTS:` section yields an empty list, a missing
//! `IMAGE_PROMPT:` section falls back to a generic prompt naming the topic.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    prompt,
    types::Source,
};

static FACTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)FACTS:\s*(.*?)(?:IMAGE_PROMPT:|\z)").unwrap()
});

static IMAGE_PROMPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)IMAGE_PROMPT:\s*(.*)\z").unwrap());

/// Sections recovered from one raw research response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Fact lines: newline-split, bullet markers stripped, blanks dropped.
    pub facts: Vec<String>,
    /// Image prompt, or the topic fallback when the marker is absent.
    pub image_prompt: String,
}

/// Extracts the facts and image-prompt sections from a raw response.
///
/// Never fails; see the module docs for the degradation rules.
#[must_use]
pub fn extract_sections(raw: &str, topic: &str) -> Extracted {
    let facts = FACTS_RE
        .captures(raw)
        .map(|caps| split_facts(&caps[1]))
        .unwrap_or_default();

    let image_prompt = IMAGE_PROMPT_RE
        .captures(raw)
        .map(|caps| caps[1].trim().to_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| prompt::fallback_image_prompt(topic));

    Extracted { facts, image_prompt }
}

fn split_facts(section: &str) -> Vec<String> {
    section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(['-', '*', '\u{2022}'])
        .map_or(line, str::trim_start)
}

/// Deduplicates citations by URL, keeping the first-seen position and the
/// last-seen title for each URL.
#[must_use]
pub fn dedupe_sources(sources: Vec<Source>) -> Vec<Source> {
    let mut unique: Vec<Source> = Vec::with_capacity(sources.len());
    for source in sources {
        if let Some(existing) = unique.iter_mut().find(|s| s.url == source.url) {
            existing.title = source.title;
        } else {
            unique.push(source);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(title: &str, url: &str) -> Source {
        Source {
            title: title.into(),
            url: url.into(),
        }
    }

    #[test]
    fn well_formed_response_splits_into_both_sections() {
        let raw = "FACTS:\n- Reduces inflammation\n- Aids digestion\n\n- Rich in curcumin\n\
                   IMAGE_PROMPT: A detailed botanical plate of turmeric rhizomes";
        let extracted = extract_sections(raw, "turmeric");
        assert_eq!(
            extracted.facts,
            vec!["Reduces inflammation", "Aids digestion", "Rich in curcumin"]
        );
        assert_eq!(
            extracted.image_prompt,
            "A detailed botanical plate of turmeric rhizomes"
        );
    }

    #[test]
    fn markers_match_case_insensitively() {
        let raw = "facts:\n- one\nimage_prompt: plate";
        let extracted = extract_sections(raw, "x");
        assert_eq!(extracted.facts, vec!["one"]);
        assert_eq!(extracted.image_prompt, "plate");
    }

    #[test]
    fn missing_image_prompt_falls_back_to_topic_template() {
        let raw = "FACTS:\n- only facts here";
        let extracted = extract_sections(raw, "lemongrass");
        assert_eq!(extracted.facts, vec!["only facts here"]);
        assert_eq!(extracted.image_prompt, "Botanical illustration of lemongrass");
    }

    #[test]
    fn missing_facts_yields_empty_list_not_error() {
        let raw = "IMAGE_PROMPT: ginger root on a wooden table";
        let extracted = extract_sections(raw, "ginger");
        assert!(extracted.facts.is_empty());
        assert_eq!(extracted.image_prompt, "ginger root on a wooden table");
    }

    #[test]
    fn empty_response_degrades_on_both_sections() {
        let extracted = extract_sections("", "holy basil");
        assert!(extracted.facts.is_empty());
        assert_eq!(extracted.image_prompt, "Botanical illustration of holy basil");
    }

    #[test]
    fn empty_sections_behave_like_missing_ones() {
        let extracted = extract_sections("FACTS:\nIMAGE_PROMPT:", "galangal");
        assert!(extracted.facts.is_empty());
        assert_eq!(extracted.image_prompt, "Botanical illustration of galangal");
    }

    #[test]
    fn reordered_markers_still_recover_facts() {
        // The prompt pins FACTS before IMAGE_PROMPT, but nothing stops the
        // model from reordering. Facts stop at end-of-text; the image prompt
        // greedily takes everything after its marker, trailing facts included.
        let raw = "IMAGE_PROMPT: a plate\nFACTS:\n- late fact";
        let extracted = extract_sections(raw, "x");
        assert_eq!(extracted.facts, vec!["late fact"]);
        assert!(extracted.image_prompt.starts_with("a plate"));
    }

    #[test]
    fn mixed_bullet_markers_are_stripped() {
        let raw = "FACTS:\n- dash\n* star\n\u{2022} dot\nplain\nIMAGE_PROMPT: p";
        let extracted = extract_sections(raw, "x");
        assert_eq!(extracted.facts, vec!["dash", "star", "dot", "plain"]);
    }

    #[test]
    fn blank_and_whitespace_lines_are_dropped() {
        let raw = "FACTS:\n- a\n\n   \n- b\nIMAGE_PROMPT: p";
        let extracted = extract_sections(raw, "x");
        assert_eq!(extracted.facts, vec!["a", "b"]);
    }

    #[test]
    fn multiline_image_prompt_is_kept_whole() {
        let raw = "FACTS:\n- a\nIMAGE_PROMPT: first line\nsecond line";
        let extracted = extract_sections(raw, "x");
        assert_eq!(extracted.image_prompt, "first line\nsecond line");
    }

    #[test]
    fn dedupe_keeps_last_title_per_url() {
        let sources = vec![
            source("T1", "a"),
            source("T2", "a"),
            source("T3", "b"),
        ];
        let deduped = dedupe_sources(sources);
        assert_eq!(deduped, vec![source("T2", "a"), source("T3", "b")]);
    }

    #[test]
    fn dedupe_preserves_first_seen_order() {
        let sources = vec![source("1", "b"), source("2", "a"), source("3", "b")];
        let deduped = dedupe_sources(sources);
        assert_eq!(deduped, vec![source("3", "b"), source("2", "a")]);
    }
}
