use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub(crate) system_instruction: Option<GeminiContent>,
    pub(crate) contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tools: Vec<GeminiTool>,
    #[serde(rename = "toolConfig", skip_serializing_if = "Option::is_none")]
    pub(crate) tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    pub(crate) fn user(parts: Vec<Part>) -> Self {
        Self {
            system_instruction: None,
            contents: vec![GeminiContent::with_parts("user", parts)],
            generation_config: None,
            tools: Vec::new(),
            tool_config: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role: Option<String>,
    /// Parts of the content. Defaults to empty if not present in response.
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

impl GeminiContent {
    pub(crate) fn with_parts(role: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.into()),
            parts,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub(crate) inline_data: Option<InlineData>,
    #[serde(rename = "functionCall", skip_serializing_if = "Option::is_none")]
    pub(crate) function_call: Option<FunctionCall>,
}

impl Part {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
            function_call: None,
        }
    }

    pub(crate) fn inline_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            function_call: None,
        }
    }
}

/// Inline binary payload carried as base64 text on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub(crate) mime_type: String,
    pub(crate) data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) args: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeminiTool {
    FunctionTool {
        #[serde(rename = "functionDeclarations")]
        function_declarations: Vec<FunctionDeclaration>,
    },
    GoogleSearchTool {
        #[serde(rename = "googleSearch")]
        google_search: GoogleSearch,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub(crate) name: String,
    pub(crate) description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) parameters: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ToolConfig {
    #[serde(
        rename = "functionCallingConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) function_calling_config: Option<FunctionCallingConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionCallingConfig {
    pub(crate) mode: FunctionCallingMode,
    #[serde(
        rename = "allowedFunctionNames",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) allowed_function_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionCallingMode {
    Auto,
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f32>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    pub(crate) response_modalities: Option<Vec<String>>,
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    pub(crate) image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(rename = "aspectRatio", skip_serializing_if = "Option::is_none")]
    pub(crate) aspect_ratio: Option<String>,
    #[serde(rename = "imageSize", skip_serializing_if = "Option::is_none")]
    pub(crate) image_size: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    pub(crate) fn primary_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Concatenated text of every text part of the primary candidate.
    pub(crate) fn text(&self) -> String {
        self.primary_candidate()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Arguments of the first function call with the given name, if the
    /// model emitted one.
    pub(crate) fn function_call_args(&self, name: &str) -> Option<Value> {
        self.primary_candidate()
            .and_then(|candidate| candidate.content.as_ref())?
            .parts
            .iter()
            .filter_map(|part| part.function_call.as_ref())
            .find(|call| call.name == name)
            .map(|call| call.args.clone())
    }

    /// First content part carrying inline binary data, if any.
    pub(crate) fn first_inline_data(&self) -> Option<&InlineData> {
        self.primary_candidate()
            .and_then(|candidate| candidate.content.as_ref())?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }

    /// Web citations from the grounding metadata, in response order.
    pub(crate) fn web_citations(&self) -> Vec<(String, String)> {
        self.primary_candidate()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| match (&web.title, &web.uri) {
                        (Some(title), Some(uri)) => Some((title.clone(), uri.clone())),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Candidate {
    pub(crate) content: Option<GeminiContent>,
    #[serde(rename = "finishReason", default)]
    pub(crate) finish_reason: Option<String>,
    #[serde(rename = "groundingMetadata", default)]
    pub(crate) grounding_metadata: Option<GroundingMetadata>,
}

/// Web-search grounding attached to a candidate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub(crate) grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub(crate) web: Option<WebChunk>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebChunk {
    #[serde(default)]
    pub(crate) uri: Option<String>,
    #[serde(default)]
    pub(crate) title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_joins_text_parts_and_skips_others() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"FACTS:\n- a\n"},
                {"inlineData":{"mimeType":"image/png","data":"Zm9v"}},
                {"text":"IMAGE_PROMPT: p"}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), "FACTS:\n- a\nIMAGE_PROMPT: p");
    }

    #[test]
    fn citations_skip_chunks_without_web_metadata() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[]},"groundingMetadata":{"groundingChunks":[
                {"web":{"uri":"https://a","title":"A"}},
                {"web":{"uri":"https://b"}},
                {}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.web_citations(),
            vec![("A".to_string(), "https://a".to_string())]
        );
    }

    #[test]
    fn function_call_args_match_by_name() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"functionCall":{"name":"other","args":{"x":1}}},
                {"functionCall":{"name":"record_herb_research","args":{"name":"Ginger"}}}
            ]}}]}"#,
        )
        .unwrap();
        let args = response.function_call_args("record_herb_research").unwrap();
        assert_eq!(args["name"], "Ginger");
        assert!(response.function_call_args("missing").is_none());
    }

    #[test]
    fn empty_response_deserializes() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.primary_candidate().is_none());
        assert_eq!(response.text(), "");
        assert!(response.first_inline_data().is_none());
    }
}
