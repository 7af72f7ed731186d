use herbarium::{
    model::{GroundedReply, RecordRequest, ResearchModel},
    prompt,
    types::{HerbRecord, Source},
};
use serde_json::json;

use crate::{
    client::call_generate,
    config::GeminiBackend,
    error::GeminiError,
    types::{
        FunctionCallingConfig, FunctionCallingMode, FunctionDeclaration, GeminiTool,
        GenerateContentRequest, GoogleSearch, Part, ToolConfig,
    },
};

/// Name of the function the extraction call asks the model to invoke.
pub const RECORD_FUNCTION: &str = "record_herb_research";

fn record_function_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: RECORD_FUNCTION.to_owned(),
        description: "Record herb research findings into the database.".to_owned(),
        parameters: Some(json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING", "description": "Herb name" },
                "properties": {
                    "type": "STRING",
                    "description": "Short summary of medicinal properties"
                },
                "category": { "type": "STRING", "description": "Usage category" },
                "level": { "type": "STRING", "description": "Target audience level" },
                "sources": { "type": "STRING", "description": "Primary reference URL" }
            },
            "required": ["name", "properties", "category", "level"]
        })),
    }
}

impl ResearchModel for GeminiBackend {
    type Error = GeminiError;

    async fn grounded_generate(&self, prompt: &str) -> Result<GroundedReply, GeminiError> {
        let cfg = self.config();
        let mut request = GenerateContentRequest::user(vec![Part::text(prompt)]);
        request.tools = vec![GeminiTool::GoogleSearchTool {
            google_search: GoogleSearch {},
        }];

        let response = call_generate(&cfg, &cfg.text_model, request).await?;
        let citations = response
            .web_citations()
            .into_iter()
            .map(|(title, url)| Source { title, url })
            .collect();
        Ok(GroundedReply {
            text: response.text(),
            citations,
        })
    }

    async fn extract_record(&self, request: &RecordRequest) -> Result<HerbRecord, GeminiError> {
        let cfg = self.config();
        let instruction =
            prompt::record_prompt(&request.topic, request.level, &request.research_text);

        let mut call = GenerateContentRequest::user(vec![Part::text(instruction)]);
        call.tools = vec![GeminiTool::FunctionTool {
            function_declarations: vec![record_function_declaration()],
        }];
        call.tool_config = Some(ToolConfig {
            function_calling_config: Some(FunctionCallingConfig {
                mode: FunctionCallingMode::Any,
                allowed_function_names: Some(vec![RECORD_FUNCTION.to_owned()]),
            }),
        });

        let response = call_generate(&cfg, &cfg.text_model, call).await?;
        let args = response
            .function_call_args(RECORD_FUNCTION)
            .ok_or_else(|| GeminiError::Api("model declined to record the research".into()))?;
        Ok(serde_json::from_value(args)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_requires_the_core_fields() {
        let declaration = record_function_declaration();
        let params = declaration.parameters.unwrap();
        assert_eq!(
            params["required"],
            json!(["name", "properties", "category", "level"])
        );
        assert!(params["properties"]["sources"].is_object());
    }

    #[test]
    fn record_args_decode_into_herb_record() {
        let args = json!({
            "name": "Ginger",
            "properties": "Soothes nausea",
            "category": "digestive",
            "level": "general public"
        });
        let record: HerbRecord = serde_json::from_value(args).unwrap();
        assert_eq!(record.name, "Ginger");
        assert!(record.sources.is_none());
    }
}
