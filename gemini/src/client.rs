use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::{AuthMode, GeminiConfig, USER_AGENT},
    error::GeminiError,
    types::{GenerateContentRequest, GenerateContentResponse},
};

pub(crate) async fn call_generate(
    cfg: &GeminiConfig,
    model: &str,
    request: GenerateContentRequest,
) -> Result<GenerateContentResponse, GeminiError> {
    post_json(cfg, cfg.model_endpoint(model, "generateContent"), &request).await
}

async fn post_json<T: DeserializeOwned, S: Serialize>(
    cfg: &GeminiConfig,
    endpoint: String,
    body: &S,
) -> Result<T, GeminiError> {
    // The query string may carry the API key; log only the path.
    tracing::debug!(
        endpoint = endpoint.split('?').next().unwrap_or(&endpoint),
        "posting generateContent request"
    );

    let mut builder = cfg
        .http
        .post(&endpoint)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .json(body);
    if cfg.auth == AuthMode::Header {
        builder = builder.header("x-goog-api-key", &cfg.api_key);
    }

    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GeminiError::from_status(status.as_u16(), &body));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
