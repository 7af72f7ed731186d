use std::sync::Arc;

/// Gemini REST base URL used by the Developer API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub(crate) const USER_AGENT: &str = "herbarium-gemini/0.1";

/// Research model used when none is configured.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-pro-preview";
/// Image generation/edit model used when none is configured.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Authentication strategy supported by the Gemini backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Append the API key as a `?key=` query parameter (default).
    Query,
    /// Carry the API key in the `x-goog-api-key` request header.
    Header,
}

/// Gemini backend implementing the `herbarium` model traits.
#[derive(Clone, Debug)]
pub struct GeminiBackend {
    inner: Arc<GeminiConfig>,
}

impl GeminiBackend {
    /// Create a backend using the default research/image models.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GeminiConfig {
                http: reqwest::Client::new(),
                api_key: api_key.into(),
                base_url: GEMINI_API_BASE_URL.to_string(),
                auth: AuthMode::Query,
                text_model: sanitize_model(DEFAULT_TEXT_MODEL),
                image_model: sanitize_model(DEFAULT_IMAGE_MODEL),
            }),
        }
    }

    /// Point the backend at a different REST base URL, e.g. a proxy.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).base_url = base_url.into();
        self
    }

    /// Select header-based authentication.
    #[must_use]
    pub fn with_auth_mode(mut self, mode: AuthMode) -> Self {
        Arc::make_mut(&mut self.inner).auth = mode;
        self
    }

    /// Override the research model.
    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).text_model = sanitize_model(model);
        self
    }

    /// Override the image generation/edit model.
    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).image_model = sanitize_model(model);
        self
    }

    pub(crate) fn config(&self) -> Arc<GeminiConfig> {
        self.inner.clone()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) auth: AuthMode,
    pub(crate) text_model: String,
    pub(crate) image_model: String,
}

impl GeminiConfig {
    pub(crate) fn endpoint(&self, suffix: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let suffix = suffix.trim_start_matches('/');
        match self.auth {
            AuthMode::Query => format!("{base}/{suffix}?key={}", self.api_key),
            AuthMode::Header => format!("{base}/{suffix}"),
        }
    }

    pub(crate) fn model_endpoint(&self, model: &str, action: &str) -> String {
        let model = sanitize_model(model);
        self.endpoint(&format!("{model}:{action}"))
    }
}

pub(crate) fn sanitize_model(model: impl Into<String>) -> String {
    let model = model.into();
    if model.starts_with("models/") {
        model
    } else {
        format!("models/{model}")
    }
}
