use herbarium::{
    model::ImageModel,
    types::{AspectRatio, ImageUri},
};

use crate::{
    client::call_generate,
    config::GeminiBackend,
    error::GeminiError,
    types::{GenerateContentRequest, GenerationConfig, ImageConfig, Part},
};

/// All infographics are generated landscape.
const ASPECT_RATIO: AspectRatio = AspectRatio::Wide16x9;

fn image_generation_config(aspect_ratio: Option<AspectRatio>) -> GenerationConfig {
    GenerationConfig {
        temperature: None,
        response_modalities: Some(vec!["IMAGE".to_owned()]),
        image_config: aspect_ratio.map(|ratio| ImageConfig {
            aspect_ratio: Some(ratio.as_str().to_owned()),
            image_size: None,
        }),
    }
}

impl ImageModel for GeminiBackend {
    type Error = GeminiError;

    async fn generate(&self, prompt: &str) -> Result<ImageUri, GeminiError> {
        let cfg = self.config();
        let mut request = GenerateContentRequest::user(vec![Part::text(prompt)]);
        request.generation_config = Some(image_generation_config(Some(ASPECT_RATIO)));

        let response = call_generate(&cfg, &cfg.image_model, request).await?;
        let inline = response.first_inline_data().ok_or(GeminiError::NoImage)?;
        Ok(ImageUri::wrap_png(&inline.data))
    }

    async fn edit(&self, image: &ImageUri, instruction: &str) -> Result<ImageUri, GeminiError> {
        let cfg = self.config();
        let mut request = GenerateContentRequest::user(vec![
            Part::inline_base64("image/jpeg", image.base64_payload()),
            Part::text(instruction),
        ]);
        request.generation_config = Some(image_generation_config(None));

        let response = call_generate(&cfg, &cfg.image_model, request).await?;
        let inline = response.first_inline_data().ok_or(GeminiError::NoImage)?;
        Ok(ImageUri::wrap_png(&inline.data))
    }
}
