//! Prompt construction and the generative model client.

pub mod catalog;
pub mod client;
pub mod prompt;

pub use catalog::{AspectRatio, InfographicStyle, SizeOption};
pub use client::{
    GenerateContentRequest, GeneratedImage, GeneratedVideo, GenerationClient, InlineData,
    poll_until_done,
};
pub use prompt::{GenerationConfig, PromptSource, build_prompt};

/// Build the full `generateContent` request for an infographic.
///
/// A style reference image is only attached when the custom style is
/// selected.
pub fn infographic_request(
    config: &GenerationConfig,
    source: PromptSource<'_>,
    images: &[InlineData],
    style_reference: Option<&InlineData>,
    image_size: &str,
) -> GenerateContentRequest {
    let prompt = build_prompt(config, source);
    let reference = style_reference.filter(|_| config.style_id == catalog::CUSTOM_STYLE_ID);

    GenerateContentRequest::image(
        &prompt,
        images,
        reference,
        catalog::aspect_ratio(&config.size),
        image_size,
    )
}
