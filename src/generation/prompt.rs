use crate::generation::catalog::{self, DEFAULT_SIZE_ID, DEFAULT_STYLE_ID};
use crate::results::PageContent;
use serde::{Deserialize, Serialize};

/// User choices that shape a generated infographic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Language all text in the output is written in
    pub language: String,
    pub style_id: String,
    /// Size option id, see [`catalog::SIZE_OPTIONS`]
    pub size: String,
    /// Colour preset id/name, hex code or tone; `None` lets the model choose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            language: "한국어 (Korean)".to_string(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            size: DEFAULT_SIZE_ID.to_string(),
            color: None,
            custom_instructions: None,
        }
    }
}

/// What the infographic summarizes
#[derive(Debug, Clone, Copy)]
pub enum PromptSource<'a> {
    /// Slide images sent alongside the prompt
    Slides,
    /// Extracted webpage or video
    Page(&'a PageContent),
    /// Text pasted by the user
    Text(&'a str),
}

impl PromptSource<'_> {
    fn summary_target(&self) -> &'static str {
        match self {
            PromptSource::Slides => "the provided slide images",
            PromptSource::Page(_) => "the provided web content",
            PromptSource::Text(_) => "the provided text",
        }
    }

    fn combine_instruction(&self) -> &'static str {
        match self {
            PromptSource::Slides => {
                "Combine the content from the input slides into one cohesive narrative within a single image."
            }
            _ => "Distill the source content below into one cohesive narrative within a single image.",
        }
    }
}

fn color_instruction(color: Option<&str>) -> String {
    match color.map(str::trim).filter(|c| !c.is_empty()) {
        Some(color) => format!(
            "Color Palette: Dominant color should be {}. Ensure the design strictly adheres to this color scheme while maintaining harmony and contrast.",
            catalog::resolve_color(color)
        ),
        None => "Color Palette: Auto-detect the best color scheme based on the content and style."
            .to_string(),
    }
}

/// Build the text prompt for one generation request
pub fn build_prompt(config: &GenerationConfig, source: PromptSource<'_>) -> String {
    let style = catalog::resolve_style(&config.style_id);

    let mut lines = vec![
        format!(
            "Create a single, high-quality, professional infographic that summarizes the key information from {}.",
            source.summary_target()
        ),
        String::new(),
        format!("Language: {}", config.language),
        format!("Style: {}", style.name),
        format!("Style Description: {}", style.description),
    ];

    let size_instruction = catalog::size_instruction(&config.size);
    if !size_instruction.is_empty() {
        lines.push(size_instruction.to_string());
    }
    lines.push(color_instruction(config.color.as_deref()));

    lines.push(String::new());
    lines.push("Instructions:".to_string());
    lines.push(format!("- {}", source.combine_instruction()));
    lines.push("- Use the specified language for all text.".to_string());
    lines.push("- Adhere strictly to the requested visual style.".to_string());
    lines.push(
        "- Make it visually engaging, legible, and suitable for the selected format.".to_string(),
    );

    if let Some(custom) = config
        .custom_instructions
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        lines.push(String::new());
        lines.push("Additional Instructions:".to_string());
        lines.push(custom.to_string());
    }

    match source {
        PromptSource::Slides => {}
        PromptSource::Page(page) => {
            lines.push(String::new());
            lines.push(format!("Source Title: {}", page.title));
            lines.push(format!("Source URL: {}", page.url));
            lines.push("Source Content:".to_string());
            lines.push(page.content.clone());
        }
        PromptSource::Text(text) => {
            lines.push(String::new());
            lines.push("Source Content:".to_string());
            lines.push(text.trim().to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::truncate_content;

    fn page() -> PageContent {
        PageContent::webpage(
            "https://example.com/post".to_string(),
            "A Post".to_string(),
            String::new(),
            None,
            truncate_content("Body text", 15000),
        )
    }

    #[test]
    fn test_slides_prompt() {
        let prompt = build_prompt(&GenerationConfig::default(), PromptSource::Slides);

        assert!(prompt.starts_with(
            "Create a single, high-quality, professional infographic that summarizes the key information from the provided slide images."
        ));
        assert!(prompt.contains("\nLanguage: 한국어 (Korean)\n"));
        assert!(prompt.contains("\nStyle: Dynamic Glassmorphism\n"));
        assert!(prompt.contains("Auto-detect the best color scheme"));
        assert!(prompt.contains("- Combine the content from the input slides"));
        assert!(!prompt.contains("Source Content:"));
    }

    #[test]
    fn test_page_prompt_includes_source() {
        let page = page();
        let config = GenerationConfig {
            language: "English".to_string(),
            style_id: "custom".to_string(),
            size: "webtoon-4".to_string(),
            color: Some("blue".to_string()),
            custom_instructions: Some("  Use icons for every step. ".to_string()),
        };

        let prompt = build_prompt(&config, PromptSource::Page(&page));

        assert!(prompt.contains("from the provided web content."));
        assert!(prompt.contains("Style: Custom\nStyle Description: Match the reference image style."));
        assert!(prompt.contains("Format: 4-Cut Webtoon"));
        assert!(prompt.contains("Dominant color should be #3b82f6."));
        assert!(prompt.contains("Additional Instructions:\nUse icons for every step."));
        assert!(prompt.ends_with(
            "Source Title: A Post\nSource URL: https://example.com/post\nSource Content:\nBody text"
        ));
    }

    #[test]
    fn test_blank_options_are_ignored() {
        let config = GenerationConfig {
            color: Some("  ".to_string()),
            custom_instructions: Some(String::new()),
            size: "presentation-wide".to_string(),
            ..GenerationConfig::default()
        };
        let prompt = build_prompt(&config, PromptSource::Text("  pasted notes "));

        assert!(prompt.contains("Auto-detect the best color scheme"));
        assert!(!prompt.contains("Additional Instructions"));
        assert!(!prompt.contains("Format:"));
        assert!(prompt.ends_with("Source Content:\npasted notes"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{"language":"English","styleId":"minimalism","size":"a4-portrait"}"#,
        )
        .unwrap();
        assert_eq!(config.color, None);
        assert_eq!(config.custom_instructions, None);
    }
}
