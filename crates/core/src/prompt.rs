//! Prompt construction for the content generator.
//!
//! Every prompt is packaged as a [`GenerationRequest`] carrying the model
//! and sampling settings resolved from a [`GenerationConfig`].

use crate::template::TemplateProfile;
use serde::{Deserialize, Serialize};

const OUTLINE_SYSTEM_PROMPT: &str = "You are a professional presentation planner who creates \
well-structured, content-rich slide deck outlines.";

const CONTENT_SYSTEM_PROMPT: &str = "You are a professional content writer who turns outlines \
into detailed presentation content.";

const EXPAND_SYSTEM_PROMPT: &str = "You are a professional editor who enriches and completes \
existing content.";

/// Which synthesis step a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationTask {
    Outline,
    Content,
    Expand,
}

impl GenerationTask {
    /// Sampling temperature used when the config does not override it.
    pub fn default_temperature(self) -> f32 {
        match self {
            Self::Outline | Self::Content => 0.7,
            Self::Expand => 0.6,
        }
    }

    /// Token limit used when the config does not override it.
    pub fn default_max_tokens(self) -> u32 {
        match self {
            Self::Outline => 2000,
            Self::Content => 3000,
            Self::Expand => 1500,
        }
    }
}

/// Model selection and sampling overrides for one synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider name, e.g. "DeepSeek" or "OpenAI".
    pub provider: String,

    /// Model identifier passed to the provider.
    pub model: String,

    /// Overrides the per-task temperature.
    pub temperature: Option<f32>,

    /// Overrides the per-task token limit.
    pub max_tokens: Option<u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: "DeepSeek".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl GenerationConfig {
    /// Create a config with default provider and model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider name.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the sampling temperature for every task.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    /// Override the token limit for every task.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens.max(1));
        self
    }

    /// Package a prompt for `task`.
    pub fn request(
        &self,
        task: GenerationTask,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> GenerationRequest {
        GenerationRequest {
            task,
            provider: self.provider.clone(),
            model: self.model.clone(),
            system: system.into(),
            user: user.into(),
            temperature: self.temperature.unwrap_or_else(|| task.default_temperature()),
            max_tokens: self.max_tokens.unwrap_or_else(|| task.default_max_tokens()),
        }
    }
}

/// A fully built prompt, ready for a content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub task: GenerationTask,
    pub provider: String,
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Requested outline size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl OutlineLength {
    /// Parse a length category. Unrecognized text means medium.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "short" | "brief" => Self::Short,
            "detailed" | "long" => Self::Detailed,
            _ => Self::Medium,
        }
    }

    /// Label used in the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Detailed => "detailed",
        }
    }

    /// Section-count target for this length.
    pub fn section_target(self) -> &'static str {
        match self {
            Self::Short => "3-5 main sections",
            Self::Medium => "5-8 main sections",
            Self::Detailed => "8-12 main sections",
        }
    }
}

/// What the caller wants an outline for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineRequest {
    pub topic: String,
    pub language: String,
    pub length: OutlineLength,
    pub target_audience: Option<String>,
    pub duration: Option<String>,
    pub additional_requirements: Option<String>,
}

impl OutlineRequest {
    /// Create a request for `topic` with default language and length.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            language: "English".to_string(),
            length: OutlineLength::default(),
            target_audience: None,
            duration: None,
            additional_requirements: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_length(mut self, length: OutlineLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.additional_requirements = Some(requirements.into());
        self
    }
}

fn or_default<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

/// Build the outline-generation prompt.
pub fn outline_prompt(request: &OutlineRequest, config: &GenerationConfig) -> GenerationRequest {
    let audience = or_default(&request.target_audience, "general audience");
    let duration = or_default(&request.duration, "15-20 minutes");
    let requirements = or_default(&request.additional_requirements, "none");

    let user = format!(
        "Create a detailed presentation outline for the following topic.

Topic: {topic}
Target audience: {audience}
Presentation length: {duration}
Level of detail: {label} ({sections})
Language: {language}

Additional requirements:
{requirements}

Use exactly this format:

# Presentation title

## 1. Opening
- Greeting and introduction
- Topic overview
- Agenda preview

## 2. [Main section title]
- [Main point 1]
  - [Supporting detail]
  - [Example or data]
- [Main point 2]
  - [Supporting detail]

## 3. [Main section title]
...

## Closing
- Key takeaways
- Call to action
- Thanks and Q&A

Requirements:
1. Clear structure with a logical flow
2. Concrete points in every section
3. Suitable for a {duration} presentation
4. Practical, valuable content
5. Written in {language}",
        topic = request.topic.trim(),
        label = request.length.label(),
        sections = request.length.section_target(),
        language = request.language,
    );

    config.request(GenerationTask::Outline, OUTLINE_SYSTEM_PROMPT, user)
}

/// Build the content-generation prompt for an outline and template.
pub fn content_prompt(
    outline: &str,
    profile: &TemplateProfile,
    config: &GenerationConfig,
) -> GenerationRequest {
    let name = if profile.name.trim().is_empty() {
        "Default template"
    } else {
        profile.name.as_str()
    };
    let style = if profile.description.trim().is_empty() {
        "clean professional style"
    } else {
        profile.description.as_str()
    };

    let user = format!(
        r#"Based on the outline below, write detailed presentation content for every section.

Outline:
{outline}

Template:
- Name: {name}
- Style: {style}

For every section produce:
1. A section title slide
2. Detailed content slides
3. A summary of key points

Output format (JSON):
{{
  "slides": [
    {{
      "type": "title",
      "title": "Section title",
      "subtitle": "Subtitle or overview",
      "section": 1
    }},
    {{
      "type": "content",
      "title": "Content title",
      "content": [
        "Point 1: explanation",
        "Point 2: explanation"
      ],
      "section": 1
    }}
  ]
}}

Requirements:
1. Specific, substantive content; avoid vague statements
2. Phrasing suited to slides
3. A moderate amount of content per slide
4. A consistent style throughout"#,
        outline = outline.trim(),
    );

    config.request(GenerationTask::Content, CONTENT_SYSTEM_PROMPT, user)
}

/// Build the prompt that expands one section's content.
pub fn expand_prompt(
    section_title: &str,
    current_content: &str,
    config: &GenerationConfig,
) -> GenerationRequest {
    let user = format!(
        "Expand the content of the following section to make it more detailed and complete.

Section title: {}
Current content: {}

Requirements:
1. Keep the core points of the original content
2. Add more details and examples
3. Keep the logic clear
4. Increase the length by 50-100%",
        section_title.trim(),
        current_content.trim(),
    );

    config.request(GenerationTask::Expand, EXPAND_SYSTEM_PROMPT, user)
}
