//! End-to-end synthesis: prompt, generate, parse, assemble.
//!
//! Every operation returns a result with a [`SynthesisStatus`]. Upstream
//! failures never escape as errors; they come back as `status = error`
//! with the failure text in `message` and an empty payload.

use crate::assemble::DocumentAssembler;
use crate::content::{blocks_from_outline, parse_content};
use crate::error::Error;
use crate::generation::{generate_text, generate_text_streaming, CancellationToken, ContentGenerator};
use crate::images::{ImageSource, NoImages};
use crate::normalize::derive_title;
use crate::outline::OutlineParser;
use crate::prompt::{content_prompt, expand_prompt, outline_prompt, GenerationConfig, OutlineRequest};
use crate::template::{TemplateProfile, TemplateRegistry};
use crate::types::{OutlineNode, PresentationDocument, SlideContentBlock};
use serde::{Deserialize, Serialize};

/// Whether a synthesis step succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStatus {
    Success,
    Error,
}

/// Result of outline synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineResult {
    pub status: SynthesisStatus,
    /// Raw outline markup as the model wrote it.
    pub outline_markdown: String,
    pub outline_tree: Vec<OutlineNode>,
    /// Failure description; empty on success.
    pub message: String,
}

impl OutlineResult {
    fn failed(error: &Error) -> Self {
        Self {
            status: SynthesisStatus::Error,
            outline_markdown: String::new(),
            outline_tree: Vec::new(),
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SynthesisStatus::Success
    }
}

/// Result of content synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResult {
    pub status: SynthesisStatus,
    pub blocks: Vec<SlideContentBlock>,
    pub message: String,
}

impl ContentResult {
    fn failed(error: &Error) -> Self {
        Self {
            status: SynthesisStatus::Error,
            blocks: Vec::new(),
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SynthesisStatus::Success
    }
}

/// Result of full presentation synthesis.
///
/// `document` is `None` exactly when `status` is `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationResult {
    pub status: SynthesisStatus,
    pub document: Option<PresentationDocument>,
    pub message: String,
}

impl PresentationResult {
    pub fn is_success(&self) -> bool {
        self.status == SynthesisStatus::Success
    }
}

/// Result of expanding one section's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandResult {
    pub status: SynthesisStatus,
    pub text: String,
    pub message: String,
}

/// Drives the content generator through outline, content, and assembly.
///
/// Holds no per-request state; one engine can serve any number of calls,
/// each with its own [`GenerationConfig`].
pub struct SynthesisEngine<G, I = NoImages> {
    generator: G,
    registry: TemplateRegistry,
    parser: OutlineParser,
    assembler: DocumentAssembler<I>,
}

impl<G: ContentGenerator> SynthesisEngine<G, NoImages> {
    /// Create an engine with the built-in templates and no image enrichment.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            registry: TemplateRegistry::default(),
            parser: OutlineParser::new(),
            assembler: DocumentAssembler::new(),
        }
    }
}

impl<G: ContentGenerator, I: ImageSource> SynthesisEngine<G, I> {
    /// Use a different template registry.
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use a differently configured outline parser.
    pub fn with_outline_parser(mut self, parser: OutlineParser) -> Self {
        self.parser = parser;
        self
    }

    /// Enrich assembled documents with images from `images`.
    pub fn with_images<J: ImageSource>(self, images: J) -> SynthesisEngine<G, J> {
        SynthesisEngine {
            generator: self.generator,
            registry: self.registry,
            parser: self.parser,
            assembler: DocumentAssembler::with_images(images),
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Generate an outline and parse it into a tree.
    pub fn synthesize_outline(&self, request: &OutlineRequest, config: &GenerationConfig) -> OutlineResult {
        log::info!("Generating outline for '{}' with {}", request.topic, config.model);
        let prompt = outline_prompt(request, config);

        match generate_text(&self.generator, &prompt) {
            Ok(markdown) => self.outline_success(markdown),
            Err(e) => {
                log::warn!("Outline generation failed: {}", e);
                OutlineResult::failed(&e)
            }
        }
    }

    /// Like [`synthesize_outline`](Self::synthesize_outline), consuming a
    /// streamed response. Cancelling `cancel` discards the partial outline.
    pub fn synthesize_outline_streaming(
        &self,
        request: &OutlineRequest,
        config: &GenerationConfig,
        cancel: &CancellationToken,
    ) -> OutlineResult {
        log::info!("Streaming outline for '{}' with {}", request.topic, config.model);
        let prompt = outline_prompt(request, config);

        match generate_text_streaming(&self.generator, &prompt, cancel) {
            Ok(markdown) => self.outline_success(markdown),
            Err(e) => {
                log::warn!("Streaming outline generation failed: {}", e);
                OutlineResult::failed(&e)
            }
        }
    }

    fn outline_success(&self, markdown: String) -> OutlineResult {
        let outline_tree = self.parser.parse(&markdown);
        log::info!("Outline has {} main sections", outline_tree.len());
        OutlineResult {
            status: SynthesisStatus::Success,
            outline_markdown: markdown,
            outline_tree,
            message: String::new(),
        }
    }

    /// Generate slide content for an outline and parse it into blocks.
    pub fn synthesize_content(
        &self,
        outline: &str,
        profile: &TemplateProfile,
        config: &GenerationConfig,
    ) -> ContentResult {
        let prompt = content_prompt(outline, profile, config);

        match generate_text(&self.generator, &prompt) {
            Ok(text) => {
                let blocks = parse_content(&text);
                log::info!("Content response parsed into {} slides", blocks.len());
                ContentResult {
                    status: SynthesisStatus::Success,
                    blocks,
                    message: String::new(),
                }
            }
            Err(e) => {
                log::warn!("Content generation failed: {}", e);
                ContentResult::failed(&e)
            }
        }
    }

    /// Generate content for `outline` and assemble the presentation.
    ///
    /// A content failure short-circuits before assembly. A successful but
    /// empty content response falls back to slides derived from the outline.
    pub fn synthesize_presentation(
        &self,
        outline: &str,
        template_name: &str,
        config: &GenerationConfig,
    ) -> PresentationResult {
        let profile = self.registry.resolve(template_name);
        let content = self.synthesize_content(outline, profile, config);

        if !content.is_success() {
            return PresentationResult {
                status: SynthesisStatus::Error,
                document: None,
                message: content.message,
            };
        }

        PresentationResult {
            status: SynthesisStatus::Success,
            document: Some(self.assemble(outline, content.blocks, profile)),
            message: String::new(),
        }
    }

    /// Assemble already-generated content. Never calls the generator.
    pub fn assemble(
        &self,
        outline: &str,
        blocks: Vec<SlideContentBlock>,
        profile: &TemplateProfile,
    ) -> PresentationDocument {
        let blocks = if blocks.is_empty() {
            let derived = blocks_from_outline(outline);
            log::debug!("No content slides; derived {} from the outline", derived.len());
            derived
        } else {
            blocks
        };

        self.assembler.assemble(&derive_title(outline), blocks, profile)
    }

    /// Ask the model to expand one section's text.
    pub fn expand_section(
        &self,
        section_title: &str,
        current_content: &str,
        config: &GenerationConfig,
    ) -> ExpandResult {
        let prompt = expand_prompt(section_title, current_content, config);

        match generate_text(&self.generator, &prompt) {
            Ok(text) => {
                log::info!(
                    "Expanded '{}' from {} to {} characters",
                    section_title,
                    current_content.chars().count(),
                    text.chars().count()
                );
                ExpandResult {
                    status: SynthesisStatus::Success,
                    text,
                    message: String::new(),
                }
            }
            Err(e) => {
                log::warn!("Section expansion failed: {}", e);
                ExpandResult {
                    status: SynthesisStatus::Error,
                    text: String::new(),
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::generation::FragmentStream;
    use crate::prompt::{GenerationRequest, GenerationTask};
    use crate::template::DEFAULT_TEMPLATE_NAME;
    use crate::types::SlideEntry;
    use std::cell::RefCell;

    const OUTLINE: &str = "# Rust at Work\n## Intro\n- Why Rust\n## Adoption\n- Teams\n- Tooling";
    const CONTENT: &str = r#"{"slides":[
        {"type":"title","title":"Intro","subtitle":"Why we care","section":1},
        {"type":"content","title":"Adoption","content":["Teams","Tooling","Hiring"],"section":2}
    ]}"#;

    /// Answers each task from a script and records every request it sees.
    #[derive(Default)]
    struct Scripted {
        outline: Option<&'static str>,
        content: Option<&'static str>,
        fragments: Vec<&'static str>,
        seen: RefCell<Vec<GenerationRequest>>,
    }

    impl ContentGenerator for Scripted {
        fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.seen.borrow_mut().push(request.clone());
            let answer = match request.task {
                GenerationTask::Outline => self.outline,
                GenerationTask::Content => self.content,
                GenerationTask::Expand => Some("Expanded text"),
            };
            answer
                .map(str::to_string)
                .ok_or_else(|| Error::GenerationFailed("upstream timeout".into()))
        }

        fn generate_stream(&self, request: &GenerationRequest) -> Result<FragmentStream<'_>> {
            self.seen.borrow_mut().push(request.clone());
            Ok(Box::new(self.fragments.iter().map(|f| Ok(f.to_string()))))
        }
    }

    fn config() -> GenerationConfig {
        GenerationConfig::new().with_model("test-model")
    }

    #[test]
    fn test_outline_success() {
        let engine = SynthesisEngine::new(Scripted {
            outline: Some(OUTLINE),
            ..Default::default()
        });
        let result = engine.synthesize_outline(&OutlineRequest::new("Rust"), &config());

        assert!(result.is_success());
        assert_eq!(result.outline_markdown, OUTLINE);
        assert_eq!(result.outline_tree.len(), 3);
        assert_eq!(result.message, "");
    }

    #[test]
    fn test_outline_upstream_failure() {
        let engine = SynthesisEngine::new(Scripted::default());
        let result = engine.synthesize_outline(&OutlineRequest::new("Rust"), &config());

        assert_eq!(result.status, SynthesisStatus::Error);
        assert!(result.outline_tree.is_empty());
        assert!(result.outline_markdown.is_empty());
        assert!(result.message.contains("upstream timeout"));
    }

    #[test]
    fn test_outline_empty_response_is_failure() {
        let engine = SynthesisEngine::new(Scripted {
            outline: Some("   "),
            ..Default::default()
        });
        let result = engine.synthesize_outline(&OutlineRequest::new("Rust"), &config());

        assert_eq!(result.status, SynthesisStatus::Error);
        assert!(!result.message.is_empty());
    }

    #[test]
    fn test_config_reaches_generator() {
        let generator = Scripted {
            outline: Some(OUTLINE),
            ..Default::default()
        };
        let engine = SynthesisEngine::new(&generator);
        engine.synthesize_outline(&OutlineRequest::new("Rust"), &config());
        engine.synthesize_outline(
            &OutlineRequest::new("Rust"),
            &GenerationConfig::new().with_model("other-model"),
        );

        let models: Vec<String> = generator.seen.borrow().iter().map(|r| r.model.clone()).collect();
        assert_eq!(models, vec!["test-model", "other-model"]);
    }

    #[test]
    fn test_streaming_outline() {
        let engine = SynthesisEngine::new(Scripted {
            fragments: vec!["# Rust", " at Work\n## In", "tro\n- Why Rust"],
            ..Default::default()
        });
        let result = engine.synthesize_outline_streaming(
            &OutlineRequest::new("Rust"),
            &config(),
            &CancellationToken::new(),
        );

        assert!(result.is_success());
        assert_eq!(result.outline_markdown, "# Rust at Work\n## Intro\n- Why Rust");
        assert_eq!(result.outline_tree[1].child_titles(), vec!["Why Rust"]);
    }

    #[test]
    fn test_cancelled_stream_yields_nothing() {
        let engine = SynthesisEngine::new(Scripted {
            fragments: vec!["# Rust", " at Work"],
            ..Default::default()
        });
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = engine.synthesize_outline_streaming(&OutlineRequest::new("Rust"), &config(), &cancel);

        assert_eq!(result.status, SynthesisStatus::Error);
        assert!(result.outline_tree.is_empty());
        assert!(result.outline_markdown.is_empty());
        assert!(result.message.contains("cancelled"));
    }

    #[test]
    fn test_presentation_from_structured_content() {
        let engine = SynthesisEngine::new(Scripted {
            content: Some(CONTENT),
            ..Default::default()
        });
        let result = engine.synthesize_presentation(OUTLINE, "Tech Purple", &config());

        assert!(result.is_success());
        let doc = result.document.unwrap();
        assert_eq!(doc.title, "Rust at Work");
        assert_eq!(doc.slide_count, 4);
        assert_eq!(doc.profile.name, "Tech Purple");
        let titles: Vec<&str> = doc.slides.iter().map(SlideEntry::heading).collect();
        assert_eq!(titles, vec!["Rust at Work", "Intro", "Adoption", "Thank you!"]);
    }

    #[test]
    fn test_presentation_content_failure_short_circuits() {
        let engine = SynthesisEngine::new(Scripted::default());
        let result = engine.synthesize_presentation(OUTLINE, "Tech Purple", &config());

        assert_eq!(result.status, SynthesisStatus::Error);
        assert!(result.document.is_none());
        assert!(result.message.contains("upstream timeout"));
    }

    #[test]
    fn test_presentation_falls_back_to_outline_slides() {
        let engine = SynthesisEngine::new(Scripted {
            content: Some("Sorry, I can only answer in prose."),
            ..Default::default()
        });
        let result = engine.synthesize_presentation(OUTLINE, "", &config());

        let doc = result.document.unwrap();
        assert_eq!(doc.profile.name, DEFAULT_TEMPLATE_NAME);
        let blocks = doc.content_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Intro");
        assert_eq!(blocks[1].bullet_texts(), vec!["Teams", "Tooling"]);
        assert_eq!(doc.slide_count, 4);
    }

    #[test]
    fn test_presentation_with_nothing_usable_is_still_bookended() {
        let engine = SynthesisEngine::new(Scripted {
            content: Some("no structure here"),
            ..Default::default()
        });
        let result = engine.synthesize_presentation("plain outline text", "Minimal White", &config());

        let doc = result.document.unwrap();
        assert_eq!(doc.title, "plain outline text");
        assert_eq!(doc.slide_count, 2);
    }

    #[test]
    fn test_expand_section() {
        let engine = SynthesisEngine::new(Scripted::default());
        let result = engine.expand_section("Intro", "short", &config());

        assert_eq!(result.status, SynthesisStatus::Success);
        assert_eq!(result.text, "Expanded text");
    }

    #[test]
    fn test_custom_registry_and_parser() {
        use crate::outline::HeadingPolicy;

        let registry = TemplateRegistry::from_json(
            r##"{"default":"Solo","templates":[{"name":"Solo","category":"Test",
            "palette":{"primary":"#000000","secondary":"#111111","accent":"#222222","background":"#FFFFFF"},
            "layout_variants":["two_column"]}]}"##,
        )
        .unwrap();
        let engine = SynthesisEngine::new(Scripted {
            outline: Some(OUTLINE),
            content: Some(CONTENT),
            ..Default::default()
        })
        .with_registry(registry)
        .with_outline_parser(OutlineParser::new().with_heading_policy(HeadingPolicy::Nested));

        let outline = engine.synthesize_outline(&OutlineRequest::new("Rust"), &config());
        assert_eq!(outline.outline_tree.len(), 1);

        let doc = engine
            .synthesize_presentation(OUTLINE, "Business Blue", &config())
            .document
            .unwrap();
        assert_eq!(doc.profile.name, "Solo");
    }

    struct StockImages;

    impl ImageSource for StockImages {
        fn find(&self, query: &crate::images::ImageQuery) -> Option<crate::types::ImageRef> {
            Some(crate::types::ImageRef {
                url: format!("https://stock.test/{}", query.keyword.replace(' ', "-")),
                description: query.keyword.clone(),
            })
        }
    }

    #[test]
    fn test_engine_enriches_with_images() {
        use crate::types::BodyArrangement;

        let engine = SynthesisEngine::new(Scripted {
            content: Some(CONTENT),
            ..Default::default()
        })
        .with_images(StockImages);
        let doc = engine
            .synthesize_presentation(OUTLINE, "Business Blue", &config())
            .document
            .unwrap();

        assert_eq!(doc.slide_count, 4);
        match &doc.slides[0] {
            SlideEntry::Title { background: Some(image), .. } => {
                assert_eq!(image.url, "https://stock.test/background")
            }
            other => panic!("expected title slide with background, got {:?}", other),
        }
        match &doc.slides[2] {
            SlideEntry::Content {
                body: BodyArrangement::ImageWithText { image: Some(image), .. },
                ..
            } => assert_eq!(image.description, "business"),
            other => panic!("expected image slide, got {:?}", other),
        }
        assert!(matches!(
            &doc.slides[3],
            SlideEntry::Closing { decoration: Some(_), .. }
        ));
    }

    #[test]
    fn test_result_serializes_status_lowercase() {
        let engine = SynthesisEngine::new(Scripted::default());
        let result = engine.synthesize_outline(&OutlineRequest::new("Rust"), &config());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["outline_tree"], serde_json::json!([]));
    }
}
