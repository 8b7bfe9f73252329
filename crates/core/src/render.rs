//! Mechanical document renderers.
//!
//! A renderer turns a [`PresentationDocument`] into bytes plus metadata.
//! Binary office formats live outside this crate; the renderers here emit
//! the document model as JSON or as plain text with one block per slide.

use crate::error::{Error, Result};
use crate::normalize::slugify;
use crate::types::{BodyArrangement, PresentationDocument, SlideEntry};
use serde::{Deserialize, Serialize};

/// What a renderer reports about its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMetadata {
    pub filename: String,
    pub byte_size: usize,
    pub slide_count: usize,
}

/// Rendered output of one document.
#[derive(Debug, Clone)]
pub struct RenderedDeck {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub slide_count: usize,
}

impl RenderedDeck {
    pub fn metadata(&self) -> RenderMetadata {
        RenderMetadata {
            filename: self.filename.clone(),
            byte_size: self.bytes.len(),
            slide_count: self.slide_count,
        }
    }
}

/// Turns a presentation document into a file.
pub trait DocumentRenderer {
    /// File extension (without the dot) of the produced file.
    fn extension(&self) -> &'static str;

    /// Render `document`.
    fn render(&self, document: &PresentationDocument) -> Result<RenderedDeck>;

    /// File name for `document`, derived from its title.
    fn filename_for(&self, document: &PresentationDocument) -> String {
        format!("{}.{}", slugify(&document.title), self.extension())
    }
}

/// Writes the document model as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, document: &PresentationDocument) -> Result<RenderedDeck> {
        let mut bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| Error::RenderError(format!("Failed to serialize document: {}", e)))?;
        bytes.push(b'\n');

        Ok(RenderedDeck {
            filename: self.filename_for(document),
            bytes,
            slide_count: document.slide_count,
        })
    }
}

/// Writes one plain-text block per slide, blocks separated by a blank line.
#[derive(Debug, Clone)]
pub struct PlainTextRenderer {
    /// Prefix placed before each bullet.
    bullet_prefix: String,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self {
            bullet_prefix: "• ".to_string(),
        }
    }
}

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom bullet prefix.
    pub fn with_bullet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bullet_prefix = prefix.into();
        self
    }

    /// Format a document as text.
    ///
    /// # Example output
    /// ```text
    /// Rust at Work
    /// Generated with AI
    /// Template style: Business Blue
    ///
    /// Adoption
    /// • Teams
    /// • Tooling
    ///
    /// Thank you!
    /// Thank you for listening
    /// We look forward to your feedback
    /// ```
    pub fn format(&self, document: &PresentationDocument) -> String {
        let slides: Vec<String> = document
            .slides
            .iter()
            .map(|slide| self.slide_lines(slide).join("\n"))
            .collect();

        format!("{}\n", slides.join("\n\n"))
    }

    fn slide_lines(&self, slide: &SlideEntry) -> Vec<String> {
        let mut lines = vec![slide.heading().to_string()];

        match slide {
            SlideEntry::Title { subtitle, .. } => lines.extend(subtitle.lines().map(String::from)),
            SlideEntry::Closing { message, .. } => lines.extend(message.lines().map(String::from)),
            SlideEntry::Content { block, body, .. } => {
                if let Some(subtitle) = &block.subtitle {
                    lines.push(subtitle.clone());
                }
                lines.extend(self.body_lines(body));
            }
        }

        lines
    }

    fn body_lines(&self, body: &BodyArrangement) -> Vec<String> {
        let bullet = |b: &String| format!("{}{}", self.bullet_prefix, b);

        match body {
            BodyArrangement::SingleColumn { bullets }
            | BodyArrangement::ImageWithText { bullets, .. }
            | BodyArrangement::DataPanel { bullets, .. } => bullets.iter().map(bullet).collect(),
            BodyArrangement::TwoColumn { left, right } => {
                left.iter().chain(right.iter()).map(bullet).collect()
            }
        }
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &PresentationDocument) -> Result<RenderedDeck> {
        Ok(RenderedDeck {
            filename: self.filename_for(document),
            bytes: self.format(document).into_bytes(),
            slide_count: document.slide_count,
        })
    }
}
