//! Domain types for outlines, slide content, and assembled presentations.

use crate::layout::LayoutAssignment;
use crate::template::TemplateProfile;
use serde::{Deserialize, Serialize};

/// One heading or bullet in an outline tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading or bullet text with its marker removed.
    pub title: String,

    /// Tree depth: 1 for sections, 2 for subsections, 3 for points.
    pub depth: u8,

    /// Child nodes in outline order.
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a childless node.
    pub fn new(title: impl Into<String>, depth: u8) -> Self {
        Self {
            title: title.into(),
            depth,
            children: Vec::new(),
        }
    }

    /// Titles of the direct children, in order.
    pub fn child_titles(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.title.as_str()).collect()
    }
}

/// Which kind of slide a content block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// A section title slide.
    Title,
    /// A regular content slide.
    #[default]
    Content,
}

impl SlideKind {
    /// Map the payload's `type` field. Anything other than `title` is content.
    pub fn from_type_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("title") {
            Self::Title
        } else {
            Self::Content
        }
    }
}

/// A single bullet, resolved once from whatever shape the model produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum BulletItem {
    /// The model produced a bare string.
    PlainText(String),
    /// The model produced a small record; this is its `point`/`text` value.
    LabeledPoint(String),
}

impl BulletItem {
    /// The display text of this bullet.
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText(text) | Self::LabeledPoint(text) => text,
        }
    }
}

/// Content payload for one slide, prior to layout assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContentBlock {
    /// Slide kind.
    pub kind: SlideKind,

    /// Slide heading.
    pub title: String,

    /// Optional subtitle (title slides usually carry one).
    pub subtitle: Option<String>,

    /// Bullets in reading order.
    pub bullets: Vec<BulletItem>,

    /// 1-based position of this block in emission order.
    pub section_index: usize,

    /// The section number the model reported, if any.
    pub source_section: Option<u64>,
}

impl SlideContentBlock {
    /// Create a content block with no bullets.
    pub fn new(kind: SlideKind, title: impl Into<String>, section_index: usize) -> Self {
        Self {
            kind,
            title: title.into(),
            subtitle: None,
            bullets: Vec::new(),
            section_index,
            source_section: None,
        }
    }

    /// Add a plain-text bullet.
    pub fn add_bullet(&mut self, text: impl Into<String>) {
        self.bullets.push(BulletItem::PlainText(text.into()));
    }

    /// Bullet texts, in order.
    pub fn bullet_texts(&self) -> Vec<&str> {
        self.bullets.iter().map(BulletItem::text).collect()
    }
}

/// A reference to a decorative or illustrative image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Where the renderer can fetch the image.
    pub url: String,

    /// Alternative text.
    pub description: String,
}

/// How a content slide's body is arranged for its layout variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "arrangement", rename_all = "snake_case")]
pub enum BodyArrangement {
    /// Bullets in a single column.
    SingleColumn { bullets: Vec<String> },

    /// Bullets split across two columns.
    TwoColumn { left: Vec<String>, right: Vec<String> },

    /// Bullets next to an image. `image_focus` means the image dominates
    /// and the bullet list is shortened.
    ImageWithText {
        bullets: Vec<String>,
        image_focus: bool,
        image: Option<ImageRef>,
    },

    /// Bullets beside a chart or data visual slot.
    DataPanel {
        bullets: Vec<String>,
        visual: Option<ImageRef>,
    },
}

/// One slide in an assembled presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum SlideEntry {
    /// Leading title slide.
    Title {
        title: String,
        subtitle: String,
        background: Option<ImageRef>,
    },

    /// A synthesized content slide.
    Content {
        block: SlideContentBlock,
        layout: LayoutAssignment,
        body: BodyArrangement,
    },

    /// Trailing closing slide.
    Closing {
        heading: String,
        message: String,
        decoration: Option<ImageRef>,
    },
}

impl SlideEntry {
    /// The content block carried by this entry, if it is a content slide.
    pub fn content_block(&self) -> Option<&SlideContentBlock> {
        match self {
            Self::Content { block, .. } => Some(block),
            _ => None,
        }
    }

    /// The heading shown on this slide.
    pub fn heading(&self) -> &str {
        match self {
            Self::Title { title, .. } => title,
            Self::Content { block, .. } => &block.title,
            Self::Closing { heading, .. } => heading,
        }
    }
}

/// The complete synthesis result, ready for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationDocument {
    /// Presentation title (shown on the title slide).
    pub title: String,

    /// Template profile every slide is styled with.
    pub profile: TemplateProfile,

    /// Slides in presentation order, bookended by title and closing slides.
    pub slides: Vec<SlideEntry>,

    /// Total number of slides, bookends included.
    pub slide_count: usize,
}

impl PresentationDocument {
    /// Content blocks in presentation order, bookends excluded.
    pub fn content_blocks(&self) -> Vec<&SlideContentBlock> {
        self.slides.iter().filter_map(SlideEntry::content_block).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_kind_from_type_name() {
        assert_eq!(SlideKind::from_type_name("title"), SlideKind::Title);
        assert_eq!(SlideKind::from_type_name(" Title "), SlideKind::Title);
        assert_eq!(SlideKind::from_type_name("content"), SlideKind::Content);
        assert_eq!(SlideKind::from_type_name("chart"), SlideKind::Content);
    }

    #[test]
    fn test_bullet_text() {
        assert_eq!(BulletItem::PlainText("a".into()).text(), "a");
        assert_eq!(BulletItem::LabeledPoint("b".into()).text(), "b");
    }

    #[test]
    fn test_block_bullets() {
        let mut block = SlideContentBlock::new(SlideKind::Content, "Intro", 1);
        block.add_bullet("one");
        block.add_bullet("two");

        assert_eq!(block.bullet_texts(), vec!["one", "two"]);
        assert_eq!(block.subtitle, None);
    }

    #[test]
    fn test_outline_node_child_titles() {
        let mut node = OutlineNode::new("Root", 1);
        node.children.push(OutlineNode::new("a", 3));
        node.children.push(OutlineNode::new("b", 3));

        assert_eq!(node.child_titles(), vec!["a", "b"]);
    }
}
