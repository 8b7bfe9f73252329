//! Outline parsing, slide content parsing, template layout rotation, and
//! presentation assembly for model-generated slide decks.

pub mod assemble;
pub mod content;
pub mod error;
pub mod generation;
pub mod images;
pub mod layout;
pub mod normalize;
pub mod outline;
pub mod prompt;
pub mod render;
pub mod synthesis;
pub mod template;
pub mod types;

pub use assemble::{assemble, DocumentAssembler};
pub use content::parse_content;
pub use error::{Error, Result};
pub use generation::{CancellationToken, ContentGenerator, FragmentStream, StreamAccumulator};
pub use images::{ImageQuery, ImageSource, NoImages};
pub use layout::{assign, LayoutAssignment};
pub use outline::{parse_outline, HeadingPolicy, OutlineParser};
pub use prompt::{GenerationConfig, GenerationRequest, GenerationTask, OutlineLength, OutlineRequest};
pub use render::{DocumentRenderer, JsonRenderer, PlainTextRenderer, RenderMetadata, RenderedDeck};
pub use synthesis::{
    ContentResult, ExpandResult, OutlineResult, PresentationResult, SynthesisEngine, SynthesisStatus,
};
pub use template::{LayoutFamily, LayoutVariant, Palette, Rgb, TemplateProfile, TemplateRegistry};
pub use types::{
    BodyArrangement, BulletItem, ImageRef, OutlineNode, PresentationDocument, SlideContentBlock,
    SlideEntry, SlideKind,
};
