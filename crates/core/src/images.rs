//! Optional image enrichment.
//!
//! Assembly asks an [`ImageSource`] for decorative images. The default
//! source finds nothing, and a missing image never affects the document
//! structure.

use crate::types::ImageRef;

/// Keyword table: a word in the slide title maps to image search terms.
const KEYWORD_PATTERNS: &[(&str, &[&str])] = &[
    ("data", &["data", "chart", "graph"]),
    ("team", &["team", "collaboration", "meeting"]),
    ("technolog", &["technology", "computer", "innovation"]),
    ("market", &["market", "business", "growth"]),
    ("product", &["product", "design", "innovation"]),
    ("strateg", &["strategy", "planning", "target"]),
    ("analy", &["analysis", "data", "research"]),
    ("develop", &["development", "growth", "progress"]),
    ("manag", &["management", "leadership", "organization"]),
    ("innovat", &["innovation", "creative", "idea"]),
];

/// Terms used when nothing in the title matches.
const FALLBACK_KEYWORDS: &[&str] = &["business", "professional", "modern"];

/// Maximum number of keywords returned for one title.
const MAX_KEYWORDS: usize = 3;

/// Fixed query for title slide backgrounds.
pub const BACKGROUND_QUERY: &str = "background";
/// Fixed query for closing slide decorations.
pub const CLOSING_QUERY: &str = "thank you conclusion";
/// Fixed query for data-forward slides.
pub const DATA_VISUAL_QUERY: &str = "chart data visualization";

/// What an image is wanted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    /// Search keyword.
    pub keyword: String,
    /// Template category, used to bias the style.
    pub category: String,
}

impl ImageQuery {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }
}

/// A provider of decorative images.
pub trait ImageSource {
    /// Find one image for `query`, or `None`.
    fn find(&self, query: &ImageQuery) -> Option<ImageRef>;
}

/// Image source that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn find(&self, _query: &ImageQuery) -> Option<ImageRef> {
        None
    }
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn find(&self, query: &ImageQuery) -> Option<ImageRef> {
        (**self).find(query)
    }
}

/// Image search keywords for a slide title.
pub fn keywords_for(title: &str) -> Vec<&'static str> {
    let lowered = title.to_lowercase();
    let mut keywords: Vec<&'static str> = Vec::new();

    for (pattern, terms) in KEYWORD_PATTERNS {
        if lowered.contains(pattern) {
            for &term in terms.iter() {
                if !keywords.contains(&term) {
                    keywords.push(term);
                }
            }
        }
    }

    if keywords.is_empty() {
        keywords.extend_from_slice(FALLBACK_KEYWORDS);
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}
