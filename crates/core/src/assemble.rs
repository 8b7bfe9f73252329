//! Presentation assembly.
//!
//! Wraps content blocks in a title slide and a closing slide, assigns each
//! content slide its layout variant, and resolves how the slide body is
//! arranged for that variant.

use crate::images::{
    keywords_for, ImageQuery, ImageSource, NoImages, BACKGROUND_QUERY, CLOSING_QUERY,
    DATA_VISUAL_QUERY,
};
use crate::layout::{assign, LayoutAssignment};
use crate::template::{LayoutFamily, TemplateProfile};
use crate::types::{
    BodyArrangement, ImageRef, PresentationDocument, SlideContentBlock, SlideEntry,
};

/// Closing slide heading.
pub const CLOSING_HEADING: &str = "Thank you!";
/// Closing slide message.
pub const CLOSING_MESSAGE: &str = "Thank you for listening\nWe look forward to your feedback";

/// Bullets kept on an image-focus slide.
const IMAGE_FOCUS_MAX_BULLETS: usize = 4;
/// A two-column slide needs more bullets than this to actually split.
const TWO_COLUMN_MIN_SPLIT: usize = 2;

/// Builds [`PresentationDocument`]s, optionally enriched with images.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler<I = NoImages> {
    images: I,
}

impl DocumentAssembler<NoImages> {
    /// Create an assembler without image enrichment.
    pub fn new() -> Self {
        Self { images: NoImages }
    }
}

impl<I: ImageSource> DocumentAssembler<I> {
    /// Create an assembler that asks `images` for decorative images.
    pub fn with_images(images: I) -> Self {
        Self { images }
    }

    /// Assemble a document: title slide, one slide per block, closing slide.
    pub fn assemble(
        &self,
        title: &str,
        blocks: Vec<SlideContentBlock>,
        profile: &TemplateProfile,
    ) -> PresentationDocument {
        let mut slides = Vec::with_capacity(blocks.len() + 2);

        slides.push(SlideEntry::Title {
            title: title.to_string(),
            subtitle: format!("Generated with AI\nTemplate style: {}", profile.name),
            background: self.lookup(BACKGROUND_QUERY, profile),
        });

        for (index, block) in blocks.into_iter().enumerate() {
            let layout = assign(index, profile);
            let body = self.arrange(&block, layout, profile);
            slides.push(SlideEntry::Content {
                block,
                layout,
                body,
            });
        }

        slides.push(SlideEntry::Closing {
            heading: CLOSING_HEADING.to_string(),
            message: CLOSING_MESSAGE.to_string(),
            decoration: self.lookup(CLOSING_QUERY, profile),
        });

        let slide_count = slides.len();
        log::info!(
            "Assembled '{}' with {} slides using template '{}'",
            title,
            slide_count,
            profile.name
        );

        PresentationDocument {
            title: title.to_string(),
            profile: profile.clone(),
            slides,
            slide_count,
        }
    }

    fn lookup(&self, keyword: &str, profile: &TemplateProfile) -> Option<ImageRef> {
        self.images.find(&ImageQuery::new(keyword, profile.category.as_str()))
    }

    /// Resolve the body arrangement for a block under its layout variant.
    fn arrange(
        &self,
        block: &SlideContentBlock,
        layout: LayoutAssignment,
        profile: &TemplateProfile,
    ) -> BodyArrangement {
        let bullets: Vec<String> = block.bullet_texts().into_iter().map(String::from).collect();

        match layout.variant.family() {
            LayoutFamily::TextForward => BodyArrangement::SingleColumn { bullets },
            LayoutFamily::TwoColumn => split_columns(bullets),
            LayoutFamily::ImageForward => {
                let keyword = keywords_for(&block.title).first().copied().unwrap_or("business");
                let image_focus = layout.variant.is_image_focus();
                let mut bullets = bullets;
                if image_focus {
                    bullets.truncate(IMAGE_FOCUS_MAX_BULLETS);
                }
                BodyArrangement::ImageWithText {
                    bullets,
                    image_focus,
                    image: self.lookup(keyword, profile),
                }
            }
            LayoutFamily::DataForward => BodyArrangement::DataPanel {
                bullets,
                visual: self.lookup(DATA_VISUAL_QUERY, profile),
            },
        }
    }
}

/// Split bullets into two columns at the midpoint; short lists stay in one.
fn split_columns(mut bullets: Vec<String>) -> BodyArrangement {
    if bullets.len() <= TWO_COLUMN_MIN_SPLIT {
        return BodyArrangement::SingleColumn { bullets };
    }
    let right = bullets.split_off(bullets.len() / 2);
    BodyArrangement::TwoColumn {
        left: bullets,
        right,
    }
}

/// Assemble a document without image enrichment.
pub fn assemble(
    title: &str,
    blocks: Vec<SlideContentBlock>,
    profile: &TemplateProfile,
) -> PresentationDocument {
    DocumentAssembler::new().assemble(title, blocks, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{LayoutVariant, TemplateRegistry};
    use crate::types::SlideKind;
    use std::cell::RefCell;

    fn block(title: &str, bullets: &[&str], index: usize) -> SlideContentBlock {
        let mut block = SlideContentBlock::new(SlideKind::Content, title, index);
        for b in bullets {
            block.add_bullet(*b);
        }
        block
    }

    fn blocks(n: usize) -> Vec<SlideContentBlock> {
        (1..=n).map(|i| block(&format!("Slide {}", i), &["a", "b", "c"], i)).collect()
    }

    #[test]
    fn test_empty_blocks_still_bookended() {
        let profile = TemplateRegistry::builtin().default_profile();
        let doc = assemble("Demo", Vec::new(), profile);

        assert_eq!(doc.slides.len(), 2);
        assert_eq!(doc.slide_count, 2);
        assert!(matches!(&doc.slides[0], SlideEntry::Title { title, .. } if title == "Demo"));
        assert!(matches!(
            &doc.slides[1],
            SlideEntry::Closing { heading, .. } if heading == CLOSING_HEADING
        ));
    }

    #[test]
    fn test_slide_count_and_order() {
        let profile = TemplateRegistry::builtin().resolve("Tech Purple");
        for m in 0..10 {
            let input = blocks(m);
            let doc = assemble("Demo", input.clone(), profile);

            assert_eq!(doc.slide_count, m + 2);
            assert_eq!(doc.slides.len(), m + 2);
            let kept: Vec<SlideContentBlock> = doc.content_blocks().into_iter().cloned().collect();
            assert_eq!(kept, input);
            assert!(matches!(doc.slides[0], SlideEntry::Title { .. }));
            assert!(matches!(doc.slides[m + 1], SlideEntry::Closing { .. }));
        }
    }

    #[test]
    fn test_layouts_follow_rotation() {
        let profile = TemplateRegistry::builtin().default_profile();
        let doc = assemble("Demo", blocks(6), profile);

        for (i, entry) in doc.slides[1..=6].iter().enumerate() {
            match entry {
                SlideEntry::Content { layout, .. } => assert_eq!(*layout, assign(i, profile)),
                other => panic!("expected content slide, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_title_subtitle_names_template() {
        let profile = TemplateRegistry::builtin().resolve("Nature Green");
        let doc = assemble("Demo", Vec::new(), profile);

        match &doc.slides[0] {
            SlideEntry::Title { subtitle, .. } => assert!(subtitle.contains("Nature Green")),
            other => panic!("expected title slide, got {:?}", other),
        }
        assert_eq!(doc.profile, *profile);
    }

    #[test]
    fn test_two_column_split() {
        assert_eq!(
            split_columns(vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()]),
            BodyArrangement::TwoColumn {
                left: vec!["1".into(), "2".into()],
                right: vec!["3".into(), "4".into(), "5".into()],
            }
        );
        assert_eq!(
            split_columns(vec!["1".into(), "2".into()]),
            BodyArrangement::SingleColumn {
                bullets: vec!["1".into(), "2".into()]
            }
        );
    }

    #[test]
    fn test_body_arrangements_by_family() {
        let profile = TemplateRegistry::builtin().default_profile();
        let many = ["1", "2", "3", "4", "5", "6"];
        let input: Vec<_> = (1..=4).map(|i| block("Market Data", &many, i)).collect();
        let doc = assemble("Demo", input, profile);

        let bodies: Vec<&BodyArrangement> = doc
            .slides
            .iter()
            .filter_map(|s| match s {
                SlideEntry::Content { body, .. } => Some(body),
                _ => None,
            })
            .collect();

        // Business Blue: title_content, title_content_image, two_column, image_focus
        assert!(matches!(bodies[0], BodyArrangement::SingleColumn { bullets } if bullets.len() == 6));
        assert!(matches!(
            bodies[1],
            BodyArrangement::ImageWithText { bullets, image_focus: false, image: None } if bullets.len() == 6
        ));
        assert!(matches!(
            bodies[2],
            BodyArrangement::TwoColumn { left, right } if left.len() == 3 && right.len() == 3
        ));
        assert!(matches!(
            bodies[3],
            BodyArrangement::ImageWithText { bullets, image_focus: true, .. } if bullets.len() == 4
        ));
    }

    #[test]
    fn test_data_forward_arrangement() {
        let profile = TemplateRegistry::builtin().resolve("Tech Purple");
        let doc = assemble("Demo", blocks(2), profile);

        match &doc.slides[2] {
            SlideEntry::Content { layout, body, .. } => {
                assert_eq!(layout.variant, LayoutVariant::DataVisual);
                assert!(matches!(body, BodyArrangement::DataPanel { visual: None, .. }));
            }
            other => panic!("expected content slide, got {:?}", other),
        }
    }

    struct RecordingImages {
        queries: RefCell<Vec<ImageQuery>>,
    }

    impl ImageSource for RecordingImages {
        fn find(&self, query: &ImageQuery) -> Option<ImageRef> {
            self.queries.borrow_mut().push(query.clone());
            Some(ImageRef {
                url: format!("https://images.test/{}", query.keyword.replace(' ', "-")),
                description: query.keyword.clone(),
            })
        }
    }

    #[test]
    fn test_image_source_enriches_without_changing_structure() {
        let images = RecordingImages {
            queries: RefCell::new(Vec::new()),
        };
        let profile = TemplateRegistry::builtin().default_profile();
        let assembler = DocumentAssembler::with_images(&images);
        let doc = assembler.assemble("Demo", vec![block("Intro", &[], 1), block("Team", &[], 2)], profile);

        assert_eq!(doc.slide_count, 4);
        let keywords: Vec<String> = images.queries.borrow().iter().map(|q| q.keyword.clone()).collect();
        assert_eq!(keywords, vec!["background", "team", "thank you conclusion"]);
        assert!(images.queries.borrow().iter().all(|q| q.category == "Business"));

        match &doc.slides[2] {
            SlideEntry::Content {
                body: BodyArrangement::ImageWithText { image: Some(image), .. },
                ..
            } => assert_eq!(image.url, "https://images.test/team"),
            other => panic!("expected image slide, got {:?}", other),
        }
    }
}
