//! Slide content parsing.
//!
//! Model responses are decoded as a structured `{ "slides": [...] }`
//! payload when possible. When that fails, a line-oriented fallback
//! recovers slides from heading/bullet markup. Neither path fails.

use crate::normalize::{clean_text, strip_code_fence, strip_heading_marker};
use crate::types::{BulletItem, SlideContentBlock, SlideKind};
use serde::Deserialize;
use serde_json::Value;

/// Structured payload the content prompt asks for.
///
/// Slides are kept as raw values so one malformed slide cannot sink the
/// rest of the payload.
#[derive(Debug, Deserialize)]
struct SlidePayload {
    slides: Vec<Value>,
}

/// One slide record. Every field is taken loosely and resolved afterwards.
#[derive(Debug, Deserialize)]
struct RawSlide {
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    subtitle: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    section: Option<Value>,
}

impl RawSlide {
    fn into_block(self, section_index: usize) -> SlideContentBlock {
        let bullets = match self.content {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(resolve_bullet).collect(),
            Some(single) => vec![resolve_bullet(&single)],
        };

        SlideContentBlock {
            kind: self
                .kind
                .as_ref()
                .and_then(optional_text)
                .map(|k| SlideKind::from_type_name(&k))
                .unwrap_or_default(),
            title: self
                .title
                .as_ref()
                .and_then(optional_text)
                .map(|t| clean_text(&t))
                .unwrap_or_default(),
            subtitle: self
                .subtitle
                .as_ref()
                .and_then(optional_text)
                .map(|s| clean_text(&s))
                .filter(|s| !s.is_empty()),
            bullets,
            section_index,
            source_section: self.section.as_ref().and_then(section_number),
        }
    }
}

/// Resolve one raw bullet: strings verbatim, records by `point` then `text`,
/// anything else by its JSON text.
fn resolve_bullet(item: &Value) -> BulletItem {
    match item {
        Value::String(text) => BulletItem::PlainText(clean_text(text)),
        Value::Object(record) => {
            let label = ["point", "text"]
                .iter()
                .find_map(|key| record.get(*key))
                .map(value_text)
                .unwrap_or_else(|| item.to_string());
            BulletItem::LabeledPoint(clean_text(&label))
        }
        other => BulletItem::PlainText(clean_text(&other.to_string())),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Text of a scalar field; `null` counts as absent.
fn optional_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(value_text(other)),
    }
}

fn section_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode the structured payload.
///
/// `None` only when the text is not JSON or has no `slides` array. Fields of
/// an unexpected type inside a slide are resolved to text instead.
pub fn decode_structured(text: &str) -> Option<Vec<SlideContentBlock>> {
    let payload: SlidePayload = match serde_json::from_str(strip_code_fence(text)) {
        Ok(payload) => payload,
        Err(e) => {
            log::debug!("Structured decode failed, falling back to markup: {}", e);
            return None;
        }
    };

    let blocks = payload
        .slides
        .into_iter()
        .filter_map(|slide| match slide {
            Value::Object(_) => serde_json::from_value::<RawSlide>(slide).ok(),
            other => {
                log::debug!("Skipping slide that is not a record: {}", other);
                None
            }
        })
        .enumerate()
        .map(|(i, raw)| raw.into_block(i + 1))
        .collect();

    Some(blocks)
}

/// Recover slides from heading/bullet markup.
///
/// Every line starting with `#` closes the open slide and opens a new one;
/// every line starting with `-` (or `* `) adds a bullet to the open slide.
pub fn parse_markup(text: &str) -> Vec<SlideContentBlock> {
    let mut blocks: Vec<SlideContentBlock> = Vec::new();
    let mut current: Option<SlideContentBlock> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            let title = strip_heading_marker(line);
            current = Some(SlideContentBlock::new(
                SlideKind::Content,
                title,
                blocks.len() + 1,
            ));
        } else if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix("* ")) {
            if let Some(block) = current.as_mut() {
                block.add_bullet(clean_text(rest));
            }
        }
    }

    if let Some(done) = current.take() {
        blocks.push(done);
    }

    blocks
}

/// Parse a content-generation response into slide blocks.
pub fn parse_content(text: &str) -> Vec<SlideContentBlock> {
    let blocks = decode_structured(text).unwrap_or_else(|| parse_markup(text));
    log::debug!("Parsed {} slide content blocks", blocks.len());
    blocks
}

/// Derive slide blocks straight from outline markup.
///
/// Each `## ` section becomes a content slide holding its `- `/`* ` bullets.
/// Used when content generation succeeds but yields no slides.
pub fn blocks_from_outline(outline: &str) -> Vec<SlideContentBlock> {
    let mut blocks: Vec<SlideContentBlock> = Vec::new();
    let mut current: Option<SlideContentBlock> = None;

    for line in outline.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(title) = line.strip_prefix("## ") {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(SlideContentBlock::new(
                SlideKind::Content,
                clean_text(title),
                blocks.len() + 1,
            ));
        } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            if let Some(block) = current.as_mut() {
                block.add_bullet(clean_text(rest));
            }
        }
    }

    if let Some(done) = current.take() {
        blocks.push(done);
    }

    blocks
}
