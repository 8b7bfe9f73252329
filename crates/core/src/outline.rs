//! Outline parsing.
//!
//! Turns heading/bullet markup into a tree of [`OutlineNode`]s in a single
//! forward pass. Parsing never fails: lines that fit nowhere are dropped.

use crate::normalize::{clean_text, heading_level, strip_heading_marker};
use crate::types::OutlineNode;

/// Depth of section nodes.
const SECTION_DEPTH: u8 = 1;
/// Depth of subsection nodes.
const SUBSECTION_DEPTH: u8 = 2;
/// Depth of bullet leaves.
const POINT_DEPTH: u8 = 3;

/// How `#` and `##` headings map onto tree depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingPolicy {
    /// `#` and `##` both open a new root. The document title and its
    /// top-level sections share one tree level.
    #[default]
    Folded,
    /// `#` opens a root; `##` opens a subsection under it. A `##` that is
    /// not under a `#` root opens its own root.
    Nested,
}

/// Classified outline line.
#[derive(Debug, PartialEq)]
enum OutlineLine {
    /// `#` or `##` followed by a space.
    Section { level: usize, title: String },
    /// `###` or deeper.
    Subsection(String),
    /// `- ` or `* `.
    Point(String),
    Other,
}

fn classify(line: &str) -> OutlineLine {
    let level = heading_level(line);
    match level {
        1 | 2 if line[level..].starts_with(' ') => OutlineLine::Section {
            level,
            title: strip_heading_marker(line),
        },
        n if n >= 3 => OutlineLine::Subsection(strip_heading_marker(line)),
        _ => match line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            Some(rest) => OutlineLine::Point(clean_text(rest)),
            None => OutlineLine::Other,
        },
    }
}

/// Parser for model-generated outline markup.
#[derive(Debug, Clone, Default)]
pub struct OutlineParser {
    policy: HeadingPolicy,
}

impl OutlineParser {
    /// Create a parser with the default (folded) heading policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how `#`/`##` headings map onto tree depth.
    pub fn with_heading_policy(mut self, policy: HeadingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active heading policy.
    pub fn heading_policy(&self) -> HeadingPolicy {
        self.policy
    }

    /// Parse outline markup into root nodes.
    ///
    /// Empty or unrecognizable input yields an empty list.
    pub fn parse(&self, markdown: &str) -> Vec<OutlineNode> {
        let mut builder = TreeBuilder::default();

        for line in markdown.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match classify(line) {
                OutlineLine::Section { level, title } => match self.policy {
                    HeadingPolicy::Nested if level == 2 && builder.has_title_root() => {
                        builder.open_subsection(title)
                    }
                    _ => builder.open_root(title, level),
                },
                OutlineLine::Subsection(title) => builder.open_subsection(title),
                OutlineLine::Point(title) => builder.add_point(title),
                OutlineLine::Other => {}
            }
        }

        let tree = builder.finish();
        log::debug!("Parsed outline into {} root sections", tree.len());
        tree
    }
}

/// Scan state: the open root and, inside it, the open subsection.
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<OutlineNode>,
    /// Heading level that opened the last root.
    root_level: usize,
    subsection_open: bool,
}

impl TreeBuilder {
    /// Whether the open root came from a `#` heading.
    fn has_title_root(&self) -> bool {
        !self.roots.is_empty() && self.root_level == 1
    }

    fn open_root(&mut self, title: String, level: usize) {
        self.roots.push(OutlineNode::new(title, SECTION_DEPTH));
        self.root_level = level;
        self.subsection_open = false;
    }

    fn open_subsection(&mut self, title: String) {
        if let Some(root) = self.roots.last_mut() {
            root.children.push(OutlineNode::new(title, SUBSECTION_DEPTH));
            self.subsection_open = true;
        }
    }

    fn add_point(&mut self, title: String) {
        let Some(root) = self.roots.last_mut() else {
            return;
        };
        let point = OutlineNode::new(title, POINT_DEPTH);

        match root.children.last_mut() {
            Some(subsection) if self.subsection_open => subsection.children.push(point),
            _ => root.children.push(point),
        }
    }

    fn finish(self) -> Vec<OutlineNode> {
        self.roots
    }
}

/// Parse outline markup with the default parser.
pub fn parse_outline(markdown: &str) -> Vec<OutlineNode> {
    OutlineParser::new().parse(markdown)
}
