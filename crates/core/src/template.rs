//! Template profiles: palettes and ordered layout variants.
//!
//! The built-in table is created once on first use and is read-only
//! afterwards. Lookups never fail; unknown names resolve to the default
//! profile.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Name of the profile that unknown template names resolve to.
pub const DEFAULT_TEMPLATE_NAME: &str = "Business Blue";

static BUILTIN_REGISTRY: LazyLock<TemplateRegistry> = LazyLock::new(TemplateRegistry::builtin_table);

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid color '{}', expected #RRGGBB", value))
    }
}

/// The four colors of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
}

/// Structural arrangement family a layout variant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFamily {
    /// Title plus bullet text.
    TextForward,
    /// Bullets next to (or under) an image.
    ImageForward,
    /// Bullets split across two columns.
    TwoColumn,
    /// Bullets beside a chart or grid.
    DataForward,
}

/// Identifier of a slide layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    TitleContent,
    TitleContentImage,
    TwoColumn,
    ImageFocus,
    CleanLayout,
    MinimalImage,
    TextFocus,
    DynamicLayout,
    CreativeImage,
    SplitContent,
    VisualImpact,
    TechLayout,
    DataVisual,
    InnovationFocus,
    ModernGrid,
    OrganicLayout,
    NatureImage,
    EcoDesign,
    GreenFocus,
}

impl LayoutVariant {
    const ALL: [LayoutVariant; 19] = [
        Self::TitleContent,
        Self::TitleContentImage,
        Self::TwoColumn,
        Self::ImageFocus,
        Self::CleanLayout,
        Self::MinimalImage,
        Self::TextFocus,
        Self::DynamicLayout,
        Self::CreativeImage,
        Self::SplitContent,
        Self::VisualImpact,
        Self::TechLayout,
        Self::DataVisual,
        Self::InnovationFocus,
        Self::ModernGrid,
        Self::OrganicLayout,
        Self::NatureImage,
        Self::EcoDesign,
        Self::GreenFocus,
    ];

    /// The identifier used in template sources and serialized documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleContent => "title_content",
            Self::TitleContentImage => "title_content_image",
            Self::TwoColumn => "two_column",
            Self::ImageFocus => "image_focus",
            Self::CleanLayout => "clean_layout",
            Self::MinimalImage => "minimal_image",
            Self::TextFocus => "text_focus",
            Self::DynamicLayout => "dynamic_layout",
            Self::CreativeImage => "creative_image",
            Self::SplitContent => "split_content",
            Self::VisualImpact => "visual_impact",
            Self::TechLayout => "tech_layout",
            Self::DataVisual => "data_visual",
            Self::InnovationFocus => "innovation_focus",
            Self::ModernGrid => "modern_grid",
            Self::OrganicLayout => "organic_layout",
            Self::NatureImage => "nature_image",
            Self::EcoDesign => "eco_design",
            Self::GreenFocus => "green_focus",
        }
    }

    /// Which arrangement family this variant renders as.
    pub fn family(self) -> LayoutFamily {
        match self {
            // minimal_image and nature_image render as standard text slides.
            Self::TitleContentImage | Self::ImageFocus | Self::CreativeImage => {
                LayoutFamily::ImageForward
            }
            Self::TwoColumn | Self::SplitContent => LayoutFamily::TwoColumn,
            Self::DataVisual | Self::ModernGrid => LayoutFamily::DataForward,
            _ => LayoutFamily::TextForward,
        }
    }

    /// Image-led variant with a shortened bullet list.
    pub fn is_image_focus(self) -> bool {
        self == Self::ImageFocus
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| Error::InvalidTemplate(format!("unknown layout variant '{}'", wanted)))
    }
}

/// A template as written in a template source, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub palette: Palette,
    pub layout_variants: Vec<String>,
}

/// A named visual identity: palette plus an ordered, non-empty list of
/// layout variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TemplateDefinition")]
pub struct TemplateProfile {
    pub name: String,
    pub category: String,
    pub description: String,
    pub palette: Palette,
    layout_variants: Vec<LayoutVariant>,
}

impl TemplateProfile {
    /// Create a profile, rejecting an empty variant list.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        palette: Palette,
        layout_variants: Vec<LayoutVariant>,
    ) -> Result<Self> {
        let name = name.into();
        if layout_variants.is_empty() {
            return Err(Error::InvalidTemplate(format!(
                "template '{}' has no layout variants",
                name
            )));
        }
        Ok(Self {
            name,
            category: category.into(),
            description: description.into(),
            palette,
            layout_variants,
        })
    }

    /// Ordered layout variants. Never empty.
    pub fn layout_variants(&self) -> &[LayoutVariant] {
        &self.layout_variants
    }

    fn builtin(
        name: &str,
        category: &str,
        description: &str,
        palette: Palette,
        layout_variants: [LayoutVariant; 4],
    ) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            palette,
            layout_variants: layout_variants.to_vec(),
        }
    }
}

impl TryFrom<TemplateDefinition> for TemplateProfile {
    type Error = Error;

    fn try_from(def: TemplateDefinition) -> Result<Self> {
        let variants = def
            .layout_variants
            .iter()
            .map(|v| v.parse::<LayoutVariant>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(def.name, def.category, def.description, def.palette, variants)
    }
}

/// Top-level shape of a JSON template source.
#[derive(Debug, Deserialize)]
struct TemplateSource {
    default: String,
    templates: Vec<TemplateDefinition>,
}

/// Lookup table from template name to profile.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    profiles: Vec<TemplateProfile>,
    default_index: usize,
}

impl TemplateRegistry {
    /// The built-in registry, shared for the lifetime of the process.
    pub fn builtin() -> &'static TemplateRegistry {
        &BUILTIN_REGISTRY
    }

    /// Build a registry from validated profiles.
    ///
    /// `default_name` must name one of the profiles; duplicate names are rejected.
    pub fn new(profiles: Vec<TemplateProfile>, default_name: &str) -> Result<Self> {
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(Error::InvalidTemplate(format!(
                    "duplicate template name '{}'",
                    profile.name
                )));
            }
        }

        let default_index = profiles
            .iter()
            .position(|p| p.name == default_name)
            .ok_or_else(|| {
                Error::InvalidTemplate(format!("default template '{}' is not defined", default_name))
            })?;

        Ok(Self {
            profiles,
            default_index,
        })
    }

    /// Load a registry from a JSON template source.
    ///
    /// ```json
    /// { "default": "Plain", "templates": [ { "name": "Plain", "category": "Minimal",
    ///   "palette": { "primary": "#000000", "secondary": "#777777",
    ///                "accent": "#333333", "background": "#FFFFFF" },
    ///   "layout_variants": ["title_content"] } ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let source: TemplateSource = serde_json::from_str(json)?;
        let profiles = source
            .templates
            .into_iter()
            .map(TemplateProfile::try_from)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Loaded {} templates from source", profiles.len());
        Self::new(profiles, &source.default)
    }

    /// Resolve a template by name. Exact match first, then case-insensitive,
    /// then the default profile.
    pub fn resolve(&self, name: &str) -> &TemplateProfile {
        match self.get(name) {
            Some(profile) => profile,
            None => {
                log::debug!("Unknown template '{}', using '{}'", name, self.default_profile().name);
                self.default_profile()
            }
        }
    }

    /// Look up a template by name without falling back.
    pub fn get(&self, name: &str) -> Option<&TemplateProfile> {
        let wanted = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name == wanted)
            .or_else(|| self.profiles.iter().find(|p| p.name.eq_ignore_ascii_case(wanted)))
    }

    /// The profile unknown names resolve to.
    pub fn default_profile(&self) -> &TemplateProfile {
        &self.profiles[self.default_index]
    }

    /// All profiles in registration order.
    pub fn profiles(&self) -> &[TemplateProfile] {
        &self.profiles
    }

    fn builtin_table() -> Self {
        use LayoutVariant::*;

        let profiles = vec![
            TemplateProfile::builtin(
                DEFAULT_TEMPLATE_NAME,
                "Business",
                "Professional business style in deep blue",
                Palette {
                    primary: Rgb::new(31, 78, 121),
                    secondary: Rgb::new(217, 226, 243),
                    accent: Rgb::new(70, 130, 180),
                    background: Rgb::new(248, 249, 250),
                },
                [TitleContent, TitleContentImage, TwoColumn, ImageFocus],
            ),
            TemplateProfile::builtin(
                "Minimal White",
                "Minimal",
                "Clean minimal style with generous white space",
                Palette {
                    primary: Rgb::new(46, 46, 46),
                    secondary: Rgb::new(166, 166, 166),
                    accent: Rgb::new(102, 102, 102),
                    background: Rgb::new(255, 255, 255),
                },
                [TitleContent, CleanLayout, MinimalImage, TextFocus],
            ),
            TemplateProfile::builtin(
                "Vibrant Orange",
                "Creative",
                "Energetic creative style with warm accents",
                Palette {
                    primary: Rgb::new(255, 107, 53),
                    secondary: Rgb::new(247, 147, 30),
                    accent: Rgb::new(255, 152, 0),
                    background: Rgb::new(255, 248, 230),
                },
                [DynamicLayout, CreativeImage, SplitContent, VisualImpact],
            ),
            TemplateProfile::builtin(
                "Tech Purple",
                "Technology",
                "Modern technology style with data-driven layouts",
                Palette {
                    primary: Rgb::new(74, 21, 75),
                    secondary: Rgb::new(114, 9, 183),
                    accent: Rgb::new(139, 69, 19),
                    background: Rgb::new(250, 245, 255),
                },
                [TechLayout, DataVisual, InnovationFocus, ModernGrid],
            ),
            TemplateProfile::builtin(
                "Nature Green",
                "Nature",
                "Fresh natural style in calm greens",
                Palette {
                    primary: Rgb::new(46, 125, 50),
                    secondary: Rgb::new(76, 175, 80),
                    accent: Rgb::new(200, 230, 201),
                    background: Rgb::new(248, 255, 248),
                },
                [OrganicLayout, NatureImage, EcoDesign, GreenFocus],
            ),
        ];

        Self {
            profiles,
            default_index: 0,
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
