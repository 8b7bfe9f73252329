//! Layout rotation.
//!
//! Each content slide gets `variants[index % variants.len()]` from its
//! template profile. The rule looks only at the slide position, never at
//! the slide content.

use crate::template::{LayoutVariant, TemplateProfile};
use serde::{Deserialize, Serialize};

/// The layout variant chosen for one content slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAssignment {
    /// 0-based position among content slides.
    pub slide_index: usize,

    /// The chosen variant.
    pub variant: LayoutVariant,
}

/// Pick the layout variant for the content slide at `slide_index`.
pub fn assign(slide_index: usize, profile: &TemplateProfile) -> LayoutAssignment {
    let variants = profile.layout_variants();
    LayoutAssignment {
        slide_index,
        variant: variants[slide_index % variants.len()],
    }
}

/// Layout assignments for the first `count` content slides.
pub fn assign_all(count: usize, profile: &TemplateProfile) -> Vec<LayoutAssignment> {
    (0..count).map(|i| assign(i, profile)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{LayoutVariant::*, TemplateRegistry};

    fn profile_with(variants: &[LayoutVariant]) -> TemplateProfile {
        let base = TemplateRegistry::builtin().default_profile();
        TemplateProfile::new("Test", "Test", "", base.palette, variants.to_vec()).unwrap()
    }

    #[test]
    fn test_assignment_matches_modulo_rule() {
        let pool = [TitleContent, DataVisual, SplitContent, NatureImage];

        for k in 1..=4 {
            let profile = profile_with(&pool[..k]);
            for n in 0..=50 {
                let assignments = assign_all(n, &profile);
                assert_eq!(assignments.len(), n);
                for (i, assignment) in assignments.iter().enumerate() {
                    assert_eq!(assignment.slide_index, i);
                    assert_eq!(assignment.variant, pool[i % k], "k={} i={}", k, i);
                }
            }
        }
    }

    #[test]
    fn test_assignment_is_periodic() {
        let profile = TemplateRegistry::builtin().resolve("Tech Purple");
        let period = profile.layout_variants().len();

        for i in 0..20 {
            assert_eq!(assign(i, profile).variant, assign(i + period, profile).variant);
        }
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let profile = TemplateRegistry::builtin().default_profile();
        assert_eq!(assign_all(12, profile), assign_all(12, profile));
    }

    #[test]
    fn test_equal_length_profiles_rotate_in_lockstep() {
        let a = TemplateRegistry::builtin().resolve("Minimal White");
        let b = TemplateRegistry::builtin().resolve("Nature Green");

        let positions = |p: &TemplateProfile| -> Vec<usize> {
            assign_all(10, p)
                .iter()
                .map(|x| p.layout_variants().iter().position(|v| *v == x.variant).unwrap())
                .collect()
        };
        assert_eq!(positions(a), positions(b));
    }

    #[test]
    fn test_business_blue_rotation() {
        let profile = TemplateRegistry::builtin().default_profile();
        let variants: Vec<_> = assign_all(5, profile).into_iter().map(|a| a.variant).collect();
        assert_eq!(
            variants,
            vec![TitleContent, TitleContentImage, TwoColumn, ImageFocus, TitleContent]
        );
    }
}
