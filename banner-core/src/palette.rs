//! Colour palettes and the profession catalog that supplies them.

use serde::{Deserialize, Serialize};

/// Id of the "start from nothing" context that disables template chrome.
pub const BLANK_PROFESSION_ID: &str = "blank";

const FALLBACK: [&str; 3] = ["#4f46e5", "#3b82f6", "#f0f0f0"];

/// An ordered list of hex colours.
///
/// Index 0 is the primary/accent colour, 1 the secondary and 2 the
/// background fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Create a palette from colour strings.
    #[must_use]
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(colors.into_iter().map(Into::into).collect())
    }

    /// Colour at `index`, falling back to the default palette.
    #[must_use]
    pub fn color(&self, index: usize) -> &str {
        self.0
            .get(index)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK.get(index).copied().unwrap_or("#000000"))
    }

    /// Primary accent colour.
    #[must_use]
    pub fn primary(&self) -> &str {
        self.color(0)
    }

    /// Secondary colour.
    #[must_use]
    pub fn secondary(&self) -> &str {
        self.color(1)
    }

    /// Flat background colour used when no background image is drawn.
    #[must_use]
    pub fn background(&self) -> &str {
        self.color(2)
    }

    /// Colours as a slice.
    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(FALLBACK)
    }
}

/// A profession context: label, palette and default tagline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    /// Stable identifier.
    pub id: String,
    /// Display label, used as the default title.
    pub label: String,
    /// Catalog category.
    #[serde(default)]
    pub category: String,
    /// Default palette.
    pub color_palette: Palette,
    /// Default tagline.
    #[serde(default)]
    pub default_tagline: String,
}

impl Profession {
    fn entry(id: &str, label: &str, category: &str, colors: [&str; 3], tagline: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category: category.to_string(),
            color_palette: Palette::new(colors),
            default_tagline: tagline.to_string(),
        }
    }

    /// The blank-canvas sentinel.
    #[must_use]
    pub fn blank() -> Self {
        Self::entry(
            BLANK_PROFESSION_ID,
            "Blank Canvas",
            "Custom",
            ["#ffffff", "#000000", "#ffffff"],
            "",
        )
    }

    /// Whether this is the blank-canvas sentinel.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.id == BLANK_PROFESSION_ID
    }

    /// The built-in profession catalog.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::entry(
                "graphic-designer",
                "Graphic Designer",
                "Creative",
                ["#FF6B6B", "#4ECDC4", "#556270"],
                "Transforming ideas into visual stories",
            ),
            Self::entry(
                "software-developer",
                "Software Developer",
                "Technology",
                ["#2D3436", "#0984E3", "#DFE6E9"],
                "Building tomorrow's digital solutions",
            ),
            Self::entry(
                "marketing-specialist",
                "Marketing Specialist",
                "Business",
                ["#6C5CE7", "#A29BFE", "#FD79A8"],
                "Driving growth through strategic storytelling",
            ),
            Self::entry(
                "teacher",
                "Teacher / Educator",
                "Education",
                ["#00B894", "#55EFC4", "#FFEAA7"],
                "Inspiring minds, shaping futures",
            ),
            Self::entry(
                "business-consultant",
                "Business Consultant",
                "Business",
                ["#2C3E50", "#ECF0F1", "#E74C3C"],
                "Strategic solutions for sustainable growth",
            ),
            Self::entry(
                "video-editor",
                "Video Editor",
                "Creative",
                ["#E17055", "#D63031", "#FAB1A0"],
                "Crafting narratives frame by frame",
            ),
            Self::entry(
                "content-creator",
                "Content Creator",
                "Creative",
                ["#E056FD", "#686DE0", "#FFFFFF"],
                "Creating content that connects",
            ),
            Self::entry(
                "real-estate",
                "Real Estate Agent",
                "Business",
                ["#C44569", "#F8A5C2", "#303952"],
                "Helping you find your dream home",
            ),
            Self::entry(
                "financial-advisor",
                "Financial Advisor",
                "Business",
                ["#009432", "#A3CB38", "#1B1464"],
                "Securing your financial future",
            ),
            Self::entry(
                "healthcare",
                "Healthcare Professional",
                "Medical",
                ["#12CBC4", "#1289A7", "#D980FA"],
                "Dedicated to your health and wellness",
            ),
            Self::entry(
                "entrepreneur",
                "Entrepreneur",
                "Business",
                ["#F79F1F", "#EE5A24", "#EA2027"],
                "Innovating for a better world",
            ),
            Self::entry(
                "student",
                "Student",
                "Education",
                ["#0652DD", "#12CBC4", "#FFC312"],
                "Aspiring professional ready to learn",
            ),
        ]
    }

    /// Look up a catalog entry (or the blank sentinel) by id.
    #[must_use]
    pub fn by_id(id: &str) -> Option<Self> {
        if id == BLANK_PROFESSION_ID {
            return Some(Self::blank());
        }
        Self::catalog().into_iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_fallbacks() {
        let p = Palette::new(["#111111"]);
        assert_eq!(p.primary(), "#111111");
        assert_eq!(p.secondary(), "#3b82f6");
        assert_eq!(p.background(), "#f0f0f0");
        assert_eq!(p.color(7), "#000000");
    }

    #[test]
    fn test_palette_is_transparent_json() {
        let p: Palette = serde_json::from_str(r##"["#1", "#2", "#3"]"##).expect("parse");
        assert_eq!(p.colors().len(), 3);
    }

    #[test]
    fn test_catalog_palettes_have_three_colours() {
        for prof in Profession::catalog() {
            assert_eq!(prof.color_palette.colors().len(), 3, "{}", prof.id);
            assert!(!prof.is_blank());
        }
    }

    #[test]
    fn test_blank_lookup() {
        assert!(Profession::by_id("blank").is_some_and(|p| p.is_blank()));
        assert_eq!(
            Profession::by_id("student").map(|p| p.label),
            Some("Student".to_string())
        );
    }
}
