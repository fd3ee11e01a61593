//! Everything drawn beneath the freeform elements: background, overlay,
//! template decoration, logo and the title block.

use serde::{Deserialize, Serialize};

use crate::palette::{Palette, Profession};
use crate::template::Template;

/// Fixed call-to-action line drawn under the tagline.
pub const CTA_TEXT: &str = "www.linkedin.com/in/yourname";

/// User overrides for the title block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    /// Title override.
    pub title: Option<String>,
    /// Tagline override.
    pub tagline: Option<String>,
    /// Title colour override.
    pub color: Option<String>,
    /// Font family override for the whole block.
    pub font: Option<String>,
}

/// Background and template configuration of the banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Backdrop {
    /// Background image reference.
    pub background: Option<String>,
    /// Opacity of the black legibility overlay over a background image.
    pub overlay_opacity: f32,
    /// Logo image reference.
    pub logo: Option<String>,
    /// Active profession context.
    pub profession: Option<Profession>,
    /// Active template.
    pub template: Option<Template>,
    /// Custom palette overriding the profession palette.
    pub custom_palette: Option<Palette>,
    /// Title block overrides.
    pub text: TextContent,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            background: None,
            overlay_opacity: 0.5,
            logo: None,
            profession: None,
            template: None,
            custom_palette: None,
            text: TextContent::default(),
        }
    }
}

impl Backdrop {
    /// The palette in effect: custom, then profession, then the default.
    #[must_use]
    pub fn palette(&self) -> Palette {
        self.custom_palette
            .clone()
            .or_else(|| self.profession.as_ref().map(|p| p.color_palette.clone()))
            .unwrap_or_default()
    }

    /// Whether the blank-canvas context is active.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.profession.as_ref().is_some_and(Profession::is_blank)
    }

    /// Overlay opacity clamped to `[0, 1]`.
    #[must_use]
    pub fn overlay(&self) -> f32 {
        if self.overlay_opacity.is_finite() {
            self.overlay_opacity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Title, falling back to the profession label.
    #[must_use]
    pub fn title(&self) -> &str {
        self.text
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.profession.as_ref().map(|p| p.label.as_str()))
            .unwrap_or("Your Profession")
    }

    /// Tagline, falling back to the profession's default.
    #[must_use]
    pub fn tagline(&self) -> &str {
        self.text
            .tagline
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.profession
                    .as_ref()
                    .map(|p| p.default_tagline.as_str())
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or("Your Tagline Here")
    }

    /// Font family of the title block.
    #[must_use]
    pub fn font(&self) -> &str {
        self.text.font.as_deref().unwrap_or("Inter")
    }

    /// Title colour.
    #[must_use]
    pub fn title_color(&self) -> &str {
        self.text.color.as_deref().unwrap_or("#ffffff")
    }
}
