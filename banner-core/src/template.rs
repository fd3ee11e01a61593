//! Banner templates: a decoration style plus a text anchor.

use serde::{Deserialize, Serialize};

/// Decoration recipe painted over the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    /// Diagonal accent wedge on the left.
    Modern,
    /// Solid band across the bottom quarter; larger title.
    Bold,
    /// Soft primary gradient fading out to the right.
    Clean,
    /// Thin accent stripe on the right edge; no CTA line.
    Minimal,
    /// Panel dividers with a bottom bar.
    Grid,
}

/// Horizontal placement of the title block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAnchor {
    /// Left aligned at x = 50.
    #[default]
    Left,
    /// Centred.
    Center,
    /// Centred, used with large typography.
    CenterBig,
    /// Right aligned 50px from the right edge.
    Right,
    /// Centred and pushed down over the bottom bar.
    OverlayBottom,
}

impl TextAnchor {
    /// Whether the anchor centres the text horizontally.
    #[must_use]
    pub fn is_centered(self) -> bool {
        matches!(self, Self::Center | Self::CenterBig | Self::OverlayBottom)
    }
}

/// Layout descriptor of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLayout {
    /// Where the title block is anchored.
    pub text_position: TextAnchor,
}

/// A named template preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Decoration style.
    pub style: TemplateStyle,
    /// Layout descriptor.
    #[serde(default)]
    pub layout: TemplateLayout,
    /// Whether the template is designed to sit over a darkened photo.
    #[serde(default)]
    pub has_overlay: bool,
}

impl Template {
    /// Build a template.
    #[must_use]
    pub fn new(id: &str, label: &str, style: TemplateStyle, anchor: TextAnchor) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            style,
            layout: TemplateLayout {
                text_position: anchor,
            },
            has_overlay: false,
        }
    }

    /// The five built-in presets.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self {
                has_overlay: true,
                ..Self::new(
                    "corporate",
                    "Professional Corporate",
                    TemplateStyle::Modern,
                    TextAnchor::Left,
                )
            },
            Self::new(
                "personal-brand",
                "Personal Brand",
                TemplateStyle::Clean,
                TextAnchor::Center,
            ),
            Self::new(
                "minimalist",
                "Minimalist Concept",
                TemplateStyle::Minimal,
                TextAnchor::Right,
            ),
            Self {
                has_overlay: true,
                ..Self::new(
                    "showcase",
                    "Multi-panel Showcase",
                    TemplateStyle::Grid,
                    TextAnchor::OverlayBottom,
                )
            },
            Self {
                has_overlay: true,
                ..Self::new(
                    "bold",
                    "Bold Typography",
                    TemplateStyle::Bold,
                    TextAnchor::CenterBig,
                )
            },
        ]
    }

    /// Look up a built-in preset by id.
    #[must_use]
    pub fn by_id(id: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|t| t.id == id)
    }

    /// The text anchor of this template.
    #[must_use]
    pub fn anchor(&self) -> TextAnchor {
        self.layout.text_position
    }
}
