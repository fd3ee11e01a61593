//! The face cutout: a single portrait image composited over the banner.

use serde::{Deserialize, Serialize};

use crate::geometry::{finite_or, Bounds};

/// CSS-style colour filters applied to the face image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceFilters {
    /// Contrast multiplier (1 = unchanged).
    pub contrast: f32,
    /// Saturation multiplier (1 = unchanged).
    pub saturation: f32,
    /// Brightness multiplier (1 = unchanged).
    pub brightness: f32,
}

impl Default for FaceFilters {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }
}

impl FaceFilters {
    /// Whether every filter is the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        #[allow(clippy::float_cmp)]
        let identity = self.contrast == 1.0 && self.saturation == 1.0 && self.brightness == 1.0;
        identity
    }
}

/// Face cutout configuration. Without an image the face is neither drawn
/// nor hit-testable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Image reference resolved by the image collaborator.
    pub image: Option<String>,
    /// Left edge of the drawn image.
    pub x: f32,
    /// Top edge of the drawn image.
    pub y: f32,
    /// Scale applied to the image's natural size.
    pub scale: f32,
    /// Horizontal flip sign: `1` normal, `-1` mirrored.
    pub flip: f32,
    /// Optional filter set.
    pub filters: Option<FaceFilters>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            image: None,
            x: 1000.0,
            y: 100.0,
            scale: 1.0,
            flip: 1.0,
            filters: None,
        }
    }
}

impl FaceConfig {
    /// Whether an image reference is set.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Flip normalised to exactly `1.0` or `-1.0`.
    #[must_use]
    pub fn flip_sign(&self) -> f32 {
        if self.flip < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Usable scale; zero, negative or non-finite values become 1.
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Absolute drawn bounds for an image of the given natural size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds_for(&self, natural_width: u32, natural_height: u32) -> Bounds {
        let scale = self.effective_scale();
        Bounds::new(
            finite_or(self.x, 1000.0),
            finite_or(self.y, 100.0),
            natural_width as f32 * scale,
            natural_height as f32 * scale,
        )
    }

    /// Shallow-merge a patch.
    pub fn apply_patch(&mut self, patch: &FacePatch) {
        if let Some(image) = &patch.image {
            self.image.clone_from(image);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(flip) = patch.flip {
            self.flip = flip;
        }
        if let Some(filters) = patch.filters {
            self.filters = filters;
        }
    }
}

/// A partial update to the face configuration.
///
/// Doubly optional fields distinguish "leave alone" (`None`) from
/// "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs, clippy::option_option)]
pub struct FacePatch {
    pub image: Option<Option<String>>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale: Option<f32>,
    pub flip: Option<f32>,
    pub filters: Option<Option<FaceFilters>>,
}

impl FacePatch {
    /// A patch that moves the face.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let face = FaceConfig::default();
        assert!(!face.has_image());
        assert_eq!((face.x, face.y, face.scale, face.flip), (1000.0, 100.0, 1.0, 1.0));
    }

    #[test]
    fn test_bounds_scale_natural_size() {
        let face = FaceConfig {
            image: Some("face.png".to_string()),
            x: 10.0,
            y: 20.0,
            scale: 0.5,
            ..FaceConfig::default()
        };
        assert_eq!(face.bounds_for(400, 200), Bounds::new(10.0, 20.0, 200.0, 100.0));
    }

    #[test]
    fn test_patch_can_clear_image() {
        let mut face = FaceConfig {
            image: Some("a.png".to_string()),
            ..FaceConfig::default()
        };
        face.apply_patch(&FacePatch {
            image: Some(None),
            ..FacePatch::default()
        });
        assert!(!face.has_image());
    }

    #[test]
    fn test_flip_sign() {
        let mut face = FaceConfig::default();
        face.flip = -3.0;
        assert_eq!(face.flip_sign(), -1.0);
        face.flip = 0.0;
        assert_eq!(face.flip_sign(), 1.0);
    }
}
