//! Viewport configuration: zoom and grid settings, independent of content.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Logical canvas width.
pub const CANVAS_WIDTH: f32 = 1584.0;

/// Logical canvas height.
pub const CANVAS_HEIGHT: f32 = 396.0;

/// Grid cell size in logical units.
pub const GRID_SIZE: f32 = 40.0;

const MIN_ZOOM: f32 = 10.0;
const MAX_ZOOM: f32 = 400.0;

/// Zoom and grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Display zoom in percent.
    pub zoom_percent: f32,
    /// Draw the grid overlay.
    pub show_grid: bool,
    /// Snap drag results to the grid.
    pub snap_to_grid: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_percent: 100.0,
            show_grid: false,
            snap_to_grid: false,
        }
    }
}

impl ViewportConfig {
    /// Grid cell size.
    #[must_use]
    pub const fn grid_size(&self) -> f32 {
        GRID_SIZE
    }

    /// Set the zoom, clamped to the supported range.
    pub fn set_zoom(&mut self, percent: f32) {
        self.zoom_percent = if percent.is_finite() {
            percent.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            100.0
        };
    }

    /// Display scale factor (zoom / 100).
    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        if self.zoom_percent.is_finite() && self.zoom_percent > 0.0 {
            self.zoom_percent / 100.0
        } else {
            1.0
        }
    }

    /// Map a point on the zoomed display back to logical canvas units.
    #[must_use]
    pub fn screen_to_canvas(&self, x: f32, y: f32) -> Point {
        let s = self.scale_factor();
        Point::new(x / s, y / s)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = ViewportConfig::default();
        vp.set_zoom(1000.0);
        assert_eq!(vp.zoom_percent, 400.0);
        vp.set_zoom(f32::NAN);
        assert_eq!(vp.zoom_percent, 100.0);
    }

    #[test]
    fn test_default_zoom_maps_one_to_one() {
        let vp = ViewportConfig::default();
        assert_eq!(vp.zoom_percent, 100.0);
        assert_eq!(vp.screen_to_canvas(1400.0, 50.0), Point::new(1400.0, 50.0));
    }

    #[test]
    fn test_screen_to_canvas() {
        let vp = ViewportConfig {
            zoom_percent: 50.0,
            ..ViewportConfig::default()
        };
        assert_eq!(vp.screen_to_canvas(100.0, 50.0), Point::new(200.0, 100.0));
    }
}
