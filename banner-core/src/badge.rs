//! Decorative badges: a fixed icon inside a white disc.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Radius of the drawn badge disc.
pub const BADGE_RADIUS: f32 = 24.0;

/// Pointer hit radius around a badge centre.
pub const BADGE_HIT_RADIUS: f32 = 30.0;

/// Unique identifier for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeId(Uuid);

impl BadgeId {
    /// Create a new unique badge ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BadgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The eight badge icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    /// Verified tick.
    Verified,
    /// Trophy.
    Award,
    /// Star.
    Star,
    /// Lightning bolt.
    Zap,
    /// Thumbs up.
    #[serde(rename = "thumbsup")]
    ThumbsUp,
    /// Heart.
    Heart,
    /// Globe.
    Global,
    /// Briefcase.
    Pro,
}

impl BadgeKind {
    /// All badge kinds in palette order.
    pub const ALL: [Self; 8] = [
        Self::Verified,
        Self::Award,
        Self::Star,
        Self::Zap,
        Self::ThumbsUp,
        Self::Heart,
        Self::Global,
        Self::Pro,
    ];

    /// Glyph drawn in the centre of the badge.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Verified => "\u{2713}",
            Self::Award => "\u{1F3C6}",
            Self::Star => "\u{2605}",
            Self::Zap => "\u{26A1}",
            Self::ThumbsUp => "\u{1F44D}",
            Self::Heart => "\u{2764}",
            Self::Global => "\u{1F30E}",
            Self::Pro => "\u{1F4BC}",
        }
    }
}

/// A positioned badge. The position is the disc centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    /// Unique identifier.
    pub id: BadgeId,
    /// Icon kind.
    #[serde(rename = "type")]
    pub kind: BadgeKind,
    /// Centre X.
    pub x: f32,
    /// Centre Y.
    pub y: f32,
}

impl Badge {
    /// Create a badge at the given centre.
    #[must_use]
    pub fn new(kind: BadgeKind, x: f32, y: f32) -> Self {
        Self {
            id: BadgeId::new(),
            kind,
            x,
            y,
        }
    }

    /// Create a badge in the top-right drop zone.
    ///
    /// `jitter` components are expected in `[0, 1)` and spread new badges
    /// over a 50x50 area so they do not stack exactly.
    #[must_use]
    pub fn placed(kind: BadgeKind, jitter: (f32, f32)) -> Self {
        let jx = jitter.0.clamp(0.0, 1.0);
        let jy = jitter.1.clamp(0.0, 1.0);
        Self::new(kind, 1400.0 - jx * 50.0, 50.0 + jy * 50.0)
    }
}
