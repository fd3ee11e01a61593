//! Input events for canvas interaction.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved (with or without a button held).
    Move,
    /// Button released.
    Up,
    /// Pointer left the canvas; ends any drag like a release.
    Leave,
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

impl KeyModifiers {
    /// Only shift held.
    #[must_use]
    pub const fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }
}

/// A pointer event in display coordinates (zoomed surface pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X coordinate on the displayed surface.
    pub x: f32,
    /// Y coordinate on the displayed surface.
    pub y: f32,
    /// Active modifier keys.
    #[serde(default)]
    pub modifiers: KeyModifiers,
}

impl PointerEvent {
    /// Create a pointer event without modifiers.
    #[must_use]
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            x,
            y,
            modifiers: KeyModifiers::default(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    /// Key name (`Delete`, `Backspace`, `a`...).
    pub key: String,
    /// Active modifier keys.
    #[serde(default)]
    pub modifiers: KeyModifiers,
    /// Whether keyboard focus is inside a text-entry control.
    #[serde(default)]
    pub text_input_focused: bool,
}

impl KeyEvent {
    /// A key press outside any text field.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: KeyModifiers::default(),
            text_input_focused: false,
        }
    }

    /// Mark the press as happening inside a text field.
    #[must_use]
    pub fn in_text_input(mut self) -> Self {
        self.text_input_focused = true;
        self
    }

    /// Whether this is Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.key.as_str(), "Delete" | "Backspace")
    }
}

/// All input events the canvas can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Pointer (mouse/pen/touch) event.
    Pointer(PointerEvent),

    /// Keyboard event.
    Key(KeyEvent),
}
