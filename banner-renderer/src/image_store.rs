//! Image availability tracking.
//!
//! Scene images (background, logo, face) are plain string references. The
//! host loads them however it likes and reports the outcome here; frames
//! only ever draw images that are [`ImageState::Ready`]. Pending and
//! failed references render as if no image were set.

use std::collections::HashMap;

use crate::error::RenderResult;
use crate::image::{load_image_from_bytes, load_image_from_data_uri, to_png_data_uri, TextureData};

/// A decoded image ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// PNG data URI used as the `href` of frame images.
    pub data_uri: String,
}

/// Load state of one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    /// A load has started but not finished.
    Pending,
    /// Decoded and ready to draw.
    Ready(LoadedImage),
    /// Loading or decoding failed.
    Failed(String),
}

/// Image references and their load state.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    entries: HashMap<String, ImageState>,
    generation: u64,
}

impl ImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key` is loading.
    pub fn mark_pending(&mut self, key: impl Into<String>) {
        self.set(key.into(), ImageState::Pending);
    }

    /// Record that `key` failed to load.
    pub fn mark_failed(&mut self, key: impl Into<String>, reason: impl Into<String>) {
        let key = key.into();
        let reason = reason.into();
        tracing::warn!("Image {key} unavailable: {reason}");
        self.set(key, ImageState::Failed(reason));
    }

    /// Resolve `key` from already decoded pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixels cannot be encoded. The key is then
    /// marked failed.
    pub fn resolve_texture(
        &mut self,
        key: impl Into<String>,
        texture: &TextureData,
    ) -> RenderResult<(u32, u32)> {
        let key = key.into();
        match to_png_data_uri(texture) {
            Ok(data_uri) => {
                let size = (texture.width, texture.height);
                tracing::debug!("Image {key} ready at {}x{}", size.0, size.1);
                self.set(
                    key,
                    ImageState::Ready(LoadedImage {
                        width: texture.width,
                        height: texture.height,
                        data_uri,
                    }),
                );
                Ok(size)
            }
            Err(e) => {
                self.mark_failed(key, e.to_string());
                Err(e)
            }
        }
    }

    /// Resolve `key` from encoded image bytes (PNG, JPEG or WebP).
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails. The key is then marked failed.
    pub fn resolve_bytes(&mut self, key: impl Into<String>, bytes: &[u8]) -> RenderResult<(u32, u32)> {
        let key = key.into();
        match load_image_from_bytes(bytes) {
            Ok(texture) => self.resolve_texture(key, &texture),
            Err(e) => {
                self.mark_failed(key, e.to_string());
                Err(e)
            }
        }
    }

    /// Resolve `key` from a base64 data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI cannot be decoded. The key is then
    /// marked failed.
    pub fn resolve_data_uri(&mut self, key: impl Into<String>, uri: &str) -> RenderResult<(u32, u32)> {
        let key = key.into();
        match load_image_from_data_uri(uri) {
            Ok(texture) => self.resolve_texture(key, &texture),
            Err(e) => {
                self.mark_failed(key, e.to_string());
                Err(e)
            }
        }
    }

    /// State of `key`, if it was ever reported.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ImageState> {
        self.entries.get(key)
    }

    /// The decoded image for `key` if it is ready.
    #[must_use]
    pub fn ready(&self, key: &str) -> Option<&LoadedImage> {
        match self.entries.get(key) {
            Some(ImageState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    /// The decoded image for an optional scene reference.
    #[must_use]
    pub fn ready_ref(&self, key: Option<&str>) -> Option<&LoadedImage> {
        key.filter(|k| !k.is_empty()).and_then(|k| self.ready(k))
    }

    /// Forget `key`.
    pub fn remove(&mut self, key: &str) -> Option<ImageState> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.generation += 1;
        }
        removed
    }

    /// Counter bumped on every state change; a host re-renders when it
    /// differs from the value seen at the last frame.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of tracked references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no references are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, key: String, state: ImageState) {
        self.entries.insert(key, state);
        self.generation += 1;
    }
}
