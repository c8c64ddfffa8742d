//! Graphics cache interface consumed by entities.
//!
//! The core only selects sprite keys; decoding and caching image bytes
//! is the display layer's job. A lookup miss is a recoverable, silent
//! degradation: the entity keeps showing whatever it held before.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Opaque handle to a loaded image owned by the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u64);

/// Lookup interface the display layer provides.
pub trait GraphicsCache {
    /// Returns the image for a sprite key, optionally mirrored, or
    /// `None` if the key is not loaded.
    fn get(&self, gfx_id: &str, flip_x: bool) -> Option<ImageHandle>;
}

/// In-memory cache for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    images: AHashMap<(String, bool), ImageHandle>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image under a key.
    pub fn insert(&mut self, gfx_id: impl Into<String>, flip_x: bool, handle: ImageHandle) {
        self.images.insert((gfx_id.into(), flip_x), handle);
    }
}

impl GraphicsCache for MemoryCache {
    fn get(&self, gfx_id: &str, flip_x: bool) -> Option<ImageHandle> {
        self.images.get(&(gfx_id.to_owned(), flip_x)).copied()
    }
}

/// An entity's current sprite selection.
#[derive(Debug, Clone)]
pub struct Appearance {
    gfx_id: String,
    /// Mirror horizontally (facing right).
    pub flip_x: bool,
    handle: Option<ImageHandle>,
}

impl Appearance {
    /// Creates an appearance showing the given key.
    #[must_use]
    pub fn new(gfx_id: impl Into<String>) -> Self {
        Self {
            gfx_id: gfx_id.into(),
            flip_x: false,
            handle: None,
        }
    }

    /// Currently selected sprite key.
    #[must_use]
    pub fn gfx_id(&self) -> &str {
        &self.gfx_id
    }

    /// Selects a different sprite key.
    pub fn set_gfx_id(&mut self, gfx_id: impl Into<String>) {
        self.gfx_id = gfx_id.into();
    }

    /// Image handle from the most recent successful lookup.
    #[must_use]
    pub const fn handle(&self) -> Option<ImageHandle> {
        self.handle
    }

    /// Re-resolves the current key against the cache. On a miss the
    /// previously held handle is kept.
    pub fn refresh(&mut self, cache: &dyn GraphicsCache) {
        if let Some(handle) = cache.get(&self.gfx_id, self.flip_x) {
            self.handle = Some(handle);
        }
    }
}
