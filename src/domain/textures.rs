//! Texture provider collaborator.
//!
//! The cache copies tile backgrounds out of bitmaps owned here; a bitmap
//! returned for a name must stay stable for the registry's lifetime, so
//! every texture sits behind an `Rc` and registration never mutates a
//! bitmap in place — replacing a name swaps the handle.

use std::collections::HashMap;
use std::rc::Rc;

use crate::core::bitmap::Bitmap;
use crate::core::error::WorldError;

/// Texture lookup seam between the cache and the asset-owning collaborator
pub trait TextureProvider {
    /// Stable bitmap for a registered name; fails on unknown names
    fn get_texture(&self, name: &str) -> Result<Rc<Bitmap>, WorldError>;
}

/// Name-keyed texture store
#[derive(Default)]
pub struct TextureRegistry {
    textures: HashMap<String, Rc<Bitmap>>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bitmap under a name. Re-registering a name replaces the
    /// handle; bitmaps already captured by tiles keep the old pixels.
    pub fn register(&mut self, name: impl Into<String>, bitmap: Bitmap) -> Rc<Bitmap> {
        let name = name.into();
        let handle = Rc::new(bitmap);
        log::debug!("texture registered: {} ({}x{})", name, handle.width(), handle.height());
        self.textures.insert(name, Rc::clone(&handle));
        handle
    }

    /// Register from a raw RGBA byte buffer (the wasm upload path).
    /// The buffer is `width * height * 4` bytes, RGBA order.
    pub fn register_rgba(
        &mut self,
        name: impl Into<String>,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<Rc<Bitmap>, WorldError> {
        let expected = (width * height) as usize * 4;
        if data.len() != expected {
            return Err(WorldError::BitmapSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            .collect();
        let bitmap = Bitmap::from_pixels(width, height, pixels)?;
        Ok(self.register(name, bitmap))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureProvider for TextureRegistry {
    fn get_texture(&self, name: &str) -> Result<Rc<Bitmap>, WorldError> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| WorldError::UnknownTexture(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bitmap::rgba;

    #[test]
    fn lookup_of_unregistered_name_fails() {
        let registry = TextureRegistry::new();
        assert_eq!(
            registry.get_texture("grass-tile"),
            Err(WorldError::UnknownTexture("grass-tile".into()))
        );
    }

    #[test]
    fn register_rgba_decodes_byte_order() {
        let mut registry = TextureRegistry::new();
        let bytes = [10u8, 20, 30, 40];
        let tex = registry.register_rgba("dot", 1, 1, &bytes).unwrap();
        assert_eq!(tex.pixel(0, 0), Some(rgba(10, 20, 30, 40)));
    }

    #[test]
    fn register_rgba_rejects_short_buffers() {
        let mut registry = TextureRegistry::new();
        let err = registry.register_rgba("dot", 2, 2, &[0u8; 15]).unwrap_err();
        assert!(matches!(err, WorldError::BitmapSizeMismatch { expected: 16, actual: 15 }));
    }

    #[test]
    fn reregistering_swaps_the_handle_without_mutating_old_pixels() {
        let mut registry = TextureRegistry::new();
        let old = registry.register("bg", Bitmap::solid(1, 1, 1));
        registry.register("bg", Bitmap::solid(1, 1, 2));
        assert_eq!(old.pixel(0, 0), Some(1));
        assert_eq!(registry.get_texture("bg").unwrap().pixel(0, 0), Some(2));
    }
}
