//! JS-facing facade. Thin wrapper over `EngineCore`: ids and numbers in,
//! stringified errors out, framebuffer exposed zero-copy.

use wasm_bindgen::prelude::*;

use crate::core::bitmap::rgba;
use crate::core::error::WorldError;

use super::EngineCore;

#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine presenting into a `width` x `height` framebuffer
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: EngineCore::new(width, height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.core.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.core.height()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    #[wasm_bindgen(getter)]
    pub fn sprite_count(&self) -> usize {
        self.core.sprite_count()
    }

    #[wasm_bindgen(getter)]
    pub fn chunk_count(&self) -> usize {
        self.core.chunk_count()
    }

    /// Register a texture from an RGBA byte buffer (`width * height * 4`)
    pub fn register_texture(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<(), JsValue> {
        self.core
            .register_texture_rgba(name, width, height, data)
            .map_err(into_js)
    }

    /// Load a JSON world layout: `{"background": ..., "chunks": [[x,y],...]}`
    pub fn load_layout_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_layout_json(json).map_err(|e| JsValue::from_str(&e))
    }

    pub fn create_chunk(&mut self, cx: i32, cy: i32, background: &str) -> Result<(), JsValue> {
        self.core.create_chunk((cx, cy), background).map_err(into_js)
    }

    /// Spawn a sprite; more than one texture name makes it animated.
    /// Returns the sprite id.
    pub fn spawn_sprite(
        &mut self,
        x: i32,
        y: i32,
        texture_names: Vec<String>,
    ) -> Result<u32, JsValue> {
        self.core.spawn_sprite((x, y), &texture_names).map_err(into_js)
    }

    pub fn move_sprite_to(&mut self, id: u32, x: i32, y: i32) -> Result<(), JsValue> {
        self.core.move_sprite_to(id, (x, y)).map_err(into_js)
    }

    pub fn move_sprite_by(&mut self, id: u32, dx: i32, dy: i32) -> Result<(), JsValue> {
        self.core.move_sprite_by(id, (dx, dy)).map_err(into_js)
    }

    pub fn set_sprite_textures(
        &mut self,
        id: u32,
        texture_names: Vec<String>,
    ) -> Result<(), JsValue> {
        self.core.set_sprite_textures(id, &texture_names).map_err(into_js)
    }

    pub fn despawn_sprite(&mut self, id: u32) -> Result<(), JsValue> {
        self.core.despawn_sprite(id).map_err(into_js)
    }

    pub fn set_clear_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.core.set_clear_color(rgba(r, g, b, a));
    }

    /// Between-frames tick: advance sprite animations
    pub fn update(&mut self) -> Result<(), JsValue> {
        self.core.update().map_err(into_js)
    }

    /// Per-frame draw pass at a pixel offset
    pub fn draw(&mut self, offset_x: i32, offset_y: i32) {
        self.core.draw((offset_x, offset_y));
    }

    /// Pointer to the framebuffer pixels (for zero-copy `ImageData`)
    pub fn framebuffer_ptr(&self) -> *const u32 {
        self.core.framebuffer().as_ptr()
    }

    /// Framebuffer length in `u32` pixels
    pub fn framebuffer_len(&self) -> usize {
        self.core.framebuffer().len()
    }

    /// View of the framebuffer in wasm memory. Valid until the next
    /// engine call or wasm memory growth; copy it out before yielding.
    pub fn framebuffer_view(&self) -> js_sys::Uint32Array {
        unsafe { js_sys::Uint32Array::view(self.core.framebuffer().pixels()) }
    }
}

fn into_js(err: WorldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
