//! Tilescape Engine - chunked tile-world render cache
//!
//! A scrolling 2D tile world redrawn without recomposing unchanged
//! regions. Two-level spatial cache: the world index routes occupants to
//! 128x128 chunks, chunks route to 16x16 tiles, and dirty flags flow the
//! other way so only mutated bitmaps regenerate.
//!
//! - core/     - coordinates, pixel surfaces, errors
//! - domain/   - occupant capability, textures, sprites
//! - spatial/  - the tile/chunk/world cache itself
//! - engine/   - orchestration and the wasm facade

pub mod core;
pub mod domain;
pub mod engine;
pub mod spatial;

pub use crate::core::bitmap::{rgba, Bitmap};
pub use crate::core::coords::PixelRect;
pub use crate::core::error::WorldError;
pub use crate::domain::occupant::{Occupant, OccupantRef};
pub use crate::domain::sprite::{Sprite, SpriteId, SpriteRegistry};
pub use crate::domain::textures::{TextureProvider, TextureRegistry};
pub use crate::engine::{Engine, EngineCore, WorldLayout};
pub use crate::spatial::{Chunk, Tile, WorldIndex};

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"tilescape engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
