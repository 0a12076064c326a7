//! Core primitives: coordinate arithmetic, pixel surfaces, errors.

pub mod bitmap;
pub mod coords;
pub mod error;

pub use bitmap::{rgba, Bitmap};
pub use coords::{ChunkCoord, PixelPos, PixelRect, TileCoord};
pub use error::WorldError;
