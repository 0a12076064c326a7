//! The hierarchical render cache: world -> chunks -> tiles.
//!
//! Rendering data flows strictly upward (Tile -> Chunk -> WorldIndex ->
//! canvas), placement commands strictly downward (WorldIndex -> Chunk ->
//! Tile). Dirty state is set by the parent while delegating, so no layer
//! holds a back-reference to its owner.

pub mod chunk;
pub mod tile;
pub mod world;

pub use chunk::Chunk;
pub use tile::Tile;
pub use world::WorldIndex;
