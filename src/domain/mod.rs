//! Domain collaborators around the cache: the occupant capability, the
//! texture provider, and the reference sprite layer.

pub mod occupant;
pub mod sprite;
pub mod textures;

pub use occupant::{Occupant, OccupantRef};
pub use sprite::{Sprite, SpriteId, SpriteRegistry};
pub use textures::{TextureProvider, TextureRegistry};
