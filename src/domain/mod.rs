// Domain layer: core overlay types and animation rules.

pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use ports::ImpactCue;
pub use state::{
    Entity, EntitySnapshot, Phase, PinataState, Position, Projectile, Size, SpriteHandle,
    SpriteSet,
};
