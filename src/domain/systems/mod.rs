pub mod depletion;
pub mod mover;
pub mod projectile;
