// Gameplay tuning, kept apart from runtime configuration (ports, tick rate, capacities).

pub mod pinata;
pub mod projectile;
