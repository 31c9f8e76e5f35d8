// Ports the domain calls out through; adapters provide the implementations.

/// Fire-and-forget audio signal for a projectile hit.
///
/// Implementations must not block and must swallow their own failures so a
/// missing or broken sound never affects the simulation.
pub trait ImpactCue: Send + Sync {
    fn play(&self);
}

/// Cue used when no impact sound could be loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl ImpactCue for SilentCue {
    fn play(&self) {}
}
