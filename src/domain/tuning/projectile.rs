use crate::domain::state::{Position, Size};

/// Gameplay tuning for the thrown projectile.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Distance covered per frame in pixels.
    pub speed: f32,

    /// Rendered size in pixels.
    pub size: Size,

    /// Off-screen parking spot while no throw is in flight.
    pub rest: Position,

    /// How far outside the left/right screen edge a throw starts.
    pub launch_margin: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 20.0,
            size: Size::new(100.0, 100.0),
            rest: Position::new(-50.0, -50.0),
            launch_margin: 50.0,
        }
    }
}
