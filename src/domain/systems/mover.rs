use crate::domain::state::Position;

/// Outcome of one frame of straight-line motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Still travelling; the new position is strictly closer to the target.
    Advanced(Position),
    /// Within one step of the target (or already on it); snapped exactly.
    Arrived(Position),
}

impl Step {
    pub fn position(self) -> Position {
        match self {
            Step::Advanced(p) | Step::Arrived(p) => p,
        }
    }
}

/// Advances `current` toward `target` by at most `speed`.
///
/// Motion is frame based: one call is one frame. Once the remaining distance
/// is within `speed`, the result snaps onto `target` so there is no overshoot.
pub fn step_toward(current: Position, target: Position, speed: f32) -> Step {
    let speed = speed.max(0.0);
    let dx = target.x - current.x;
    let dy = target.y - current.y;
    let distance = (dx * dx + dy * dy).sqrt();

    // Covers the zero-length case, so the division below never sees 0.
    if distance <= speed {
        return Step::Arrived(target);
    }

    Step::Advanced(Position::new(
        current.x + dx * speed / distance,
        current.y + dy * speed / distance,
    ))
}

pub fn move_toward(current: Position, target: Position, speed: f32) -> Position {
    step_toward(current, target, speed).position()
}
