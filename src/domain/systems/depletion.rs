use crate::domain::state::{PinataState, Position};
use crate::domain::systems::mover::move_toward;
use crate::domain::tuning::pinata::PinataTuning;
use tracing::debug;

/// Runs one frame of the broken-pinata animations.
///
/// The back half falls to a fixed spot below the screen and stays there. The
/// candy falls, and is lifted back to its resting height until the reward
/// cycle bound is reached; after that it stays at the drop point.
/// Returns true on a frame where a reward cycle completed.
pub fn tick_depletion(state: &mut PinataState, cfg: &PinataTuning) -> bool {
    let back_target = Position::new(
        3.0 * (cfg.screen_width / 4.0),
        cfg.screen_height + state.pinata_back.size.height,
    );
    state.pinata_back.position =
        move_toward(state.pinata_back.position, back_target, cfg.back_fall_speed);

    let drop_y = cfg.screen_height + cfg.candy_drop_margin;
    let candy_target = Position::new(cfg.screen_width / 2.0, drop_y);
    state.candy.position = move_toward(state.candy.position, candy_target, cfg.candy_fall_speed);

    if state.candy.position.y >= drop_y && state.reward_cycles < cfg.max_reward_cycles {
        state.candy.position.y = cfg.screen_height / 2.0;
        state.reward_cycles += 1;
        debug!(cycles = state.reward_cycles, "candy dropped");
        return true;
    }

    false
}
