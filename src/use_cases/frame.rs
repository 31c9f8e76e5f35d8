// Frame update loop: one deterministic step of the overlay per rendered frame.

use super::bridge::ThrowReceiver;
use super::types::{FrameReport, RenderState};
use crate::domain::systems::{depletion, projectile};
use crate::domain::tuning::pinata::PinataTuning;
use crate::domain::tuning::projectile::ProjectileTuning;
use crate::domain::{ImpactCue, Phase, PinataState};
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameConfig {
    pub pinata: PinataTuning,
    pub projectile: ProjectileTuning,
}

impl FrameConfig {
    fn launch(&self) -> projectile::LaunchConfig {
        projectile::LaunchConfig {
            screen_width: self.pinata.screen_width,
            screen_height: self.pinata.screen_height,
            margin: self.projectile.launch_margin,
        }
    }
}

/// Advances the overlay by exactly one frame.
///
/// Order matters:
/// 1. while active and nothing is flying, take at most one queued throw;
/// 2. while active, move the projectile and apply an impact;
/// 3. otherwise run the broken-pinata animations with the projectile parked.
///
/// The frame that breaks the pinata also closes the throw bridge.
///
/// The phase is read once at the top, so the frame that breaks the pinata
/// does not also start the falling animations.
pub fn update_frame<R, C>(
    state: &mut PinataState,
    throws: &mut ThrowReceiver,
    rng: &mut R,
    cue: &C,
    cfg: &FrameConfig,
) -> FrameReport
where
    R: Rng + ?Sized,
    C: ImpactCue + ?Sized,
{
    let mut report = FrameReport::default();

    match state.phase() {
        Phase::Active => {
            if !state.projectile.moving && throws.try_take().is_some() {
                let origin = projectile::launch_origin(rng, cfg.launch());
                report.launched = projectile::launch(&mut state.projectile, origin);
                debug!(x = origin.x, y = origin.y, life = state.life, "throw launched");
            }

            if projectile::advance(&mut state.projectile) {
                report.impact = true;
                state.register_impact();
                cue.play();
                debug!(life = state.life, "pinata hit");
                if state.phase() == Phase::Depleted {
                    // Terminal: throws arriving from now on are refused at the bridge.
                    throws.close();
                    info!("pinata broken");
                }
            }
        }
        Phase::Depleted => {
            projectile::park(&mut state.projectile);
            report.reward_dropped = depletion::tick_depletion(state, &cfg.pinata);
        }
    }

    report
}

pub fn render_state(state: &PinataState, tick: u64, cfg: &FrameConfig) -> RenderState {
    RenderState {
        tick,
        life: state.life,
        max_life: state.max_life,
        phase: state.phase(),
        reward_cycles: state.reward_cycles,
        life_bar_width: cfg.pinata.life_bar_width,
        life_bar_fill: state.life_bar_fill(cfg.pinata.life_bar_width),
        entities: state.entity_snapshots(),
    }
}
