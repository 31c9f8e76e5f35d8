use super::bridge::ThrowReceiver;
use super::frame::{FrameConfig, render_state, update_frame};
use super::types::RenderState;
use crate::domain::{ImpactCue, PinataState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Drives the overlay at a fixed frame rate and publishes a snapshot per frame.
///
/// Owns the overlay state outright; the throw queue is the only thing shared
/// with other tasks.
pub async fn overlay_task(
    mut state: PinataState,
    mut throws: ThrowReceiver,
    render_tx: broadcast::Sender<RenderState>,
    cue: Arc<dyn ImpactCue>,
    cfg: FrameConfig,
    tick_interval: Duration,
) {
    let mut rng = StdRng::from_entropy();
    let mut tick: u64 = 0;

    // A late frame is skipped rather than replayed in a burst.
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        life = state.life,
        tick_ms = tick_interval.as_millis() as u64,
        "overlay loop started"
    );

    loop {
        interval.tick().await;

        let report = update_frame(&mut state, &mut throws, &mut rng, cue.as_ref(), &cfg);
        if report.reward_dropped {
            debug!(cycles = state.reward_cycles, "reward cycle completed");
        }

        tick += 1;
        // No subscribers is fine; the renderer may not be connected yet.
        let _ = render_tx.send(render_state(&state, tick, &cfg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Phase;
    use crate::domain::ports::SilentCue;
    use crate::domain::state::test_support::test_state;
    use crate::use_cases::bridge::command_bridge;
    use tokio::time::timeout;

    #[tokio::test]
    async fn when_throw_is_queued_then_published_life_drops() {
        let (tx, rx) = command_bridge(100);
        let (render_tx, mut render_rx) = broadcast::channel(1024);

        let handle = tokio::spawn(overlay_task(
            test_state(),
            rx,
            render_tx,
            Arc::new(SilentCue),
            FrameConfig::default(),
            Duration::from_millis(1),
        ));
        tx.try_throw();

        let hit = timeout(Duration::from_secs(5), async {
            loop {
                match render_rx.recv().await {
                    Ok(render) if render.life == 99 => return render,
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => panic!("render channel closed"),
                }
            }
        })
        .await
        .expect("life should drop after a throw");

        assert_eq!(hit.phase, Phase::Active);
        assert!(hit.tick > 1);
        handle.abort();
    }
}
