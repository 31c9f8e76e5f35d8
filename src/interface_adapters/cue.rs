// Impact cue adapter: forwards hits to connected renderers, which play the sound.

use crate::domain::ImpactCue;
use crate::use_cases::CueEvent;
use tokio::sync::broadcast;

/// Broadcasts an impact cue to every connected renderer.
///
/// Sending never blocks; with no renderer connected the cue is simply lost.
#[derive(Debug, Clone)]
pub struct BroadcastCue {
    tx: broadcast::Sender<CueEvent>,
}

impl BroadcastCue {
    pub fn new(tx: broadcast::Sender<CueEvent>) -> Self {
        Self { tx }
    }
}

impl ImpactCue for BroadcastCue {
    fn play(&self) {
        let _ = self.tx.send(CueEvent::Impact);
    }
}
