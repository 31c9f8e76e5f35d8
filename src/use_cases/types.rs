// Use-case level inputs/outputs for the frame loop.

use crate::domain::{EntitySnapshot, Phase};

/// One requested throw. Carries nothing; only its arrival matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowSignal;

/// What happened during a single frame update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub launched: bool,
    pub impact: bool,
    pub reward_dropped: bool,
}

/// Read-only per-frame view handed to the renderer.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub tick: u64,
    pub life: u32,
    pub max_life: u32,
    pub phase: Phase,
    pub reward_cycles: u32,
    pub life_bar_width: f32,
    pub life_bar_fill: f32,
    pub entities: Vec<EntitySnapshot>,
}

/// Side-channel events for the renderer that are not part of the frame snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueEvent {
    Impact,
}
