// Wire protocol DTOs and conversions for messages sent to overlay renderers.

use crate::domain::{EntitySnapshot, Phase};
use crate::use_cases::{CueEvent, RenderState};
use serde::Serialize;

/// Messages the overlay sends to connected renderers over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Static layout, sent once when a renderer connects.
    Layout(LayoutDto),
    // Snapshot of the overlay for a given frame.
    RenderUpdate(RenderUpdateDto),
    // One-shot sound cue.
    Cue(CueDto),
}

/// Fixed overlay dimensions and asset references.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDto {
    pub screen_width: f32,
    pub screen_height: f32,
    pub max_life: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_sound: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderUpdateDto {
    pub tick: u64,
    pub life: u32,
    pub max_life: u32,
    pub phase: PhaseDto,
    pub reward_cycles: u32,
    pub life_bar: LifeBarDto,
    // Draw order, back to front.
    pub entities: Vec<EntityStateDto>,
}

impl From<RenderState> for RenderUpdateDto {
    fn from(render: RenderState) -> Self {
        Self {
            tick: render.tick,
            life: render.life,
            max_life: render.max_life,
            phase: render.phase.into(),
            reward_cycles: render.reward_cycles,
            life_bar: LifeBarDto {
                width: render.life_bar_width,
                fill: render.life_bar_fill,
            },
            entities: render.entities.iter().map(EntityStateDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LifeBarDto {
    pub width: f32,
    pub fill: f32,
}

/// Flattened entity state for wire transmission in render updates.
#[derive(Debug, Clone, Serialize)]
pub struct EntityStateDto {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub rot: f32,
    pub width: f32,
    pub height: f32,
    pub sprite: String,
}

impl From<&EntitySnapshot> for EntityStateDto {
    fn from(entity: &EntitySnapshot) -> Self {
        Self {
            name: entity.name,
            x: entity.x,
            y: entity.y,
            rot: entity.rot,
            width: entity.width,
            height: entity.height,
            sprite: entity.sprite.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum PhaseDto {
    Active,
    Depleted,
}

impl From<Phase> for PhaseDto {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Active => PhaseDto::Active,
            Phase::Depleted => PhaseDto::Depleted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CueDto {
    pub name: &'static str,
}

impl From<CueEvent> for CueDto {
    fn from(event: CueEvent) -> Self {
        match event {
            CueEvent::Impact => CueDto { name: "impact" },
        }
    }
}
