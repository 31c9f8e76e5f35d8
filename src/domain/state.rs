// Domain-level overlay entities, the owned aggregate, and snapshot types.

use crate::domain::tuning::pinata::PinataTuning;
use crate::domain::tuning::projectile::ProjectileTuning;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Opaque reference to a sprite owned by the renderer (an asset URL path).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteHandle(Arc<str>);

impl SpriteHandle {
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sprite handles for every entity, resolved once at startup.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub candy: SpriteHandle,
    pub pinata_front: SpriteHandle,
    pub pinata_back: SpriteHandle,
    pub projectile: SpriteHandle,
}

pub struct Entity {
    pub name: &'static str,
    pub position: Position,
    // Carried for the renderer; no motion rule changes it yet.
    pub rotation: f32,
    pub size: Size,
    pub sprite: SpriteHandle,
}

impl Entity {
    pub fn new(name: &'static str, position: Position, size: Size, sprite: SpriteHandle) -> Self {
        Self {
            name,
            position,
            rotation: 0.0,
            size,
            sprite,
        }
    }
}

pub struct Projectile {
    pub body: Entity,

    // Flight-only state (ignored while parked).
    pub speed: f32,    // px per frame
    pub target: Position,
    pub moving: bool,

    // Off-screen parking spot while not in flight.
    pub rest: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Depleted,
}

/// The whole mutable overlay world, owned by the frame loop.
pub struct PinataState {
    pub life: u32,
    pub max_life: u32,

    pub candy: Entity,
    pub pinata_front: Entity,
    pub pinata_back: Entity,
    pub projectile: Projectile,

    // Completed candy drops since depletion.
    pub reward_cycles: u32,
}

impl PinataState {
    pub fn new(pinata: &PinataTuning, projectile: &ProjectileTuning, sprites: &SpriteSet) -> Self {
        let center = Position::new(pinata.screen_width / 2.0, pinata.screen_height / 2.0);

        Self {
            life: pinata.max_life,
            max_life: pinata.max_life,
            candy: Entity::new("candy", center, pinata.candy_size, sprites.candy.clone()),
            pinata_front: Entity::new(
                "pinata_front",
                center,
                pinata.pinata_size,
                sprites.pinata_front.clone(),
            ),
            pinata_back: Entity::new(
                "pinata_back",
                center,
                pinata.pinata_size,
                sprites.pinata_back.clone(),
            ),
            projectile: Projectile {
                body: Entity::new(
                    "projectile",
                    projectile.rest,
                    projectile.size,
                    sprites.projectile.clone(),
                ),
                speed: projectile.speed,
                target: center,
                moving: false,
                rest: projectile.rest,
            },
            reward_cycles: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.life > 0 {
            Phase::Active
        } else {
            Phase::Depleted
        }
    }

    /// Records one projectile hit; life never drops below zero.
    pub fn register_impact(&mut self) {
        self.life = self.life.saturating_sub(1);
    }

    /// Filled width of a life bar `bar_width` wide.
    pub fn life_bar_fill(&self, bar_width: f32) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        (bar_width * self.life as f32 / self.max_life as f32).max(0.0)
    }

    /// Snapshots in draw order (back to front).
    pub fn entity_snapshots(&self) -> Vec<EntitySnapshot> {
        [
            &self.candy,
            &self.pinata_front,
            &self.pinata_back,
            &self.projectile.body,
        ]
        .into_iter()
        .map(EntitySnapshot::from)
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EntitySnapshot {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub rot: f32,
    pub width: f32,
    pub height: f32,
    pub sprite: SpriteHandle,
}

impl From<&Entity> for EntitySnapshot {
    fn from(e: &Entity) -> Self {
        Self {
            name: e.name,
            x: e.position.x,
            y: e.position.y,
            rot: e.rotation,
            width: e.size.width,
            height: e.size.height,
            sprite: e.sprite.clone(),
        }
    }
}
