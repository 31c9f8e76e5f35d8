// Asset catalog: loads overlay sprites and the impact sound once at startup.
//
// Sprites are required and a failure aborts startup. The sound is optional;
// without it the impact cue is silent.

use crate::domain::{SpriteHandle, SpriteSet};
use axum::body::Bytes;
use std::{collections::HashMap, fmt, io, path::Path};
use tracing::{info, warn};

pub const CANDY: &str = "candy.png";
pub const PINATA_FRONT: &str = "front.png";
pub const PINATA_BACK: &str = "back.png";
pub const PROJECTILE: &str = "projectile.png";
pub const IMPACT_SOUND: &str = "nya.wav";

const REQUIRED_SPRITES: [&str; 4] = [CANDY, PINATA_FRONT, PINATA_BACK, PROJECTILE];

#[derive(Debug)]
pub enum AssetError {
    Unreadable { name: &'static str, source: io::Error },
    Empty { name: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Unreadable { name, source } => {
                write!(f, "failed to load required asset {name}: {source}")
            }
            AssetError::Empty { name } => write!(f, "required asset {name} is empty"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Unreadable { source, .. } => Some(source),
            AssetError::Empty { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Asset {
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// In-memory assets served to the renderer, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: HashMap<&'static str, Asset>,
}

impl AssetCatalog {
    pub async fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut assets = HashMap::new();

        for name in REQUIRED_SPRITES {
            let bytes = tokio::fs::read(dir.join(name))
                .await
                .map_err(|source| AssetError::Unreadable { name, source })?;
            if bytes.is_empty() {
                return Err(AssetError::Empty { name });
            }
            assets.insert(name, asset(name, bytes));
        }

        match tokio::fs::read(dir.join(IMPACT_SOUND)).await {
            Ok(bytes) if !bytes.is_empty() => {
                assets.insert(IMPACT_SOUND, asset(IMPACT_SOUND, bytes));
            }
            Ok(_) => warn!(name = IMPACT_SOUND, "impact sound is empty; hits will be silent"),
            Err(error) => {
                warn!(name = IMPACT_SOUND, %error, "failed to load impact sound; hits will be silent")
            }
        }

        info!(dir = %dir.display(), count = assets.len(), "assets loaded");
        Ok(Self { assets })
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    pub fn sprites(&self) -> SpriteSet {
        SpriteSet {
            candy: SpriteHandle::new(asset_url(CANDY)),
            pinata_front: SpriteHandle::new(asset_url(PINATA_FRONT)),
            pinata_back: SpriteHandle::new(asset_url(PINATA_BACK)),
            projectile: SpriteHandle::new(asset_url(PROJECTILE)),
        }
    }

    /// URL of the impact sound, or `None` when it failed to load.
    pub fn impact_sound_url(&self) -> Option<String> {
        self.assets
            .contains_key(IMPACT_SOUND)
            .then(|| asset_url(IMPACT_SOUND))
    }
}

pub fn asset_url(name: &str) -> String {
    format!("/assets/{name}")
}

fn asset(name: &str, bytes: Vec<u8>) -> Asset {
    let content_type = match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("wav") => "audio/wav",
        _ => "application/octet-stream",
    };
    Asset {
        content_type,
        bytes: Bytes::from(bytes),
    }
}
