// Network adapter modules split by renderer sockets vs static asset routes.

pub mod assets;
pub mod client;

pub use assets::asset_handler;
pub use client::{render_update_serializer, ws_handler};
