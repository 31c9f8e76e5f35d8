// Interface adapters: chat input, renderer output, and asset loading.

pub mod assets;
pub mod chat;
pub mod cue;
pub mod http;
pub mod net;
pub mod protocol;
pub mod state;
pub mod utils;
