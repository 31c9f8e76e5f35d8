// Use cases layer: application workflows for the overlay.

pub mod bridge;
pub mod frame;
pub mod overlay;
pub mod types;

pub use bridge::{Enqueue, ThrowReceiver, ThrowSender, command_bridge};
pub use frame::{FrameConfig, render_state, update_frame};
pub use overlay::overlay_task;
pub use types::{CueEvent, FrameReport, RenderState, ThrowSignal};
