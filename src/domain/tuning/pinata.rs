use crate::domain::state::Size;

/// Gameplay tuning for the pinata, its reward drops, and the visible area.
#[derive(Debug, Clone, Copy)]
pub struct PinataTuning {
    /// Visible area in pixels.
    pub screen_width: f32,
    pub screen_height: f32,

    /// Hits needed to break the pinata.
    pub max_life: u32,

    /// Size of both pinata halves.
    pub pinata_size: Size,

    /// Per-frame speed of the back half falling away once broken.
    pub back_fall_speed: f32,

    pub candy_size: Size,

    /// Per-frame speed of a falling candy.
    pub candy_fall_speed: f32,

    /// How far below the bottom edge a candy falls before it counts as dropped.
    pub candy_drop_margin: f32,

    /// Number of candy drops replayed after the pinata breaks.
    pub max_reward_cycles: u32,

    /// Full width of the life bar overlay.
    pub life_bar_width: f32,
}

impl Default for PinataTuning {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            max_life: 100,
            pinata_size: Size::new(720.0, 720.0),
            back_fall_speed: 15.0,
            candy_size: Size::new(100.0, 100.0),
            candy_fall_speed: 10.0,
            candy_drop_margin: 50.0,
            max_reward_cycles: 5,
            life_bar_width: 500.0,
        }
    }
}
