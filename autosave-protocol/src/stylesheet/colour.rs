use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Colour {
    RGBA(f32, f32, f32, f32), // Each component is in the range [0.0, 1.0]
}

impl Colour {
    pub const GREEN: Colour = Colour::RGBA(0.24, 0.46, 0.24, 1.0);
    pub const RED: Colour = Colour::RGBA(0.66, 0.27, 0.26, 1.0);
}
