//! Board sizing
//!
//! Normally the board fills the width of its container. In fullscreen it takes
//! 98% of the shorter window edge.

/// Host dimensions the board is fitted into
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Left edge of the board in surface pixels
    pub left: f32,
    /// Top edge of the board in surface pixels
    pub top: f32,
    /// Width available to the board outside fullscreen
    pub container_width: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Layout {
    pub fn new(container_width: f32, window_width: f32, window_height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            container_width,
            window_width,
            window_height,
        }
    }

    pub fn with_origin(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }
}

/// Square size that fits the container, `None` for an empty container
pub fn fitted_square_size(container_width: f32) -> Option<u32> {
    let max_width = container_width.floor();
    (max_width > 0.0).then(|| (max_width / 8.0).floor() as u32)
}

/// Square size while fullscreen
pub fn fullscreen_square_size(window_width: f32, window_height: f32) -> u32 {
    (window_width.min(window_height) * 0.98 / 8.0).floor().max(0.0) as u32
}
