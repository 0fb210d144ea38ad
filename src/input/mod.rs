//! Input module - Pointer geometry and gesture recognition
//!
//! Turns raw pointer coordinates into board squares and classifies pointer
//! sequences as taps or drags. Nothing here touches the game; the
//! [`crate::game::session::InteractionSession`] decides what a tap or a drop
//! means.
//!
//! # Architecture
//!
//! - `geometry` - Pixel ↔ square mapping, rebuilt on every layout change
//! - `pointer` - The tap/drag finite-state machine with frame coalescing

pub mod geometry;
pub mod pointer;

// Re-export commonly used items
pub use geometry::{BoardGeometry, Point};
pub use pointer::*;
