//! Rendering module - Surface contract, animation and reconciliation
//!
//! Everything the player sees goes through a [`BoardSurface`]. The session
//! never draws directly: it asks the animation sequencer to move ghosts and
//! the reconciler to repaint from the oracle once an animation ends.
//!
//! # Architecture
//!
//! - `surface` - The [`BoardSurface`] trait and its value types
//! - `scene` - In-memory surface used by tests and the command-line host
//! - `animation` - Snap-back and slide animations with capture fades
//! - `reconciler` - Full repaint, move table and status line
//! - `glyphs` - Text glyph for each piece style
//! - `board_theme` - Light/dark palettes
//! - `layout` - Square size for normal and fullscreen display

pub mod animation;
pub mod board_theme;
pub mod glyphs;
pub mod layout;
pub mod reconciler;
pub mod scene;
pub mod surface;

// Re-export commonly used items
pub use animation::{AnimationEnd, AnimationSequencer};
pub use board_theme::{palette, Palette};
pub use glyphs::glyph;
pub use layout::Layout;
pub use scene::Scene;
pub use surface::{BoardSurface, GhostId, Mark, MoveRow, PromotionChoice, SurfaceError};
