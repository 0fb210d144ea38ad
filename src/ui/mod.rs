//! UI module - Hosts that drive an interaction session
//!
//! - **headless**: Synthetic-clock host over the in-memory scene, used by the
//!   command-line binary and the integration tests

pub mod headless;

// Re-export commonly used items
pub use headless::{parse_coordinate_move, HeadlessHost, FRAME};
