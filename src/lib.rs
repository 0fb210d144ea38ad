//! Interactive chessboard with standard, atomic and Chess960 rules
//!
//! Pointer input is turned into moves by an [`game::InteractionSession`],
//! checked by a [`game::RulesOracle`] and drawn on a
//! [`rendering::BoardSurface`] with drag, snap-back and slide animations.

pub mod core;
pub mod game;
pub mod input;
pub mod rendering;
pub mod ui;
