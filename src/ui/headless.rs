//! Headless host
//!
//! Drives an [`InteractionSession`] over a [`Scene`] the way a browser would:
//! pointer events at square centers, a click after every release, a frame
//! clock ticking in [`FRAME`] steps and an event-loop turn after each gesture.
//! Moves can be replayed from coordinate text (`e2e4`, `e7e8n`).

use std::time::Duration;

use tracing::debug;

use crate::core::settings_persistence::{KeyValueStorage, MemoryStorage};
use crate::game::engine::ShakmatyOracle;
use crate::game::error::{GameError, GameResult};
use crate::game::mode::Mode;
use crate::game::oracle::RulesOracle;
use crate::game::session::InteractionSession;
use crate::game::types::{PieceKind, Square};
use crate::input::geometry::Point;
use crate::rendering::layout::Layout;
use crate::rendering::scene::Scene;

/// Length of one synthetic animation frame
pub const FRAME: Duration = Duration::from_millis(16);

/// Frames after which [`HeadlessHost::settle`] gives up
const MAX_SETTLE_FRAMES: usize = 120;

/// Parse `e2e4` or `e7e8q` into squares and an optional promotion piece
pub fn parse_coordinate_move(text: &str) -> GameResult<(Square, Square, Option<PieceKind>)> {
    let invalid = || GameError::InvalidMoveText {
        input: text.to_string(),
    };
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }
    let from = Square::from_algebraic(&text[0..2]).ok_or_else(invalid)?;
    let to = Square::from_algebraic(&text[2..4]).ok_or_else(invalid)?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => Some(
            PieceKind::from_letter(c)
                .filter(|kind| PieceKind::PROMOTION_CHOICES.contains(kind))
                .ok_or_else(invalid)?,
        ),
    };
    Ok((from, to, promotion))
}

/// Session plus a synthetic clock over the in-memory scene
pub struct HeadlessHost {
    session: InteractionSession<ShakmatyOracle, Scene>,
    elapsed: Duration,
}

impl HeadlessHost {
    /// Host with in-memory preferences and a 64px board
    pub fn new(mode: Mode) -> Self {
        Self::with_storage(mode, Box::new(MemoryStorage::new()))
    }

    pub fn with_storage(mode: Mode, storage: Box<dyn KeyValueStorage>) -> Self {
        Self::from_session(InteractionSession::new(
            ShakmatyOracle::new(),
            Scene::new(),
            storage,
            mode,
        ))
    }

    /// Host whose Chess960 positions come from a fixed seed
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Self::from_session(InteractionSession::with_seed(
            ShakmatyOracle::new(),
            Scene::new(),
            Box::new(MemoryStorage::new()),
            mode,
            seed,
        ))
    }

    /// Wrap an existing session and give it the default layout
    pub fn from_session(mut session: InteractionSession<ShakmatyOracle, Scene>) -> Self {
        session.resize(Layout::new(512.0, 1024.0, 768.0));
        Self {
            session,
            elapsed: Duration::ZERO,
        }
    }

    pub fn session(&self) -> &InteractionSession<ShakmatyOracle, Scene> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut InteractionSession<ShakmatyOracle, Scene> {
        &mut self.session
    }

    pub fn scene(&self) -> &Scene {
        self.session.surface()
    }

    pub fn oracle(&self) -> &ShakmatyOracle {
        self.session.oracle()
    }

    /// Synthetic time elapsed in frames
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Pixel center of a square
    pub fn center(&self, square: Square) -> Point {
        self.session.geometry().center_of(square)
    }

    /// Run one animation frame
    pub fn frame(&mut self) {
        self.elapsed += FRAME;
        self.session.animation_frame(FRAME);
    }

    /// Run frames until no animation is in flight
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.session.is_animating() {
                return;
            }
            self.frame();
        }
    }

    /// Press, release and click on a square without moving
    pub fn tap(&mut self, square: Square) {
        let at = self.center(square);
        self.session.pointer_down(at);
        self.session.pointer_up(at);
        self.session.click(at);
        self.session.next_tick();
    }

    /// Drag from the center of `from` to the center of `to`
    pub fn drag(&mut self, from: Square, to: Square) {
        let target = self.center(to);
        self.drag_to_point(from, target);
    }

    /// Drag from the center of `from` to an arbitrary point, frame by frame
    pub fn drag_to_point(&mut self, from: Square, target: Point) {
        let start = self.center(from);
        self.session.pointer_down(start);
        for step in 1..=4 {
            self.session.pointer_move(start.lerp(target, step as f32 / 4.0));
            self.frame();
        }
        self.session.pointer_up(target);
        // The browser still delivers a click after the release.
        self.session.click(target);
        self.session.next_tick();
    }

    /// Replay one coordinate move as taps or as a drag, then let it settle
    ///
    /// A promotion without a piece letter is completed with a queen.
    pub fn play(&mut self, text: &str, drag: bool) -> GameResult<()> {
        let (from, to, promotion) = parse_coordinate_move(text)?;
        let plies = self.oracle().history().len();

        if drag {
            self.drag(from, to);
        } else {
            self.tap(from);
            self.tap(to);
        }
        self.settle();

        if self.session.pending_promotion().is_some() {
            self.session
                .choose_promotion(promotion.unwrap_or(PieceKind::Queen))?;
            self.settle();
        }

        if self.oracle().history().len() == plies {
            debug!("[INPUT] {} was not played", text);
            return Err(GameError::IllegalMove { from, to });
        }
        Ok(())
    }
}
