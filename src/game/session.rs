//! Interaction session
//!
//! [`InteractionSession`] owns everything transient about playing on the
//! board: the gesture, the selection, the pending promotion, the running
//! animation, click suppression, layout and preferences. The oracle owns the
//! game itself. Each host event maps to one method:
//!
//! | Event | Method |
//! |-------|--------|
//! | pointer down / move / up / cancel | [`pointer_down`], [`pointer_move`], [`pointer_up`], [`pointer_cancel`] |
//! | click after a release | [`click`] |
//! | animation frame | [`animation_frame`] |
//! | next event-loop turn | [`next_tick`] |
//! | promotion prompt | [`choose_promotion`], [`cancel_promotion`] |
//! | menu actions | [`new_game`], [`set_mode`], [`apply_route`], [`set_piece_style`], [`set_theme`] |
//! | layout | [`resize`], [`toggle_fullscreen`], [`on_fullscreen_change`] |
//!
//! # State machine
//!
//! ```text
//! idle → primed → dragging → {validating → animating → idle}
//! idle → selected → {validating → animating → idle} | idle
//! ```
//!
//! While a promotion is pending, pointer presses and clicks are ignored.
//! Starting a gesture or a tap during an animation first finishes it; a new
//! game discards it.
//!
//! [`pointer_down`]: InteractionSession::pointer_down
//! [`pointer_move`]: InteractionSession::pointer_move
//! [`pointer_up`]: InteractionSession::pointer_up
//! [`pointer_cancel`]: InteractionSession::pointer_cancel
//! [`click`]: InteractionSession::click
//! [`animation_frame`]: InteractionSession::animation_frame
//! [`next_tick`]: InteractionSession::next_tick
//! [`choose_promotion`]: InteractionSession::choose_promotion
//! [`cancel_promotion`]: InteractionSession::cancel_promotion
//! [`new_game`]: InteractionSession::new_game
//! [`set_mode`]: InteractionSession::set_mode
//! [`apply_route`]: InteractionSession::apply_route
//! [`set_piece_style`]: InteractionSession::set_piece_style
//! [`set_theme`]: InteractionSession::set_theme
//! [`resize`]: InteractionSession::resize
//! [`toggle_fullscreen`]: InteractionSession::toggle_fullscreen
//! [`on_fullscreen_change`]: InteractionSession::on_fullscreen_change

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::core::error::CoreResult;
use crate::core::resources::{BoardTheme, PieceStyle, Preferences};
use crate::core::settings_persistence::{load_preferences, save_preferences, KeyValueStorage};
use crate::game::chess960;
use crate::game::committer::{commit_move, Commit, CommittedMove};
use crate::game::error::{GameError, GameResult};
use crate::game::mode::Mode;
use crate::game::oracle::{PgnOptions, RulesOracle};
use crate::game::pgn;
use crate::game::promotion::PendingPromotion;
use crate::game::selection::Selection;
use crate::game::status::{current_outcome, outcome_status, ILLEGAL_MOVE_MESSAGE};
use crate::game::types::{Piece, PieceKind, Square};
use crate::input::geometry::{BoardGeometry, Point};
use crate::input::pointer::{GestureRecognizer, GestureRecord, GestureTransition};
use crate::rendering::animation::{AnimationEnd, AnimationSequencer};
use crate::rendering::board_theme::palette;
use crate::rendering::glyphs::glyph;
use crate::rendering::layout::{fitted_square_size, fullscreen_square_size, Layout};
use crate::rendering::reconciler::reconcile;
use crate::rendering::surface::{BoardSurface, GhostId, Mark, PromotionChoice};

/// Square size used until the first layout arrives
const DEFAULT_SQUARE_SIZE: u32 = 64;

/// One interactive board: an oracle, a surface and the state between them
pub struct InteractionSession<O: RulesOracle, S: BoardSurface> {
    oracle: O,
    surface: S,
    storage: Box<dyn KeyValueStorage>,
    prefs: Preferences,
    mode: Mode,
    rng: StdRng,

    layout: Layout,
    geometry: BoardGeometry,
    square_size: u32,
    fullscreen: bool,

    selection: Selection,
    gestures: GestureRecognizer,
    pending_promotion: Option<PendingPromotion>,
    animations: AnimationSequencer,
    /// Move being animated; announced once the slide ends
    in_flight: Option<CommittedMove>,
    click_suppressed: bool,
}

impl<O: RulesOracle, S: BoardSurface> InteractionSession<O, S> {
    /// Load preferences, apply them to the surface and start a game in `mode`
    pub fn new(oracle: O, surface: S, storage: Box<dyn KeyValueStorage>, mode: Mode) -> Self {
        Self::with_rng(oracle, surface, storage, mode, StdRng::from_rng(&mut rand::rng()))
    }

    /// Like [`InteractionSession::new`] with a fixed Chess960 seed
    pub fn with_seed(
        oracle: O,
        surface: S,
        storage: Box<dyn KeyValueStorage>,
        mode: Mode,
        seed: u64,
    ) -> Self {
        Self::with_rng(oracle, surface, storage, mode, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        oracle: O,
        surface: S,
        storage: Box<dyn KeyValueStorage>,
        mode: Mode,
        rng: StdRng,
    ) -> Self {
        let prefs = load_preferences(storage.as_ref());
        let mut session = Self {
            oracle,
            surface,
            storage,
            prefs,
            mode,
            rng,
            layout: Layout::default(),
            geometry: BoardGeometry::new(0.0, 0.0, DEFAULT_SQUARE_SIZE as f32),
            square_size: DEFAULT_SQUARE_SIZE,
            fullscreen: false,
            selection: Selection::default(),
            gestures: GestureRecognizer::new(),
            pending_promotion: None,
            animations: AnimationSequencer::new(),
            in_flight: None,
            click_suppressed: false,
        };
        session.surface.apply_palette(palette(session.prefs.theme));
        session.surface.set_square_size(session.square_size);
        if let Err(e) = session.new_game() {
            warn!("[SESSION] Could not start {} game: {}", mode, e);
        }
        session
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gesture(&self) -> Option<&GestureRecord> {
        self.gestures.gesture()
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    pub fn is_click_suppressed(&self) -> bool {
        self.click_suppressed
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn square_size(&self) -> u32 {
        self.square_size
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    /// Pointer pressed; primes a gesture over a piece of the side to move
    ///
    /// Nothing can be picked up once the game is over.
    pub fn pointer_down(&mut self, at: Point) {
        if self.pending_promotion.is_some() || self.gestures.is_active() {
            return;
        }
        self.finish_animation();

        let Some(square) = self.geometry.square_at(at) else {
            return;
        };
        let Some(piece) = self.oracle.get(square) else {
            return;
        };
        if piece.color != self.oracle.turn() || self.oracle.is_game_over() {
            return;
        }
        debug!("[INPUT] Pointer down on {} at {:?}", square, at);
        self.gestures.press(square, piece, at);
    }

    /// Pointer moved; may start a drag or request a frame
    pub fn pointer_move(&mut self, at: Point) {
        if self.gestures.motion(at) != GestureTransition::DragStarted {
            return;
        }
        let Some(gesture) = self.gestures.gesture() else {
            return;
        };
        let origin = gesture.origin;
        let piece = gesture.piece;

        self.selection.clear();
        self.surface.clear_marks();

        let center = self.geometry.center_of(origin);
        let ghost = self
            .surface
            .spawn_ghost(piece, glyph(self.prefs.piece_style, piece), center);
        self.surface.set_piece_hidden(origin, true);
        self.gestures.attach_ghost(ghost, center);
    }

    /// Pointer released; a drag is resolved here, a tap waits for the click
    pub fn pointer_up(&mut self, at: Point) {
        match self.gestures.release(at) {
            GestureTransition::Dropped(gesture) => {
                self.click_suppressed = true;
                self.drop_piece(gesture, at);
            }
            GestureTransition::Tap { origin } => {
                debug!("[INPUT] Tap on {}, waiting for click", origin);
            }
            _ => {}
        }
    }

    /// Pointer cancelled; behaves like an unsuccessful drop
    pub fn pointer_cancel(&mut self) {
        if let GestureTransition::Cancelled(gesture) = self.gestures.cancel() {
            if let Some(ghost) = gesture.ghost {
                self.snap_back(ghost, gesture.ghost_center(), gesture.origin);
            } else {
                self.surface.set_piece_hidden(gesture.origin, false);
            }
        }
    }

    fn drop_piece(&mut self, gesture: GestureRecord, at: Point) {
        let origin = gesture.origin;
        let Some(ghost) = gesture.ghost else {
            self.surface.set_piece_hidden(origin, false);
            return;
        };
        let ghost_at = gesture.ghost_center();
        self.surface.move_ghost(ghost, ghost_at);

        let target = match self.geometry.square_at(at) {
            Some(target) if target != origin => target,
            _ => {
                debug!("[INPUT] Dropped off-board or on {}, snapping back", origin);
                self.snap_back(ghost, ghost_at, origin);
                return;
            }
        };

        match commit_move(&mut self.oracle, self.mode.rules(), origin, target, None) {
            Ok(Commit::Applied(committed)) => {
                self.start_slide(committed, Some(ghost), ghost_at);
            }
            Ok(Commit::Deferred(pending)) => {
                self.snap_back(ghost, ghost_at, origin);
                self.open_promotion(pending);
            }
            Err(e) => {
                debug!("[INPUT] Drop rejected: {}", e);
                self.snap_back(ghost, ghost_at, origin);
            }
        }
    }

    /// Click on the board; drives tap-to-move selection
    pub fn click(&mut self, at: Point) {
        if self.click_suppressed {
            debug!("[INPUT] Click after drag suppressed");
            return;
        }
        if self.pending_promotion.is_some() || self.gestures.is_active() {
            return;
        }
        self.finish_animation();

        let Some(square) = self.geometry.square_at(at) else {
            return;
        };
        let own_piece = !self.oracle.is_game_over()
            && self
                .oracle
                .get(square)
                .is_some_and(|piece| piece.color == self.oracle.turn());

        match self.selection.selected {
            None if own_piece => self.select(square),
            None => {}
            Some(selected) if selected == square => self.deselect(),
            Some(_) if own_piece => self.select(square),
            Some(selected) => self.tap_move(selected, square),
        }
    }

    fn tap_move(&mut self, from: Square, to: Square) {
        self.deselect();
        match commit_move(&mut self.oracle, self.mode.rules(), from, to, None) {
            Ok(Commit::Applied(committed)) => {
                let start = self.geometry.center_of(from);
                self.start_slide(committed, None, start);
            }
            Ok(Commit::Deferred(pending)) => self.open_promotion(pending),
            Err(e) => {
                debug!("[INPUT] Tap move rejected: {}", e);
                self.surface.set_status(ILLEGAL_MOVE_MESSAGE);
            }
        }
    }

    /// Animation frame with the time elapsed since the previous one
    pub fn animation_frame(&mut self, dt: Duration) {
        if let Some((ghost, center)) = self.gestures.take_frame() {
            self.surface.move_ghost(ghost, center);
        }
        if let Some(end) = self.animations.tick(&mut self.surface, dt) {
            self.on_animation_end(end);
        }
    }

    /// Next event-loop turn; lifts click suppression
    pub fn next_tick(&mut self) {
        self.click_suppressed = false;
    }

    // ========================================================================
    // Selection
    // ========================================================================

    fn select(&mut self, square: Square) {
        let moves = self.oracle.moves_from(square);
        self.selection.select(square, &moves);
        self.surface.clear_marks();
        self.surface.add_mark(square, Mark::Origin);
        for destination in &self.selection.destinations {
            let mark = if destination.capture {
                Mark::Capture
            } else {
                Mark::Destination
            };
            self.surface.add_mark(destination.square, mark);
        }
        debug!(
            "[INPUT] Selected {} with {} destinations",
            square,
            self.selection.destinations.len()
        );
    }

    fn deselect(&mut self) {
        self.selection.clear();
        self.surface.clear_marks();
    }

    // ========================================================================
    // Animation
    // ========================================================================

    fn snap_back(&mut self, ghost: GhostId, from: Point, origin: Square) {
        let home = self.geometry.center_of(origin);
        self.animations
            .snap_back(&mut self.surface, ghost, from, home, origin);
    }

    fn start_slide(&mut self, committed: CommittedMove, ghost: Option<GhostId>, from: Point) {
        let record = &committed.record;
        let piece = record.moving_piece();
        let to = self.geometry.center_of(record.to);

        let mut fading = vec![record.to];
        if record.en_passant {
            if let Some(victim) = Square::from_indices(record.to.file.index(), record.from.rank.index()) {
                fading.push(victim);
            }
        }
        if let Some(explosion) = &committed.explosion {
            fading.extend(explosion.removed.iter().map(|(square, _)| *square));
        }
        fading.retain(|square| *square != record.from);
        fading.dedup();

        self.animations.slide(
            &mut self.surface,
            ghost,
            piece,
            glyph(self.prefs.piece_style, piece),
            from,
            to,
            record.from,
            record.to,
            fading,
        );
        self.in_flight = Some(committed);
    }

    fn finish_animation(&mut self) {
        if let Some(end) = self.animations.finish_now(&mut self.surface) {
            self.on_animation_end(end);
        }
    }

    fn on_animation_end(&mut self, end: AnimationEnd) {
        match end {
            AnimationEnd::SnappedBack { origin } => {
                self.surface.set_piece_hidden(origin, false);
                self.deselect();
            }
            AnimationEnd::Slid { .. } => {
                reconcile(&mut self.surface, &self.oracle, self.mode, self.prefs.piece_style);
                if let Some(outcome) = self.in_flight.take().and_then(|c| c.outcome) {
                    info!("[SESSION] Game over: {:?}", outcome);
                    self.surface.set_status(&outcome_status(self.mode, outcome));
                }
            }
        }
    }

    // ========================================================================
    // Promotion
    // ========================================================================

    fn open_promotion(&mut self, pending: PendingPromotion) {
        let color = self.oracle.turn();
        let choices: Vec<PromotionChoice> = PieceKind::PROMOTION_CHOICES
            .iter()
            .map(|&kind| PromotionChoice {
                kind,
                glyph: glyph(self.prefs.piece_style, Piece::new(color, kind)),
            })
            .collect();
        self.surface.show_promotion_prompt(color, &choices);
        self.pending_promotion = Some(pending);
    }

    /// Complete the pending promotion with the chosen piece
    ///
    /// A king or pawn is refused and the prompt stays open.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> GameResult<()> {
        if !PieceKind::PROMOTION_CHOICES.contains(&kind) {
            debug!("[SESSION] Ignoring promotion to {:?}", kind);
            return Err(GameError::InvalidPromotionPiece { kind });
        }
        self.resolve_promotion(Some(kind))
    }

    /// Dismiss the promotion prompt without moving
    ///
    /// Always returns an error: [`GameError::PromotionCancelled`] after the
    /// pending move was discarded, or [`GameError::NoPendingPromotion`].
    pub fn cancel_promotion(&mut self) -> GameResult<()> {
        self.resolve_promotion(None)
    }

    fn resolve_promotion(&mut self, choice: Option<PieceKind>) -> GameResult<()> {
        let pending = self
            .pending_promotion
            .take()
            .ok_or(GameError::NoPendingPromotion)?;
        self.surface.hide_promotion_prompt();
        self.finish_animation();

        let Some(kind) = choice else {
            info!("[SESSION] Promotion on {}{} cancelled", pending.from, pending.to);
            reconcile(&mut self.surface, &self.oracle, self.mode, self.prefs.piece_style);
            return Err(GameError::PromotionCancelled {
                from: pending.from,
                to: pending.to,
            });
        };

        match commit_move(
            &mut self.oracle,
            self.mode.rules(),
            pending.from,
            pending.to,
            Some(kind),
        ) {
            Ok(Commit::Applied(committed)) => {
                let start = self.geometry.center_of(pending.from);
                self.start_slide(committed, None, start);
                Ok(())
            }
            Ok(Commit::Deferred(_)) => Err(GameError::IllegalMove {
                from: pending.from,
                to: pending.to,
            }),
            Err(e) => {
                self.surface.set_status(ILLEGAL_MOVE_MESSAGE);
                Err(e)
            }
        }
    }

    // ========================================================================
    // Game and mode
    // ========================================================================

    /// Start a new game in the current mode
    ///
    /// Any running animation and gesture is discarded without completing.
    /// Chess960 games get a freshly generated start position.
    pub fn new_game(&mut self) -> GameResult<()> {
        let start_fen = self
            .mode
            .rules()
            .chess960
            .then(|| chess960::generate_with(&mut self.rng).to_fen());
        self.restart(start_fen.as_deref())
    }

    /// Start a game in the current mode from a FEN position
    ///
    /// An unparsable FEN leaves the previous game in place.
    pub fn load_fen(&mut self, fen: &str) -> GameResult<()> {
        self.restart(Some(fen))
    }

    fn restart(&mut self, start_fen: Option<&str>) -> GameResult<()> {
        self.animations.discard(&mut self.surface);
        self.in_flight = None;
        if let Some(gesture) = self.gestures.reset() {
            if let Some(ghost) = gesture.ghost {
                self.surface.remove_ghost(ghost);
            }
        }
        self.selection.clear();
        self.surface.clear_marks();
        if self.pending_promotion.take().is_some() {
            self.surface.hide_promotion_prompt();
        }

        let result = self.oracle.new_game(start_fen);
        match &result {
            Ok(()) => info!(
                "[SESSION] New {} game from {}",
                self.mode,
                start_fen.unwrap_or("the standard position")
            ),
            Err(e) => warn!("[SESSION] {}", e),
        }
        reconcile(&mut self.surface, &self.oracle, self.mode, self.prefs.piece_style);
        result
    }

    /// Switch rule variant; always starts a new game
    pub fn set_mode(&mut self, mode: Mode) -> GameResult<()> {
        self.mode = mode;
        self.new_game()
    }

    /// Select the mode named by a route such as `#atomic`
    pub fn apply_route(&mut self, route: &str) -> GameResult<()> {
        self.set_mode(Mode::from_route(route))
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    pub fn set_piece_style(&mut self, style: PieceStyle) {
        self.prefs.piece_style = style;
        save_preferences(self.storage.as_mut(), &self.prefs);
        self.finish_animation();
        reconcile(&mut self.surface, &self.oracle, self.mode, style);
        if let Some(gesture) = self.gestures.gesture().filter(|g| g.ghost.is_some()) {
            self.surface.set_piece_hidden(gesture.origin, true);
        }
    }

    pub fn set_theme(&mut self, theme: BoardTheme) {
        self.prefs.theme = theme;
        save_preferences(self.storage.as_mut(), &self.prefs);
        self.surface.apply_palette(palette(theme));
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Host was resized or the board moved
    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
        if self.fullscreen {
            self.apply_square_size(fullscreen_square_size(layout.window_width, layout.window_height));
        } else {
            self.fit_to_container();
        }
    }

    /// Ask the host to enter or leave fullscreen; a refusal is ignored
    pub fn toggle_fullscreen(&mut self) {
        let enter = !self.fullscreen;
        if enter {
            self.prefs.pre_fullscreen_square_size = Some(self.square_size);
            save_preferences(self.storage.as_mut(), &self.prefs);
        }
        if let Err(e) = self.surface.request_fullscreen(enter) {
            warn!("[SESSION] {}", e);
        }
    }

    /// Host confirmed entering or leaving fullscreen
    pub fn on_fullscreen_change(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
        if fullscreen {
            self.apply_square_size(fullscreen_square_size(
                self.layout.window_width,
                self.layout.window_height,
            ));
        } else if let Some(size) = self.prefs.pre_fullscreen_square_size {
            self.apply_square_size(size);
            self.fit_to_container();
        }
    }

    fn fit_to_container(&mut self) {
        if let Some(size) = fitted_square_size(self.layout.container_width) {
            self.apply_square_size(size);
        }
    }

    fn apply_square_size(&mut self, size: u32) {
        self.square_size = size;
        self.geometry = BoardGeometry::new(self.layout.left, self.layout.top, size as f32);
        self.surface.set_square_size(size);
        debug!("[SESSION] Square size {}px", size);
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// PGN of the game so far with headers for the current mode
    pub fn export_pgn(&self) -> String {
        let options = PgnOptions {
            headers: pgn::game_headers(
                self.mode,
                current_outcome(&self.oracle),
                self.oracle.start_fen(),
            ),
            ..PgnOptions::default()
        };
        self.oracle.pgn(&options)
    }

    /// Write the PGN to `game.pgn` in `dir`
    pub fn write_pgn(&self, dir: &Path) -> CoreResult<PathBuf> {
        pgn::write_pgn_file(dir, &self.export_pgn())
    }
}
