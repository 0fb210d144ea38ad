//! Ghost animations
//!
//! Two animations exist, and at most one runs at a time:
//!
//! - **Snap-back**: a rejected or cancelled drop returns the ghost to the
//!   origin square ([`SNAP_BACK_DURATION`])
//! - **Slide**: a committed move carries the ghost to its destination
//!   ([`SLIDE_DURATION`]) while captured pieces fade out
//!   ([`CAPTURE_FADE_DURATION`])
//!
//! Both ease out with a cubic curve. The sequencer only moves the ghost; when
//! the endpoint is reached it removes the ghost and reports an
//! [`AnimationEnd`] so the session can restore or repaint the board. Nothing
//! is repainted before that.

use std::time::Duration;

use tracing::{debug, warn};

use crate::game::types::{Piece, Square};
use crate::input::geometry::Point;
use crate::rendering::surface::{BoardSurface, GhostId};

pub const SNAP_BACK_DURATION: Duration = Duration::from_millis(120);
pub const SLIDE_DURATION: Duration = Duration::from_millis(160);
pub const CAPTURE_FADE_DURATION: Duration = Duration::from_millis(140);

/// Ease-out cubic on 0..=1
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Which animation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    SnapBack,
    Slide,
}

/// Reported once an animation reaches its endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The ghost is back on `origin`; its piece should be shown again
    SnappedBack { origin: Square },
    /// The ghost arrived; the board should be repainted
    Slid { origin: Square, target: Square },
}

/// The running animation
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub ghost: GhostId,
    pub from: Point,
    pub to: Point,
    pub origin: Square,
    pub target: Square,
    /// Squares whose pieces fade out during a slide
    pub fading: Vec<Square>,
    pub duration: Duration,
    pub elapsed: Duration,
}

impl Animation {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn fade_opacity(&self) -> f32 {
        let t = self.elapsed.as_secs_f32() / CAPTURE_FADE_DURATION.as_secs_f32();
        1.0 - t.min(1.0)
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn end(&self) -> AnimationEnd {
        match self.kind {
            AnimationKind::SnapBack => AnimationEnd::SnappedBack {
                origin: self.origin,
            },
            AnimationKind::Slide => AnimationEnd::Slid {
                origin: self.origin,
                target: self.target,
            },
        }
    }
}

/// Runs the single ghost animation
#[derive(Debug, Default, Clone)]
pub struct AnimationSequencer {
    active: Option<Animation>,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Animation> {
        self.active.as_ref()
    }

    /// Return a ghost to the center of `origin`
    pub fn snap_back<S: BoardSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        ghost: GhostId,
        from: Point,
        home: Point,
        origin: Square,
    ) {
        self.replace(
            surface,
            Animation {
                kind: AnimationKind::SnapBack,
                ghost,
                from,
                to: home,
                origin,
                target: origin,
                fading: Vec::new(),
                duration: SNAP_BACK_DURATION,
                elapsed: Duration::ZERO,
            },
        );
        debug!("[ANIMATION] Snapping back to {}", origin);
    }

    /// Slide a piece from `origin` to `target`
    ///
    /// A drop passes the ghost it already has. Without one (tap moves and
    /// promotion choices) a ghost is spawned on `from` and the source piece is
    /// hidden.
    #[allow(clippy::too_many_arguments)]
    pub fn slide<S: BoardSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        ghost: Option<GhostId>,
        piece: Piece,
        glyph: &'static str,
        from: Point,
        to: Point,
        origin: Square,
        target: Square,
        fading: Vec<Square>,
    ) {
        let ghost = match ghost {
            Some(ghost) => ghost,
            None => {
                surface.set_piece_hidden(origin, true);
                surface.spawn_ghost(piece, glyph, from)
            }
        };
        self.replace(
            surface,
            Animation {
                kind: AnimationKind::Slide,
                ghost,
                from,
                to,
                origin,
                target,
                fading,
                duration: SLIDE_DURATION,
                elapsed: Duration::ZERO,
            },
        );
        debug!("[ANIMATION] Sliding {} to {}", origin, target);
    }

    fn replace<S: BoardSurface + ?Sized>(&mut self, surface: &mut S, next: Animation) {
        if let Some(previous) = self.active.replace(next) {
            warn!("[ANIMATION] Replaced an unfinished {:?} animation", previous.kind);
            surface.remove_ghost(previous.ghost);
        }
    }

    /// Advance by one frame; returns the end event once the endpoint is reached
    pub fn tick<S: BoardSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        dt: Duration,
    ) -> Option<AnimationEnd> {
        let animation = self.active.as_mut()?;
        animation.elapsed = animation.elapsed.saturating_add(dt);

        let position = animation
            .from
            .lerp(animation.to, ease_out_cubic(animation.progress()));
        surface.move_ghost(animation.ghost, position);

        if animation.kind == AnimationKind::Slide {
            let opacity = animation.fade_opacity();
            for &square in &animation.fading {
                surface.set_piece_opacity(square, opacity);
            }
        }

        if animation.is_done() {
            self.complete(surface)
        } else {
            None
        }
    }

    /// Jump to the endpoint of the running animation
    pub fn finish_now<S: BoardSurface + ?Sized>(&mut self, surface: &mut S) -> Option<AnimationEnd> {
        let animation = self.active.as_mut()?;
        animation.elapsed = animation.duration;
        surface.move_ghost(animation.ghost, animation.to);
        self.complete(surface)
    }

    /// Remove the running animation's ghost without reporting an end
    pub fn discard<S: BoardSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(animation) = self.active.take() {
            surface.remove_ghost(animation.ghost);
            debug!("[ANIMATION] Discarded {:?} animation", animation.kind);
        }
    }

    fn complete<S: BoardSurface + ?Sized>(&mut self, surface: &mut S) -> Option<AnimationEnd> {
        let animation = self.active.take()?;
        surface.remove_ghost(animation.ghost);
        Some(animation.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_ease_out_is_monotonic() {
        let mut last = 0.0;
        for step in 1..=20 {
            let value = ease_out_cubic(step as f32 / 20.0);
            assert!(value >= last);
            last = value;
        }
    }
}
