//! Tap/drag gesture recognition
//!
//! A pointer sequence over one of the mover's pieces goes through
//! `idle → primed → dragging → idle`, or `idle → primed → idle` for a tap.
//!
//! # Thresholding
//!
//! A pressed pointer stays `primed` until it travels more than
//! [`DRAG_THRESHOLD`] pixels (Euclidean) from where it went down. Small jitter
//! during a tap therefore never spawns a ghost, and once a drag has started
//! the release is never treated as a tap.
//!
//! # Frame coalescing
//!
//! While dragging, every pointer-move only records the latest position. The
//! first move after a frame sets the pending-frame flag and asks for a frame;
//! further moves before that frame are coalesced. [`GestureRecognizer::take_frame`]
//! clears the flag and hands back where the ghost should be drawn.
//!
//! Transitions that make no sense in the current state (a second press while
//! a gesture is live, a release with no gesture) return
//! [`GestureTransition::Ignored`] and change nothing.

use tracing::{debug, trace};

use crate::game::types::{Piece, Square};
use crate::input::geometry::Point;
use crate::rendering::surface::GhostId;

/// Distance in pixels a pressed pointer must exceed to start a drag
pub const DRAG_THRESHOLD: f32 = 6.0;

/// Phase of the live gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pointer is down, not yet moved far enough
    Primed,
    Dragging,
}

/// The one transient gesture
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRecord {
    pub origin: Square,
    pub piece: Piece,
    /// Where the pointer went down
    pub start: Point,
    /// Most recent pointer position
    pub latest: Point,
    pub phase: GesturePhase,
    /// Floating piece, once the drag has spawned one
    pub ghost: Option<GhostId>,
    /// Pointer position minus the ghost's center, fixed at drag start
    pub offset: Point,
    pub frame_pending: bool,
}

impl GestureRecord {
    /// Where the ghost's center belongs for the latest pointer position
    pub fn ghost_center(&self) -> Point {
        self.latest - self.offset
    }
}

/// What a pointer event did to the gesture
#[derive(Debug, Clone, PartialEq)]
pub enum GestureTransition {
    /// Nothing changed
    Ignored,
    /// A press over a piece primed a gesture
    Primed,
    /// The threshold was crossed; the caller spawns the ghost and attaches it
    DragStarted,
    /// A frame is needed to move the ghost
    FrameRequested,
    /// A frame is already pending; only the position was recorded
    Coalesced,
    /// Released before the threshold
    Tap { origin: Square },
    /// Released while dragging
    Dropped(GestureRecord),
    /// Cancelled while dragging
    Cancelled(GestureRecord),
    /// Cancelled while primed; nothing was shown
    Discarded,
}

/// Tap/drag state machine over at most one gesture
#[derive(Debug, Default, Clone)]
pub struct GestureRecognizer {
    gesture: Option<GestureRecord>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live gesture, if any
    pub fn gesture(&self) -> Option<&GestureRecord> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(&self.gesture, Some(g) if g.phase == GesturePhase::Dragging)
    }

    /// Pointer went down over a piece the caller accepted
    pub fn press(&mut self, origin: Square, piece: Piece, at: Point) -> GestureTransition {
        if self.gesture.is_some() {
            trace!("[GESTURE] Press at {:?} ignored, gesture already live", at);
            return GestureTransition::Ignored;
        }
        self.gesture = Some(GestureRecord {
            origin,
            piece,
            start: at,
            latest: at,
            phase: GesturePhase::Primed,
            ghost: None,
            offset: Point::default(),
            frame_pending: false,
        });
        debug!("[GESTURE] Primed on {}", origin);
        GestureTransition::Primed
    }

    /// Pointer moved
    pub fn motion(&mut self, at: Point) -> GestureTransition {
        let Some(gesture) = self.gesture.as_mut() else {
            return GestureTransition::Ignored;
        };
        gesture.latest = at;
        match gesture.phase {
            GesturePhase::Primed => {
                if gesture.start.distance(at) <= DRAG_THRESHOLD {
                    return GestureTransition::Ignored;
                }
                gesture.phase = GesturePhase::Dragging;
                gesture.frame_pending = true;
                debug!("[GESTURE] Drag started from {}", gesture.origin);
                GestureTransition::DragStarted
            }
            GesturePhase::Dragging if gesture.frame_pending => GestureTransition::Coalesced,
            GesturePhase::Dragging => {
                gesture.frame_pending = true;
                GestureTransition::FrameRequested
            }
        }
    }

    /// Record the ghost spawned for a drag and the pointer-to-center offset
    pub fn attach_ghost(&mut self, ghost: GhostId, origin_center: Point) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.offset = gesture.latest - origin_center;
            gesture.ghost = Some(ghost);
        }
    }

    /// Consume the pending frame, returning the ghost and its new center
    pub fn take_frame(&mut self) -> Option<(GhostId, Point)> {
        let gesture = self.gesture.as_mut()?;
        if gesture.phase != GesturePhase::Dragging || !gesture.frame_pending {
            return None;
        }
        gesture.frame_pending = false;
        Some((gesture.ghost?, gesture.ghost_center()))
    }

    /// Pointer released
    pub fn release(&mut self, at: Point) -> GestureTransition {
        let Some(mut gesture) = self.gesture.take() else {
            return GestureTransition::Ignored;
        };
        match gesture.phase {
            GesturePhase::Primed => {
                debug!("[GESTURE] Tap on {}", gesture.origin);
                GestureTransition::Tap {
                    origin: gesture.origin,
                }
            }
            GesturePhase::Dragging => {
                gesture.latest = at;
                gesture.frame_pending = false;
                debug!("[GESTURE] Dropped piece from {}", gesture.origin);
                GestureTransition::Dropped(gesture)
            }
        }
    }

    /// Pointer cancelled by the host
    pub fn cancel(&mut self) -> GestureTransition {
        let Some(mut gesture) = self.gesture.take() else {
            return GestureTransition::Ignored;
        };
        match gesture.phase {
            GesturePhase::Primed => GestureTransition::Discarded,
            GesturePhase::Dragging => {
                gesture.frame_pending = false;
                debug!("[GESTURE] Drag from {} cancelled", gesture.origin);
                GestureTransition::Cancelled(gesture)
            }
        }
    }

    /// Drop the gesture without reporting anything
    pub fn reset(&mut self) -> Option<GestureRecord> {
        self.gesture.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{PieceColor, PieceKind};

    fn pawn() -> Piece {
        Piece::new(PieceColor::White, PieceKind::Pawn)
    }

    fn primed() -> GestureRecognizer {
        let mut recognizer = GestureRecognizer::new();
        let origin = "e2".parse().unwrap();
        assert_eq!(
            recognizer.press(origin, pawn(), Point::new(100.0, 100.0)),
            GestureTransition::Primed
        );
        recognizer
    }

    #[test]
    fn test_small_motion_stays_primed() {
        let mut recognizer = primed();
        assert_eq!(recognizer.motion(Point::new(104.0, 104.0)), GestureTransition::Ignored);
        assert!(!recognizer.is_dragging());
        assert!(matches!(
            recognizer.release(Point::new(104.0, 104.0)),
            GestureTransition::Tap { .. }
        ));
        assert!(!recognizer.is_active());
    }

    #[test]
    fn test_exactly_threshold_is_not_a_drag() {
        let mut recognizer = primed();
        assert_eq!(recognizer.motion(Point::new(106.0, 100.0)), GestureTransition::Ignored);
        assert_eq!(recognizer.motion(Point::new(106.1, 100.0)), GestureTransition::DragStarted);
    }

    #[test]
    fn test_second_press_is_ignored() {
        let mut recognizer = primed();
        let other = "d2".parse().unwrap();
        assert_eq!(
            recognizer.press(other, pawn(), Point::new(0.0, 0.0)),
            GestureTransition::Ignored
        );
        assert_eq!(recognizer.gesture().map(|g| g.origin.to_string()), Some("e2".into()));
    }

    #[test]
    fn test_moves_between_frames_coalesce() {
        let mut recognizer = primed();
        assert_eq!(recognizer.motion(Point::new(120.0, 100.0)), GestureTransition::DragStarted);
        recognizer.attach_ghost(GhostId(1), Point::new(96.0, 96.0));

        assert_eq!(recognizer.motion(Point::new(130.0, 100.0)), GestureTransition::Coalesced);
        assert_eq!(
            recognizer.take_frame(),
            Some((GhostId(1), Point::new(106.0, 96.0)))
        );
        assert_eq!(recognizer.take_frame(), None);

        assert_eq!(recognizer.motion(Point::new(140.0, 100.0)), GestureTransition::FrameRequested);
        assert_eq!(recognizer.motion(Point::new(150.0, 110.0)), GestureTransition::Coalesced);
        assert_eq!(
            recognizer.take_frame(),
            Some((GhostId(1), Point::new(126.0, 106.0)))
        );
    }

    #[test]
    fn test_release_after_drag_is_a_drop() {
        let mut recognizer = primed();
        recognizer.motion(Point::new(100.0, 50.0));
        match recognizer.release(Point::new(100.0, 40.0)) {
            GestureTransition::Dropped(record) => assert_eq!(record.latest, Point::new(100.0, 40.0)),
            other => panic!("expected drop, got {other:?}"),
        }
        assert!(!recognizer.is_active());
    }

    #[test]
    fn test_cancel_depends_on_phase() {
        let mut recognizer = primed();
        assert_eq!(recognizer.cancel(), GestureTransition::Discarded);

        let mut recognizer = primed();
        recognizer.motion(Point::new(150.0, 100.0));
        assert!(matches!(recognizer.cancel(), GestureTransition::Cancelled(_)));
        assert_eq!(recognizer.cancel(), GestureTransition::Ignored);
    }
}
