/// Drag distance (in gesture units) past which releasing the sheet
/// dismisses it instead of snapping back.
pub const DISMISS_THRESHOLD: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Dismiss,
    SnapBack,
}

/// Downward-drag tracking for the language sheet.
///
/// Rows are coarse, so drags are measured in sub-row units; the session
/// scales row deltas before feeding them in. Upward movement clamps to the
/// start position rather than going negative.
#[derive(Debug, Default, Clone, Copy)]
pub enum SheetGesture {
    #[default]
    Idle,
    Dragging {
        start: u32,
        offset: u32,
    },
}

impl SheetGesture {
    pub fn begin(&mut self, start: u32) {
        *self = SheetGesture::Dragging { start, offset: 0 };
    }

    pub fn drag_to(&mut self, position: u32) {
        if let SheetGesture::Dragging { start, offset } = self {
            *offset = position.saturating_sub(*start);
        }
    }

    /// Ends the gesture. `None` when no drag was in progress.
    pub fn release(&mut self) -> Option<GestureOutcome> {
        match *self {
            SheetGesture::Idle => None,
            SheetGesture::Dragging { offset, .. } => {
                *self = SheetGesture::Idle;
                if offset > DISMISS_THRESHOLD {
                    Some(GestureOutcome::Dismiss)
                } else {
                    Some(GestureOutcome::SnapBack)
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = SheetGesture::Idle;
    }

    pub fn offset(&self) -> u32 {
        match self {
            SheetGesture::Idle => 0,
            SheetGesture::Dragging { offset, .. } => *offset,
        }
    }

    pub fn dragging(&self) -> bool {
        matches!(self, SheetGesture::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_drag_snaps_back() {
        let mut gesture = SheetGesture::default();
        gesture.begin(200);
        gesture.drag_to(250);
        assert_eq!(gesture.offset(), 50);
        assert_eq!(gesture.release(), Some(GestureOutcome::SnapBack));
        assert!(!gesture.dragging());
    }

    #[test]
    fn long_drag_dismisses() {
        let mut gesture = SheetGesture::default();
        gesture.begin(200);
        gesture.drag_to(350);
        assert_eq!(gesture.release(), Some(GestureOutcome::Dismiss));
    }

    #[test]
    fn threshold_is_strict() {
        let mut gesture = SheetGesture::default();
        gesture.begin(0);
        gesture.drag_to(DISMISS_THRESHOLD);
        assert_eq!(gesture.release(), Some(GestureOutcome::SnapBack));

        gesture.begin(0);
        gesture.drag_to(DISMISS_THRESHOLD + 1);
        assert_eq!(gesture.release(), Some(GestureOutcome::Dismiss));
    }

    #[test]
    fn upward_movement_clamps_to_zero() {
        let mut gesture = SheetGesture::default();
        gesture.begin(200);
        gesture.drag_to(120);
        assert_eq!(gesture.offset(), 0);
        assert_eq!(gesture.release(), Some(GestureOutcome::SnapBack));
    }

    #[test]
    fn release_without_drag_is_none() {
        let mut gesture = SheetGesture::default();
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn cancel_discards_progress() {
        let mut gesture = SheetGesture::default();
        gesture.begin(0);
        gesture.drag_to(500);
        gesture.cancel();
        assert_eq!(gesture.release(), None);
    }
}
