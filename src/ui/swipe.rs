use crate::store::schema::Outcome;

/// Turns a press-drag-release on the card into at most one outcome.
/// Dragging right means "know", dragging left means "don't know".
#[derive(Clone, Debug)]
pub struct SwipeTracker {
    threshold: u16,
    origin: Option<u16>,
    offset: i32,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: threshold.max(1),
            origin: None,
            offset: 0,
        }
    }

    pub fn press(&mut self, column: u16) {
        self.origin = Some(column);
        self.offset = 0;
    }

    pub fn drag(&mut self, column: u16) {
        if let Some(origin) = self.origin {
            self.offset = column as i32 - origin as i32;
        }
    }

    /// Ends the gesture. Drags shorter than the threshold snap back.
    pub fn release(&mut self, column: u16) -> Option<Outcome> {
        self.drag(column);
        let outcome = self.pending();
        self.cancel();
        outcome
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.offset = 0;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Current horizontal displacement; the card is drawn shifted by this.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// The outcome a release at the current position would produce.
    pub fn pending(&self) -> Option<Outcome> {
        if self.origin.is_none() || self.offset.unsigned_abs() < self.threshold as u32 {
            return None;
        }
        if self.offset > 0 {
            Some(Outcome::Know)
        } else {
            Some(Outcome::DontKnow)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_swipe_is_know() {
        let mut swipe = SwipeTracker::new(5);
        swipe.press(10);
        swipe.drag(13);
        assert_eq!(swipe.pending(), None);
        swipe.drag(16);
        assert_eq!(swipe.pending(), Some(Outcome::Know));
        assert_eq!(swipe.release(16), Some(Outcome::Know));
        assert!(!swipe.is_active());
        assert_eq!(swipe.offset(), 0);
    }

    #[test]
    fn test_left_swipe_is_dont_know() {
        let mut swipe = SwipeTracker::new(5);
        swipe.press(20);
        assert_eq!(swipe.release(14), Some(Outcome::DontKnow));
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut swipe = SwipeTracker::new(5);
        swipe.press(20);
        swipe.drag(40);
        assert_eq!(swipe.release(22), None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut swipe = SwipeTracker::new(5);
        swipe.drag(40);
        assert_eq!(swipe.release(40), None);
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut swipe = SwipeTracker::new(2);
        swipe.press(0);
        swipe.drag(10);
        swipe.cancel();
        assert_eq!(swipe.pending(), None);
        assert_eq!(swipe.release(10), None);
    }

    #[test]
    fn test_exact_threshold_counts() {
        let mut swipe = SwipeTracker::new(4);
        swipe.press(10);
        assert_eq!(swipe.release(6), Some(Outcome::DontKnow));
    }
}
