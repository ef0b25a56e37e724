//! Drag-and-Drop State
//!
//! Framework-free drag state tracking. A drag gesture is a single slot:
//! pointer input is physically serial, so at most one payload is in flight
//! and a new drag silently replaces an uncommitted one.

/// Single-slot drag payload.
///
/// Holds whatever is currently being dragged. `begin` replaces any prior
/// uncommitted payload; `take` hands the payload to the drop handler and
/// leaves the slot empty.
#[derive(Debug, Clone)]
pub struct DragSlot<P> {
    payload: Option<P>,
}

impl<P> Default for DragSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DragSlot<P> {
    pub fn new() -> Self {
        Self { payload: None }
    }

    /// Start a drag. Any prior payload is discarded.
    pub fn begin(&mut self, payload: P) {
        self.payload = Some(payload);
    }

    pub fn is_active(&self) -> bool {
        self.payload.is_some()
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Commit the drag: yields the payload and clears the slot.
    pub fn take(&mut self) -> Option<P> {
        self.payload.take()
    }

    /// Abandon the drag without dropping anywhere.
    pub fn cancel(&mut self) {
        self.payload = None;
    }
}

/// Current drop target under the pointer.
///
/// Tracks which target the drag is hovering over. Entering a new target
/// replaces the previous one (mouseenter fires before mouseleave settles).
#[derive(Debug, Clone)]
pub struct DropHover<T> {
    target: Option<T>,
}

impl<T> Default for DropHover<T> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<T: PartialEq> DropHover<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, target: T) {
        self.target = Some(target);
    }

    /// Leaving a specific target only clears the hover if it is still the
    /// current one, so a stale leave event cannot wipe a newer enter.
    pub fn leave(&mut self, target: &T) {
        if self.target.as_ref() == Some(target) {
            self.target = None;
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn is_over(&self, target: &T) -> bool {
        self.target.as_ref() == Some(target)
    }

    pub fn clear(&mut self) {
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_replaces_prior_payload() {
        let mut slot = DragSlot::new();
        slot.begin("first");
        slot.begin("second");
        assert_eq!(slot.take(), Some("second"));
        assert!(!slot.is_active());
    }

    #[test]
    fn test_take_clears_slot() {
        let mut slot = DragSlot::new();
        slot.begin(42);
        assert_eq!(slot.take(), Some(42));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_cancel_discards_payload() {
        let mut slot = DragSlot::new();
        slot.begin(1);
        slot.cancel();
        assert!(slot.payload().is_none());
    }

    #[test]
    fn test_hover_enter_replaces() {
        let mut hover = DropHover::new();
        hover.enter((0, 1));
        hover.enter((2, 3));
        assert_eq!(hover.current(), Some(&(2, 3)));
    }

    #[test]
    fn test_stale_leave_ignored() {
        let mut hover = DropHover::new();
        hover.enter("a");
        hover.enter("b");
        hover.leave(&"a");
        assert!(hover.is_over(&"b"));
        hover.leave(&"b");
        assert_eq!(hover.current(), None);
    }
}
