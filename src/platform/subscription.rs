//! Frame-tick subscription handle
//!
//! The host re-arms the handle every frame (`requestAnimationFrame` returns a
//! fresh id each time). Cancelling releases the current id exactly once,
//! either explicitly or on drop.

/// An active periodic callback registration
pub struct Subscription<C: FnMut(i32)> {
    handle: Option<i32>,
    cancel: C,
}

impl<C: FnMut(i32)> Subscription<C> {
    /// Wrap a registration; `cancel` unregisters a handle
    pub fn new(handle: i32, cancel: C) -> Self {
        Self {
            handle: Some(handle),
            cancel,
        }
    }

    /// Record the handle of the next scheduled frame. No-op once cancelled.
    pub fn rearm(&mut self, handle: i32) -> bool {
        if self.handle.is_none() {
            return false;
        }
        self.handle = Some(handle);
        true
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the loop. Later calls do nothing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            (self.cancel)(handle);
            log::debug!("Frame subscription {} cancelled", handle);
        }
    }
}

impl<C: FnMut(i32)> Drop for Subscription<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_cancel_exactly_once() {
        let cancelled = RefCell::new(Vec::new());
        {
            let mut sub = Subscription::new(1, |h| cancelled.borrow_mut().push(h));
            assert!(sub.rearm(2));
            assert!(sub.rearm(3));
            sub.cancel();
            sub.cancel();
            assert!(!sub.is_active());
            assert!(!sub.rearm(4));
        }
        assert_eq!(*cancelled.borrow(), vec![3]);
    }

    #[test]
    fn test_drop_cancels() {
        let cancelled = RefCell::new(Vec::new());
        {
            let _sub = Subscription::new(7, |h| cancelled.borrow_mut().push(h));
        }
        assert_eq!(*cancelled.borrow(), vec![7]);
    }
}
