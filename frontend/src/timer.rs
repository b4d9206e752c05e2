use gloo_timers::callback::Timeout;

/// One-shot timers. Dropping a handle cancels its callback; `detach` gives
/// the handle up and lets the callback run no matter what.
pub trait Timer {
    type Handle;

    fn schedule(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn detach(&self, handle: Self::Handle) {
        std::mem::forget(handle);
    }
}

/// Browser timers via `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    type Handle = Timeout;

    fn schedule(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, callback)
    }

    fn detach(&self, handle: Timeout) {
        let _ = handle.forget();
    }
}


#[cfg(test)]
mod tests {
    use super::manual::ManualTimer;
    use super::Timer;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_dropping_handle_cancels() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = timer.schedule(50, Box::new(move || flag.set(true)));
        drop(handle);
        timer.advance(100);
        assert!(!fired.get());
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_detached_handle_still_fires() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = timer.schedule(50, Box::new(move || flag.set(true)));
        timer.detach(handle);
        timer.advance(49);
        assert!(!fired.get());
        timer.advance(1);
        assert!(fired.get());
        assert_eq!(timer.now(), 50);
    }
}
