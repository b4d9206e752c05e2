use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::Timer;

/// Trailing debounce: a burst of calls collapses into one run of the action,
/// with the last call's argument, once `wait` ms pass without another call.
pub struct Debounce<T: Timer, A> {
    timer: T,
    wait: u32,
    action: Rc<dyn Fn(A)>,
    pending: RefCell<Option<T::Handle>>,
}

pub fn debounce<T, A, F>(timer: T, wait: u32, action: F) -> Debounce<T, A>
where
    T: Timer,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounce::new(timer, wait, action)
}

impl<T: Timer, A: 'static> Debounce<T, A> {
    pub fn new(timer: T, wait: u32, action: impl Fn(A) + 'static) -> Self {
        Self {
            timer,
            wait,
            action: Rc::new(action),
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self, arg: A) {
        let action = Rc::clone(&self.action);
        let handle = self.timer.schedule(self.wait, Box::new(move || action(arg)));
        // the replaced handle is dropped here, which cancels it
        self.pending.replace(Some(handle));
    }
}
