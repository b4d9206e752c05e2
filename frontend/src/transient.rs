use crate::timer::Timer;

/// Something that can take itself out of the page.
pub trait Detach {
    fn detach(&self);
}

impl Detach for web_sys::Element {
    fn detach(&self) {
        self.remove();
    }
}

/// A node that lives for a fixed time and is then detached, whether or not
/// its animation ever reports completion.
pub struct Transient;

impl Transient {
    pub fn spawn<T, N>(timer: &T, node: N, millis: u32)
    where
        T: Timer,
        N: Detach + 'static,
    {
        let handle = timer.schedule(millis, Box::new(move || node.detach()));
        timer.detach(handle);
    }
}
