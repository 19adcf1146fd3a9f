// host.rs - Listener and frame bookkeeping for a mounted surface
//
// Every registration goes through one `Registrations` value so teardown
// undoes all of it at once: listeners removed, pending frame cancelled,
// frame callback dropped so the loop can't re-arm. The page window
// implements `EventHost` in web.rs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub trait EventHost {
    type Callback;
    type Error;

    fn listen(&self, event: &'static str, cb: &Self::Callback) -> Result<(), Self::Error>;
    fn unlisten(&self, event: &'static str, cb: &Self::Callback);
    fn request_frame(&self, cb: &Self::Callback) -> Result<i32, Self::Error>;
    fn cancel_frame(&self, id: i32);
}

/// Frame callback slot, shared with the callback so it can re-arm itself
pub struct FrameLoop<C> {
    slot: RefCell<Option<C>>,
    id: Cell<Option<i32>>,
}

impl<C> FrameLoop<C> {
    pub fn new() -> Rc<Self> {
        Rc::new(Self { slot: RefCell::new(None), id: Cell::new(None) })
    }

    pub fn set(&self, cb: C) {
        *self.slot.borrow_mut() = Some(cb);
    }

    /// Request the next frame. Once stopped this is a no-op returning false.
    pub fn arm<H: EventHost<Callback = C>>(&self, host: &H) -> Result<bool, H::Error> {
        let slot = self.slot.borrow();
        let Some(cb) = slot.as_ref() else { return Ok(false) };
        self.id.set(Some(host.request_frame(cb)?));
        Ok(true)
    }

    pub fn is_armed(&self) -> bool {
        self.id.get().is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.slot.borrow().is_none()
    }

    fn stop<H: EventHost<Callback = C>>(&self, host: &H) {
        if let Some(id) = self.id.take() {
            host.cancel_frame(id);
        }
        // Dropping the callback breaks its reference back to this loop
        let cb = self.slot.borrow_mut().take();
        drop(cb);
    }
}

pub struct Registrations<H: EventHost> {
    host: H,
    listeners: Vec<(&'static str, H::Callback)>,
    frames: Rc<FrameLoop<H::Callback>>,
    released: bool,
}

impl<H: EventHost> Registrations<H> {
    pub fn new(host: H, frames: Rc<FrameLoop<H::Callback>>) -> Self {
        Self { host, listeners: Vec::new(), frames, released: false }
    }

    /// Register `cb` for `event`; kept alive until release
    pub fn listen(&mut self, event: &'static str, cb: H::Callback) -> Result<(), H::Error> {
        self.host.listen(event, &cb)?;
        self.listeners.push((event, cb));
        Ok(())
    }

    /// Schedule the first frame
    pub fn start(&self) -> Result<bool, H::Error> {
        self.frames.arm(&self.host)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frames(&self) -> &FrameLoop<H::Callback> {
        &self.frames
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release(&mut self) {
        if self.released { return; }
        self.released = true;

        for (event, cb) in self.listeners.drain(..) {
            self.host.unlisten(event, &cb);
        }
        self.frames.stop(&self.host);
    }
}

impl<H: EventHost> Drop for Registrations<H> {
    fn drop(&mut self) {
        self.release();
    }
}
