use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Platform-agnostic events consumed by the loop body.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LoopEvent {
    /// The user or the window system asked the program to stop.
    Quit,

    /// The drawable changed size (physical pixels).
    Resized { width: u32, height: u32 },

    /// Window focus change.
    Focused(bool),

    /// Anything the loop does not interpret.
    Other,
}

impl LoopEvent {
    pub fn is_quit(&self) -> bool {
        matches!(self, LoopEvent::Quit)
    }
}

/// Source of pending events, drained once per frame.
pub trait EventSource {
    /// Pulls platform events into the source. Called once per frame, before draining.
    fn pump(&mut self) {}

    /// Returns the next pending event, or `None` once drained.
    fn poll_event(&mut self) -> Option<LoopEvent>;
}

impl EventSource for VecDeque<LoopEvent> {
    fn poll_event(&mut self) -> Option<LoopEvent> {
        self.pop_front()
    }
}

/// Single-threaded event queue shared between a host callback and a loop body.
///
/// Hosts that receive events through callbacks push into one handle while the
/// body drains another.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<LoopEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: LoopEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll_event(&mut self) -> Option<LoopEvent> {
        self.inner.borrow_mut().pop_front()
    }
}
