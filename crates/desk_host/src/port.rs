//! Long-lived message port to a connected page.

use std::{cell::RefCell, rc::Rc};

use desk_api_contract::DeskEvent;

/// Host port over which desk events are pushed to the page that connected.
pub trait EventPort {
    /// Posts one event envelope.
    ///
    /// # Errors
    ///
    /// Returns an error once the page has disconnected.
    fn post_message(&self, event: &DeskEvent) -> Result<(), String>;
}

#[derive(Debug, Default)]
struct MemoryEventPortState {
    posted: Vec<DeskEvent>,
    disconnected: bool,
}

#[derive(Debug, Clone, Default)]
/// In-memory port recording posted envelopes.
pub struct MemoryEventPort {
    inner: Rc<RefCell<MemoryEventPortState>>,
}

impl MemoryEventPort {
    /// Envelopes posted so far, in order.
    pub fn posted(&self) -> Vec<DeskEvent> {
        self.inner.borrow().posted.clone()
    }

    /// Simulates the page closing the port.
    pub fn disconnect(&self) {
        self.inner.borrow_mut().disconnected = true;
    }
}

impl EventPort for MemoryEventPort {
    fn post_message(&self, event: &DeskEvent) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if state.disconnected {
            return Err("port is disconnected".to_string());
        }
        state.posted.push(event.clone());
        Ok(())
    }
}
