//! In-memory desk service used by tests and headless hosts.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use desk_api_contract::{Desk, LaunchOptions, RemoveDeskOptions, WindowProperties};
use futures::channel::mpsc::{self, UnboundedSender};

use super::service::{DeskEventStream, DeskHostEvent, DeskService, DeskServiceFuture};

#[derive(Debug, Default)]
struct MemoryDeskState {
    desks: Vec<Desk>,
    active: Option<String>,
    next_desk: u64,
    undoable: Vec<Desk>,
    removals: Vec<(String, RemoveDeskOptions)>,
    windows: BTreeMap<i32, WindowProperties>,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, String>,
    subscribers: Vec<UnboundedSender<DeskHostEvent>>,
}

impl MemoryDeskState {
    fn record(&mut self, method: &'static str) -> Result<(), String> {
        self.calls.push(method);
        match self.failures.remove(method) {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }

    fn position(&self, desk_id: &str) -> Option<usize> {
        self.desks.iter().position(|desk| desk.desk_uuid == desk_id)
    }
}

fn not_found(desk_id: &str) -> String {
    format!("desk not found: {desk_id}")
}

#[derive(Debug, Clone, Default)]
/// In-memory window manager tracking desks, the active desk, and window properties.
///
/// Every host call is recorded so tests can assert which calls were (not) made, and a single
/// failure can be injected per method with [`MemoryDeskService::fail_next`].
pub struct MemoryDeskService {
    inner: Rc<RefCell<MemoryDeskState>>,
}

impl MemoryDeskService {
    /// Creates a window manager holding `desks`; the first one is active.
    pub fn with_desks(desks: impl IntoIterator<Item = Desk>) -> Self {
        let desks: Vec<Desk> = desks.into_iter().collect();
        let state = MemoryDeskState {
            active: desks.first().map(|desk| desk.desk_uuid.clone()),
            next_desk: desks.len() as u64,
            desks,
            ..MemoryDeskState::default()
        };
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    /// Current desks in host order.
    pub fn desks(&self) -> Vec<Desk> {
        self.inner.borrow().desks.clone()
    }

    /// Active desk UUID.
    pub fn active_desk(&self) -> Option<String> {
        self.inner.borrow().active.clone()
    }

    /// Host methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.borrow().calls.clone()
    }

    /// Number of calls made to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|call| **call == method)
            .count()
    }

    /// Successful removals with the options they were issued with.
    pub fn removals(&self) -> Vec<(String, RemoveDeskOptions)> {
        self.inner.borrow().removals.clone()
    }

    /// Properties last applied to `window_id`.
    pub fn window_properties(&self, window_id: i32) -> Option<WindowProperties> {
        self.inner.borrow().windows.get(&window_id).copied()
    }

    /// Makes the next call to `method` fail with `message`.
    pub fn fail_next(&self, method: &'static str, message: impl Into<String>) {
        self.inner
            .borrow_mut()
            .failures
            .insert(method, message.into());
    }

    /// Restores a desk removed with `allowUndo`, emitting an undo-flavoured add event.
    pub fn undo_removal(&self, desk_id: &str) -> bool {
        let restored = {
            let mut state = self.inner.borrow_mut();
            let Some(index) = state
                .undoable
                .iter()
                .position(|desk| desk.desk_uuid == desk_id)
            else {
                return false;
            };
            let desk = state.undoable.remove(index);
            state.desks.push(desk);
            true
        };
        self.emit(DeskHostEvent::Added {
            desk_id: desk_id.to_string(),
            from_undo: true,
        });
        restored
    }

    /// Delivers `event` to every live subscriber.
    pub fn emit(&self, event: DeskHostEvent) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|subscriber| subscriber.unbounded_send(event.clone()).is_ok());
    }

    /// Closes every subscriber stream, as a host does when it shuts down.
    pub fn close_event_streams(&self) {
        self.inner.borrow_mut().subscribers.clear();
    }

    fn emit_all(&self, events: Vec<DeskHostEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

impl DeskService for MemoryDeskService {
    fn launch_desk<'a>(
        &'a self,
        options: &'a LaunchOptions,
    ) -> DeskServiceFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let desk_id = {
                let mut state = self.inner.borrow_mut();
                state.record("launchDesk")?;
                state.next_desk += 1;
                let desk_id = format!("desk-{}", state.next_desk);
                let name = options
                    .desk_name
                    .clone()
                    .unwrap_or_else(|| format!("Desk {}", state.next_desk));
                state.desks.push(Desk::named(desk_id.clone(), name));
                desk_id
            };
            self.emit(DeskHostEvent::Added {
                desk_id: desk_id.clone(),
                from_undo: false,
            });
            Ok(desk_id)
        })
    }

    fn remove_desk<'a>(
        &'a self,
        desk_id: &'a str,
        options: RemoveDeskOptions,
    ) -> DeskServiceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let events = {
                let mut state = self.inner.borrow_mut();
                state.record("removeDesk")?;
                let index = state.position(desk_id).ok_or_else(|| not_found(desk_id))?;
                if state.desks.len() == 1 {
                    return Err("cannot remove the last desk".to_string());
                }
                let removed = state.desks.remove(index);
                if options.allows_undo() {
                    state.undoable.push(removed);
                }
                state.removals.push((desk_id.to_string(), options));

                let mut events = vec![DeskHostEvent::Removed {
                    desk_id: desk_id.to_string(),
                }];
                if state.active.as_deref() == Some(desk_id) {
                    let fallback = state.desks[index.saturating_sub(1)].desk_uuid.clone();
                    state.active = Some(fallback.clone());
                    events.push(DeskHostEvent::Switched {
                        activated: fallback,
                        deactivated: desk_id.to_string(),
                    });
                }
                events
            };
            self.emit_all(events);
            Ok(())
        })
    }

    fn set_window_properties<'a>(
        &'a self,
        window_id: i32,
        properties: WindowProperties,
    ) -> DeskServiceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.record("setWindowProperties")?;
            state.windows.insert(window_id, properties);
            Ok(())
        })
    }

    fn get_active_desk<'a>(&'a self) -> DeskServiceFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.record("getActiveDesk")?;
            state
                .active
                .clone()
                .ok_or_else(|| "no active desk".to_string())
        })
    }

    fn switch_desk<'a>(&'a self, desk_id: &'a str) -> DeskServiceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let switched = {
                let mut state = self.inner.borrow_mut();
                state.record("switchDesk")?;
                state.position(desk_id).ok_or_else(|| not_found(desk_id))?;
                let previous = state.active.replace(desk_id.to_string());
                match previous {
                    Some(previous) if previous != desk_id => Some(DeskHostEvent::Switched {
                        activated: desk_id.to_string(),
                        deactivated: previous,
                    }),
                    _ => None,
                }
            };
            if let Some(event) = switched {
                self.emit(event);
            }
            Ok(())
        })
    }

    fn get_desk_by_id<'a>(
        &'a self,
        desk_id: &'a str,
    ) -> DeskServiceFuture<'a, Result<Desk, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.record("getDeskByID")?;
            let index = state.position(desk_id).ok_or_else(|| not_found(desk_id))?;
            Ok(state.desks[index].clone())
        })
    }

    fn get_all_desks<'a>(&'a self) -> DeskServiceFuture<'a, Result<Vec<Desk>, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.record("getAllDesks")?;
            Ok(state.desks.clone())
        })
    }

    fn subscribe_events(&self) -> Result<DeskEventStream, String> {
        let (tx, rx) = mpsc::unbounded();
        self.inner.borrow_mut().subscribers.push(tx);
        Ok(Box::pin(rx))
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, StreamExt};
    use pretty_assertions::assert_eq;

    use super::*;

    fn two_desks() -> MemoryDeskService {
        MemoryDeskService::with_desks([Desk::named("a", "Home"), Desk::named("b", "Work")])
    }

    #[test]
    fn launch_appends_named_desk_and_emits_added() {
        let service = two_desks();
        let mut events = service.subscribe_events().expect("subscribe");

        let desk_id = block_on(service.launch_desk(&LaunchOptions {
            template_uuid: None,
            desk_name: Some("Focus".to_string()),
        }))
        .expect("launch");

        assert_eq!(desk_id, "desk-3");
        assert_eq!(service.desks().last(), Some(&Desk::named("desk-3", "Focus")));
        assert_eq!(
            block_on(events.next()),
            Some(DeskHostEvent::Added {
                desk_id: "desk-3".to_string(),
                from_undo: false,
            })
        );
    }

    #[test]
    fn removing_active_desk_activates_neighbour() {
        let service = two_desks();
        let mut events = service.subscribe_events().expect("subscribe");

        block_on(service.remove_desk("a", RemoveDeskOptions::default())).expect("remove");

        assert_eq!(service.active_desk(), Some("b".to_string()));
        assert_eq!(
            block_on(events.next()),
            Some(DeskHostEvent::Removed {
                desk_id: "a".to_string()
            })
        );
        assert_eq!(
            block_on(events.next()),
            Some(DeskHostEvent::Switched {
                activated: "b".to_string(),
                deactivated: "a".to_string(),
            })
        );
    }

    #[test]
    fn last_desk_cannot_be_removed() {
        let service = MemoryDeskService::with_desks([Desk::new("only")]);
        let err = block_on(service.remove_desk("only", RemoveDeskOptions::default()))
            .expect_err("last desk");
        assert_eq!(err, "cannot remove the last desk");
        assert!(service.removals().is_empty());
    }

    #[test]
    fn undo_restores_desk_removed_with_allow_undo() {
        let service = two_desks();
        let options = RemoveDeskOptions {
            combine_desks: None,
            allow_undo: Some(true),
        };
        block_on(service.remove_desk("b", options)).expect("remove");
        let mut events = service.subscribe_events().expect("subscribe");

        assert!(service.undo_removal("b"));
        assert!(!service.undo_removal("b"));
        assert_eq!(
            block_on(events.next()),
            Some(DeskHostEvent::Added {
                desk_id: "b".to_string(),
                from_undo: true,
            })
        );
    }

    #[test]
    fn injected_failure_applies_once_and_is_recorded() {
        let service = two_desks();
        service.fail_next("getActiveDesk", "host exploded");

        assert_eq!(
            block_on(service.get_active_desk()).expect_err("injected"),
            "host exploded"
        );
        assert_eq!(
            block_on(service.get_active_desk()).expect("active"),
            "a".to_string()
        );
        assert_eq!(service.call_count("getActiveDesk"), 2);
    }

    #[test]
    fn switching_to_active_desk_emits_nothing() {
        let service = two_desks();
        let mut events = service.subscribe_events().expect("subscribe");
        block_on(service.switch_desk("a")).expect("switch");
        service.close_event_streams();
        assert_eq!(block_on(events.next()), None);
    }
}
