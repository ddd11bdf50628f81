//! Desk lifecycle event relay to a connected page.

use std::rc::Rc;

use desk_api_contract::{DeskEvent, DeskIdData, DeskSwitchData};
use desk_host::{DeskEventStream, DeskHostEvent, EventPort};
use futures::StreamExt;
use tracing::{debug, warn};

/// Why a relay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStop {
    /// The page closed its port.
    PortDisconnected,
    /// The host closed the event stream.
    HostClosed,
}

/// Outcome of [`EventRelay::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    /// Envelopes successfully posted.
    pub relayed: usize,
    /// Stop reason.
    pub stop: RelayStop,
}

/// Reshapes a host callback into the `{eventName, data}` envelope.
pub fn envelope(event: DeskHostEvent) -> DeskEvent {
    match event {
        DeskHostEvent::Added {
            desk_id,
            from_undo: true,
        } => DeskEvent::DeskUndone(DeskIdData { desk_id }),
        DeskHostEvent::Added { desk_id, .. } => DeskEvent::DeskAdded(DeskIdData { desk_id }),
        DeskHostEvent::Removed { desk_id } => DeskEvent::DeskRemoved(DeskIdData { desk_id }),
        DeskHostEvent::Switched {
            activated,
            deactivated,
        } => DeskEvent::DeskSwitched(DeskSwitchData {
            activated,
            deactivated,
        }),
    }
}

/// Forwards host desk events to one connected page, in host delivery order and without
/// buffering.
pub struct EventRelay {
    events: DeskEventStream,
    port: Rc<dyn EventPort>,
}

impl EventRelay {
    /// Relays `events` to `port`.
    pub fn new(events: DeskEventStream, port: Rc<dyn EventPort>) -> Self {
        Self { events, port }
    }

    /// Runs until the port disconnects or the host stream ends.
    pub async fn run(mut self) -> RelaySummary {
        let mut relayed = 0;
        while let Some(event) = self.events.next().await {
            let message = envelope(event);
            if let Err(err) = self.port.post_message(&message) {
                warn!(error = %err, relayed, "desk event port disconnected");
                return RelaySummary {
                    relayed,
                    stop: RelayStop::PortDisconnected,
                };
            }
            relayed += 1;
            debug!(event = message.event_type().as_str(), "relayed desk event");
        }
        debug!(relayed, "desk event stream closed");
        RelaySummary {
            relayed,
            stop: RelayStop::HostClosed,
        }
    }
}

#[cfg(test)]
mod tests {
    use desk_host::MemoryEventPort;
    use futures::{executor::block_on, stream};
    use pretty_assertions::assert_eq;

    use super::*;

    fn added(desk_id: &str, from_undo: bool) -> DeskHostEvent {
        DeskHostEvent::Added {
            desk_id: desk_id.to_string(),
            from_undo,
        }
    }

    #[test]
    fn added_from_undo_becomes_desk_undone() {
        assert_eq!(
            envelope(added("d", true)),
            DeskEvent::DeskUndone(DeskIdData {
                desk_id: "d".to_string()
            })
        );
        assert_eq!(
            envelope(added("d", false)),
            DeskEvent::DeskAdded(DeskIdData {
                desk_id: "d".to_string()
            })
        );
    }

    #[test]
    fn relays_in_host_order_until_stream_ends() {
        let port = MemoryEventPort::default();
        let events: DeskEventStream = Box::pin(stream::iter(vec![
            added("n", false),
            DeskHostEvent::Switched {
                activated: "n".to_string(),
                deactivated: "a".to_string(),
            },
            DeskHostEvent::Removed {
                desk_id: "a".to_string(),
            },
        ]));

        let summary = block_on(EventRelay::new(events, Rc::new(port.clone())).run());

        assert_eq!(
            summary,
            RelaySummary {
                relayed: 3,
                stop: RelayStop::HostClosed,
            }
        );
        let names: Vec<&str> = port
            .posted()
            .iter()
            .map(|event| event.event_type().as_str())
            .collect();
        assert_eq!(names, vec!["DeskAdded", "DeskSwitched", "DeskRemoved"]);
    }

    #[test]
    fn stops_when_port_disconnects() {
        let port = MemoryEventPort::default();
        port.disconnect();
        let events: DeskEventStream = Box::pin(stream::iter(vec![added("n", false)]));

        let summary = block_on(EventRelay::new(events, Rc::new(port.clone())).run());

        assert_eq!(summary.stop, RelayStop::PortDisconnected);
        assert_eq!(summary.relayed, 0);
        assert!(port.posted().is_empty());
    }
}
