//! Typed host-service contracts for the desk API bridge.
//!
//! This crate is the boundary between the bridge and the privileged window-manager host. It
//! exposes the desk, notification, and event-port service traits, the capability snapshot the
//! bridge consults before calling the host, and no-op plus in-memory adapters for tests and
//! targets without a window manager.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod desks;
pub mod host;
pub mod notifications;
pub mod port;

pub use desks::memory::MemoryDeskService;
pub use desks::service::{
    DeskEventStream, DeskHostEvent, DeskService, DeskServiceFuture, NoopDeskService,
};
pub use host::{CapabilityStatus, DeskApiCapabilities, DeskHostServices, HostOperation};
pub use notifications::service::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationOptions,
    NotificationService,
};
pub use port::{EventPort, MemoryEventPort};
