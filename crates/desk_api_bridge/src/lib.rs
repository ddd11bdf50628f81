//! Desk API bridge: routes page requests to the window-manager host.
//!
//! The bridge answers `{messageType, operands}` requests arriving over the external-message
//! channel, asks the user before removing a desk, and relays desk lifecycle events to pages
//! that open a port. Host services arrive as a [`desk_host::DeskHostServices`] bundle; the
//! bridge holds no global state.
//!
//! Modules:
//! - `bridge`: request dispatch and the external-channel entry points
//! - `confirmation`: the notification-gated removal flow
//! - `adapters`: capability-guarded wrappers over the host traits
//! - `relay`: desk event forwarding
//! - `config`: confirmation defaults and TOML loading

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
mod bridge;
pub mod config;
mod confirmation;
pub mod relay;

pub use adapters::{DeskApi, NotificationApi};
pub use bridge::DeskApiBridge;
pub use config::{BridgeConfig, ConfigError, ConfirmationDefaults};
pub use confirmation::{validate_removal, ACCEPT_BUTTON_INDEX};
pub use relay::{envelope, EventRelay, RelayStop, RelaySummary};
