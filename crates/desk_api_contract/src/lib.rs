//! Wire contracts shared by the desk API bridge, its host adapters, and connecting pages.
//!
//! This crate is intentionally runtime-agnostic. It defines the request/response envelopes
//! exchanged over the external-message channel, the event envelope pushed over a connected
//! port, the operand payloads of each operation, and the tagged error type surfaced by the
//! bridge. Field names use camelCase on the wire.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod error;
mod event;
mod request;
mod response;

use serde::{Deserialize, Serialize};

pub use error::{
    DeskApiError, DeskApiErrorKind, DESK_NOT_FOUND_MESSAGE, EXCLUSIVE_REMOVE_OPTIONS_MESSAGE,
};
pub use event::{DeskEvent, DeskIdData, DeskSwitchData, EventType};
pub use request::{
    ConfirmationSetting, DeskApiRequest, DeskIdOperands, LaunchOptions, RemoveDeskOperands,
    RemoveDeskOptions, RequestType, SetWindowPropertiesOperands, WindowProperties,
};
pub use response::{DeskApiResponse, ResponseOperands, ResponseType};

/// Virtual desk reference. Desks are owned by the host window manager and only referenced
/// here by UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desk {
    /// Host-assigned desk UUID.
    pub desk_uuid: String,
    /// User-visible desk name, when the host reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk_name: Option<String>,
}

impl Desk {
    /// Creates a desk reference with no name.
    pub fn new(desk_uuid: impl Into<String>) -> Self {
        Self {
            desk_uuid: desk_uuid.into(),
            desk_name: None,
        }
    }

    /// Creates a named desk reference.
    pub fn named(desk_uuid: impl Into<String>, desk_name: impl Into<String>) -> Self {
        Self {
            desk_uuid: desk_uuid.into(),
            desk_name: Some(desk_name.into()),
        }
    }
}

/// Metadata describing the page that sent a request over the external-message channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSender {
    /// Tab hosting the sending page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<i32>,
    /// Window hosting the sending tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<i32>,
    /// Origin of the sending page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl MessageSender {
    /// Sender metadata for a page running in `tab_id`.
    pub fn from_tab(tab_id: i32) -> Self {
        Self {
            tab_id: Some(tab_id),
            ..Self::default()
        }
    }
}
