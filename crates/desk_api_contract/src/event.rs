//! Desk lifecycle event envelope pushed over a connected port.

use serde::{Deserialize, Serialize};

/// Event tag carried in an envelope's `eventName` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A desk was created.
    DeskAdded,
    /// A desk was removed.
    DeskRemoved,
    /// The active desk changed.
    DeskSwitched,
    /// A removed desk was restored through undo.
    DeskUndone,
}

impl EventType {
    /// Returns the wire token for this event type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeskAdded => "DeskAdded",
            Self::DeskRemoved => "DeskRemoved",
            Self::DeskSwitched => "DeskSwitched",
            Self::DeskUndone => "DeskUndone",
        }
    }
}

/// Payload of single-desk events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskIdData {
    /// Affected desk.
    pub desk_id: String,
}

/// Payload of [`EventType::DeskSwitched`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSwitchData {
    /// Desk that became active.
    pub activated: String,
    /// Desk that was active before the switch.
    pub deactivated: String,
}

/// `{eventName, data}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventName", content = "data")]
pub enum DeskEvent {
    /// See [`EventType::DeskAdded`].
    DeskAdded(DeskIdData),
    /// See [`EventType::DeskRemoved`].
    DeskRemoved(DeskIdData),
    /// See [`EventType::DeskSwitched`].
    DeskSwitched(DeskSwitchData),
    /// See [`EventType::DeskUndone`].
    DeskUndone(DeskIdData),
}

impl DeskEvent {
    /// Returns the envelope's event tag.
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::DeskAdded(_) => EventType::DeskAdded,
            Self::DeskRemoved(_) => EventType::DeskRemoved,
            Self::DeskSwitched(_) => EventType::DeskSwitched,
            Self::DeskUndone(_) => EventType::DeskUndone,
        }
    }
}
