//! Request envelope and per-operation operand payloads.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::DeskApiError;

/// Operation tag carried in a request's `messageType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    /// Create a desk, optionally from a saved template.
    LaunchDesk,
    /// Remove a desk, usually behind a user confirmation.
    RemoveDesk,
    /// Change window-level desk properties such as all-desks visibility.
    SetWindowProperties,
    /// Look up the active desk.
    GetActiveDesk,
    /// Activate a desk.
    SwitchDesk,
    /// Look up a desk by UUID.
    #[serde(rename = "GetDeskByID")]
    GetDeskById,
    /// List every desk.
    GetAllDesks,
}

impl RequestType {
    /// Every request type in wire order.
    pub const ALL: [Self; 7] = [
        Self::LaunchDesk,
        Self::RemoveDesk,
        Self::SetWindowProperties,
        Self::GetActiveDesk,
        Self::SwitchDesk,
        Self::GetDeskById,
        Self::GetAllDesks,
    ];

    /// Returns the wire token for this request type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LaunchDesk => "LaunchDesk",
            Self::RemoveDesk => "RemoveDesk",
            Self::SetWindowProperties => "SetWindowProperties",
            Self::GetActiveDesk => "GetActiveDesk",
            Self::SwitchDesk => "SwitchDesk",
            Self::GetDeskById => "GetDeskByID",
            Self::GetAllDesks => "GetAllDesks",
        }
    }

    /// Parses a wire token.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// Operands for [`RequestType::LaunchDesk`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptions {
    /// Saved desk template to instantiate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_uuid: Option<String>,
    /// Name for the new desk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk_name: Option<String>,
}

/// Host-side removal policy for [`RequestType::RemoveDesk`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDeskOptions {
    /// Move the removed desk's windows onto a neighbouring desk instead of closing them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine_desks: Option<bool>,
    /// Keep the removed desk restorable for a short undo window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_undo: Option<bool>,
}

impl RemoveDeskOptions {
    /// Returns whether windows are combined into another desk.
    pub fn combines_desks(&self) -> bool {
        self.combine_desks.unwrap_or(false)
    }

    /// Returns whether undo is requested.
    pub fn allows_undo(&self) -> bool {
        self.allow_undo.unwrap_or(false)
    }

    /// `allowUndo` and `combineDesks` are mutually exclusive.
    pub fn is_contradictory(&self) -> bool {
        self.combines_desks() && self.allows_undo()
    }
}

/// Caller overrides for the removal confirmation notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationSetting {
    /// Notification title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Notification body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Notification icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Label of the accepting (first) button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_message: Option<String>,
    /// Label of the rejecting (second) button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_message: Option<String>,
}

/// Operands for [`RequestType::RemoveDesk`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDeskOperands {
    /// Desk to remove.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk_id: Option<String>,
    /// Host removal policy.
    #[serde(default)]
    pub options: RemoveDeskOptions,
    /// Remove without asking the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_confirmation: Option<bool>,
    /// Confirmation notification overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_setting: Option<ConfirmationSetting>,
}

impl RemoveDeskOperands {
    /// Operands removing `desk_id` with default options.
    pub fn for_desk(desk_id: impl Into<String>) -> Self {
        Self {
            desk_id: Some(desk_id.into()),
            ..Self::default()
        }
    }

    /// Returns whether the confirmation notification is bypassed.
    pub fn skips_confirmation(&self) -> bool {
        self.skip_confirmation.unwrap_or(false)
    }
}

/// Window-level desk properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowProperties {
    /// Show the window on every desk.
    pub all_desks: bool,
}

/// Operands for [`RequestType::SetWindowProperties`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWindowPropertiesOperands {
    /// Target window. Falls back to the sender's tab when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<i32>,
    /// Show the window on every desk.
    pub all_desks: bool,
}

impl SetWindowPropertiesOperands {
    /// Properties forwarded to the host.
    pub fn properties(&self) -> WindowProperties {
        WindowProperties {
            all_desks: self.all_desks,
        }
    }
}

/// Operands for requests addressing a single desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskIdOperands {
    /// Target desk UUID.
    pub desk_id: String,
}

impl DeskIdOperands {
    /// Creates operands for `desk_id`.
    pub fn new(desk_id: impl Into<String>) -> Self {
        Self {
            desk_id: desk_id.into(),
        }
    }
}

/// Typed request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "messageType", content = "operands")]
pub enum DeskApiRequest {
    /// See [`RequestType::LaunchDesk`].
    LaunchDesk(LaunchOptions),
    /// See [`RequestType::RemoveDesk`].
    RemoveDesk(RemoveDeskOperands),
    /// See [`RequestType::SetWindowProperties`].
    SetWindowProperties(SetWindowPropertiesOperands),
    /// See [`RequestType::GetActiveDesk`].
    GetActiveDesk,
    /// See [`RequestType::SwitchDesk`].
    SwitchDesk(DeskIdOperands),
    /// See [`RequestType::GetDeskById`].
    #[serde(rename = "GetDeskByID")]
    GetDeskById(DeskIdOperands),
    /// See [`RequestType::GetAllDesks`].
    GetAllDesks,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    message_type: Option<String>,
    #[serde(default)]
    operands: Option<Value>,
}

impl DeskApiRequest {
    /// Returns the request's operation tag.
    pub const fn request_type(&self) -> RequestType {
        match self {
            Self::LaunchDesk(_) => RequestType::LaunchDesk,
            Self::RemoveDesk(_) => RequestType::RemoveDesk,
            Self::SetWindowProperties(_) => RequestType::SetWindowProperties,
            Self::GetActiveDesk => RequestType::GetActiveDesk,
            Self::SwitchDesk(_) => RequestType::SwitchDesk,
            Self::GetDeskById(_) => RequestType::GetDeskById,
            Self::GetAllDesks => RequestType::GetAllDesks,
        }
    }

    /// Parses a raw request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`DeskApiError::Protocol`] when the envelope is not an object or its
    /// `messageType` is missing or unknown, and [`DeskApiError::Validation`] when the operands
    /// of a known request type are malformed.
    pub fn from_value(value: Value) -> Result<Self, DeskApiError> {
        let raw: RawRequest = serde_json::from_value(value)
            .map_err(|err| DeskApiError::Protocol(format!("malformed request envelope: {err}")))?;
        let Some(message_type) = raw.message_type else {
            return Err(DeskApiError::Protocol(
                "request is missing messageType".to_string(),
            ));
        };
        let Some(kind) = RequestType::parse(&message_type) else {
            return Err(DeskApiError::Protocol(format!(
                "unknown message type: {message_type}"
            )));
        };
        let operands = raw.operands.unwrap_or(Value::Null);

        Ok(match kind {
            RequestType::LaunchDesk => Self::LaunchDesk(optional_operands(kind, operands)?),
            RequestType::RemoveDesk => Self::RemoveDesk(optional_operands(kind, operands)?),
            RequestType::SetWindowProperties => {
                Self::SetWindowProperties(required_operands(kind, operands)?)
            }
            RequestType::GetActiveDesk => Self::GetActiveDesk,
            RequestType::SwitchDesk => Self::SwitchDesk(required_operands(kind, operands)?),
            RequestType::GetDeskById => Self::GetDeskById(required_operands(kind, operands)?),
            RequestType::GetAllDesks => Self::GetAllDesks,
        })
    }

    /// Parses a raw JSON request string.
    ///
    /// # Errors
    ///
    /// See [`DeskApiRequest::from_value`]; text that is not JSON is a protocol error.
    pub fn from_json_str(raw: &str) -> Result<Self, DeskApiError> {
        let value = serde_json::from_str(raw)
            .map_err(|err| DeskApiError::Protocol(format!("malformed request envelope: {err}")))?;
        Self::from_value(value)
    }
}

fn optional_operands<T: DeserializeOwned + Default>(
    kind: RequestType,
    operands: Value,
) -> Result<T, DeskApiError> {
    if operands.is_null() {
        return Ok(T::default());
    }
    required_operands(kind, operands)
}

fn required_operands<T: DeserializeOwned>(
    kind: RequestType,
    operands: Value,
) -> Result<T, DeskApiError> {
    serde_json::from_value(operands).map_err(|err| {
        DeskApiError::validation(format!("invalid operands for {}: {err}", kind.as_str()))
    })
}
