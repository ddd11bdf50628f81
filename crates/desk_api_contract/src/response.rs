//! Response envelope returned over the external-message channel.

use serde::{Deserialize, Serialize};

use crate::{Desk, DeskApiError};

/// Outcome tag carried in a response's `messageType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    /// The operation completed.
    OperationSuccess,
    /// The operation failed; see `errorMessage`.
    OperationFailure,
}

/// Type-specific success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOperands {
    /// A single desk, e.g. from `LaunchDesk` or `GetDeskByID`.
    Desk(Desk),
    /// A list of desks. Operations with no result reply with the empty list.
    Desks(Vec<Desk>),
}

impl ResponseOperands {
    /// The `[]` payload used by operations with no result.
    pub const fn empty() -> Self {
        Self::Desks(Vec::new())
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskApiResponse {
    /// Outcome tag.
    pub message_type: ResponseType,
    /// Type-specific payload.
    pub operands: ResponseOperands,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DeskApiResponse {
    /// Successful response carrying `operands`.
    pub fn success(operands: ResponseOperands) -> Self {
        Self {
            message_type: ResponseType::OperationSuccess,
            operands,
            error_message: None,
        }
    }

    /// Successful response carrying a single desk.
    pub fn desk(desk: Desk) -> Self {
        Self::success(ResponseOperands::Desk(desk))
    }

    /// Successful response with the empty payload.
    pub fn empty_success() -> Self {
        Self::success(ResponseOperands::empty())
    }

    /// Failure response describing `error`.
    pub fn failure(error: &DeskApiError) -> Self {
        Self {
            message_type: ResponseType::OperationFailure,
            operands: ResponseOperands::empty(),
            error_message: Some(error.to_string()),
        }
    }

    /// Returns whether the response reports success.
    pub fn is_success(&self) -> bool {
        self.message_type == ResponseType::OperationSuccess
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_success_serializes_with_empty_operand_list() {
        assert_eq!(
            serde_json::to_value(DeskApiResponse::empty_success()).expect("serialize"),
            json!({"messageType": "OperationSuccess", "operands": []})
        );
    }

    #[test]
    fn failure_carries_error_message() {
        let response = DeskApiResponse::failure(&DeskApiError::UserCancelled);
        assert!(!response.is_success());
        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({
                "messageType": "OperationFailure",
                "operands": [],
                "errorMessage": "User cancelled desk removal operation"
            })
        );
    }

    #[test]
    fn desk_operands_deserialize_from_object() {
        let response: DeskApiResponse = serde_json::from_value(json!({
            "messageType": "OperationSuccess",
            "operands": {"deskUuid": "d-1", "deskName": "Work"}
        }))
        .expect("deserialize");
        assert_eq!(response, DeskApiResponse::desk(Desk::named("d-1", "Work")));
    }
}
