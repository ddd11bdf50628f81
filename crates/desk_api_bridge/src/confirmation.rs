//! Notification-gated desk removal.
//!
//! A removal request moves through
//! `Validating -> (SkipConfirmation | AwaitingDeskLookup) -> AwaitingUserConfirmation ->
//! (Accepted -> Removing -> Done) | (Rejected -> Failed)`. Only one confirmation can be pending:
//! every confirmation reuses the configured notification id and clears it first, which closes
//! the click listener of any confirmation it supersedes.

use desk_api_contract::{
    ConfirmationSetting, DeskApiError, DeskApiResponse, RemoveDeskOperands,
    DESK_NOT_FOUND_MESSAGE, EXCLUSIVE_REMOVE_OPTIONS_MESSAGE,
};
use tracing::{debug, info, warn};

use crate::bridge::DeskApiBridge;

/// Button index that accepts the removal.
pub const ACCEPT_BUTTON_INDEX: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemovalStage {
    Validating,
    SkipConfirmation,
    AwaitingDeskLookup,
    AwaitingUserConfirmation,
    Accepted,
    Rejected,
    Removing,
    Done,
}

fn enter(desk_id: &str, stage: RemovalStage) {
    debug!(desk_id, ?stage, "desk removal");
}

/// Checks removal operands before any host call and returns the target desk.
///
/// # Errors
///
/// Returns a validation error when the desk id is missing or empty, or when `allowUndo` and
/// `combineDesks` are both requested.
pub fn validate_removal(operands: &RemoveDeskOperands) -> Result<&str, DeskApiError> {
    let desk_id = operands
        .desk_id
        .as_deref()
        .filter(|desk_id| !desk_id.is_empty())
        .ok_or_else(|| DeskApiError::Validation(DESK_NOT_FOUND_MESSAGE.to_string()))?;
    if operands.options.is_contradictory() {
        return Err(DeskApiError::Validation(
            EXCLUSIVE_REMOVE_OPTIONS_MESSAGE.to_string(),
        ));
    }
    Ok(desk_id)
}

impl DeskApiBridge {
    /// Removes a desk, asking the user first unless the caller skips confirmation.
    ///
    /// # Errors
    ///
    /// Returns validation errors before any host call, host or unsupported errors from the
    /// lookup, notification, or removal calls, and [`DeskApiError::UserCancelled`] when the
    /// user declines, dismisses, or a newer confirmation supersedes this one.
    pub async fn remove_desk(
        &self,
        operands: &RemoveDeskOperands,
    ) -> Result<DeskApiResponse, DeskApiError> {
        enter(operands.desk_id.as_deref().unwrap_or_default(), RemovalStage::Validating);
        let desk_id = validate_removal(operands)?;

        if operands.skips_confirmation() {
            enter(desk_id, RemovalStage::SkipConfirmation);
        } else {
            enter(desk_id, RemovalStage::AwaitingDeskLookup);
            self.desks.get_desk_by_id(desk_id).await?;
            self.confirm_removal(desk_id, operands.confirmation_setting.as_ref())
                .await?;
        }

        enter(desk_id, RemovalStage::Removing);
        self.desks.remove_desk(desk_id, operands.options).await?;
        enter(desk_id, RemovalStage::Done);
        info!(desk_id, "desk removed");
        Ok(DeskApiResponse::empty_success())
    }

    async fn confirm_removal(
        &self,
        desk_id: &str,
        setting: Option<&ConfirmationSetting>,
    ) -> Result<(), DeskApiError> {
        enter(desk_id, RemovalStage::AwaitingUserConfirmation);
        let notification_id = self.config.confirmation.notification_id.as_str();
        let generation = self.confirmation_generation.get().wrapping_add(1);
        self.confirmation_generation.set(generation);

        self.notifications.clear(notification_id).await?;
        let clicked = self.notifications.wait_for_button_click(notification_id)?;
        let options = self.config.confirmation.notification_options(setting);
        self.notifications.create(notification_id, &options).await?;

        let button = clicked.await;

        if self.confirmation_generation.get() == generation {
            if let Err(err) = self.notifications.clear(notification_id).await {
                warn!(desk_id, error = %err, "failed to clear removal confirmation");
            }
        } else {
            debug!(desk_id, "removal confirmation was superseded");
        }

        match button {
            Some(ACCEPT_BUTTON_INDEX) => {
                enter(desk_id, RemovalStage::Accepted);
                Ok(())
            }
            other => {
                enter(desk_id, RemovalStage::Rejected);
                debug!(desk_id, button = ?other, "user declined desk removal");
                Err(DeskApiError::UserCancelled)
            }
        }
    }
}
