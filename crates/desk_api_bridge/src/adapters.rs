//! Capability-guarded adapters over the host desk and notification services.
//!
//! Each call consults the [`DeskApiCapabilities`] snapshot taken at startup and fails with
//! [`DeskApiError::Unsupported`] before touching the host when the operation is missing.
//! Host error text becomes [`DeskApiError::Host`].

use std::rc::Rc;

use desk_api_contract::{Desk, DeskApiError, LaunchOptions, RemoveDeskOptions, WindowProperties};
use desk_host::{
    DeskApiCapabilities, DeskEventStream, DeskService, HostOperation, NotificationFuture,
    NotificationOptions, NotificationService,
};

fn guard(capabilities: &DeskApiCapabilities, op: HostOperation) -> Result<(), DeskApiError> {
    if capabilities.supports(op) {
        Ok(())
    } else {
        Err(DeskApiError::Unsupported {
            method: op.method_name(),
        })
    }
}

/// Desk operations as seen by the bridge.
#[derive(Clone)]
pub struct DeskApi {
    desks: Rc<dyn DeskService>,
    capabilities: DeskApiCapabilities,
}

impl DeskApi {
    /// Wraps `desks` behind `capabilities`.
    pub fn new(desks: Rc<dyn DeskService>, capabilities: DeskApiCapabilities) -> Self {
        Self {
            desks,
            capabilities,
        }
    }

    /// Creates a desk and returns its UUID.
    pub async fn launch_desk(&self, options: &LaunchOptions) -> Result<String, DeskApiError> {
        guard(&self.capabilities, HostOperation::LaunchDesk)?;
        self.desks
            .launch_desk(options)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Removes a desk.
    pub async fn remove_desk(
        &self,
        desk_id: &str,
        options: RemoveDeskOptions,
    ) -> Result<(), DeskApiError> {
        guard(&self.capabilities, HostOperation::RemoveDesk)?;
        self.desks
            .remove_desk(desk_id, options)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Applies window-level desk properties.
    pub async fn set_window_properties(
        &self,
        window_id: i32,
        properties: WindowProperties,
    ) -> Result<(), DeskApiError> {
        guard(&self.capabilities, HostOperation::SetWindowProperties)?;
        self.desks
            .set_window_properties(window_id, properties)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Returns the active desk's UUID.
    pub async fn get_active_desk(&self) -> Result<String, DeskApiError> {
        guard(&self.capabilities, HostOperation::GetActiveDesk)?;
        self.desks
            .get_active_desk()
            .await
            .map_err(DeskApiError::Host)
    }

    /// Activates a desk.
    pub async fn switch_desk(&self, desk_id: &str) -> Result<(), DeskApiError> {
        guard(&self.capabilities, HostOperation::SwitchDesk)?;
        self.desks
            .switch_desk(desk_id)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Looks up a desk.
    pub async fn get_desk_by_id(&self, desk_id: &str) -> Result<Desk, DeskApiError> {
        guard(&self.capabilities, HostOperation::GetDeskById)?;
        self.desks
            .get_desk_by_id(desk_id)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Lists every desk.
    pub async fn get_all_desks(&self) -> Result<Vec<Desk>, DeskApiError> {
        guard(&self.capabilities, HostOperation::GetAllDesks)?;
        self.desks
            .get_all_desks()
            .await
            .map_err(DeskApiError::Host)
    }

    /// Subscribes to desk lifecycle callbacks.
    pub fn subscribe_events(&self) -> Result<DeskEventStream, DeskApiError> {
        guard(&self.capabilities, HostOperation::DeskEvents)?;
        self.desks.subscribe_events().map_err(DeskApiError::Host)
    }
}

/// Notification operations as seen by the bridge.
#[derive(Clone)]
pub struct NotificationApi {
    notifications: Rc<dyn NotificationService>,
    capabilities: DeskApiCapabilities,
}

impl NotificationApi {
    /// Wraps `notifications` behind `capabilities`.
    pub fn new(
        notifications: Rc<dyn NotificationService>,
        capabilities: DeskApiCapabilities,
    ) -> Self {
        Self {
            notifications,
            capabilities,
        }
    }

    /// Shows a notification under `id`.
    pub async fn create(
        &self,
        id: &str,
        options: &NotificationOptions,
    ) -> Result<(), DeskApiError> {
        guard(&self.capabilities, HostOperation::Notifications)?;
        self.notifications
            .create(id, options)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Removes the notification with `id`, closing its pending click listeners.
    pub async fn clear(&self, id: &str) -> Result<bool, DeskApiError> {
        guard(&self.capabilities, HostOperation::Notifications)?;
        self.notifications
            .clear(id)
            .await
            .map_err(DeskApiError::Host)
    }

    /// Registers a click listener on `id` immediately and returns the pending click.
    pub fn wait_for_button_click<'a>(
        &'a self,
        id: &'a str,
    ) -> Result<NotificationFuture<'a, Option<usize>>, DeskApiError> {
        guard(&self.capabilities, HostOperation::Notifications)?;
        Ok(self.notifications.wait_for_button_click(id))
    }
}

#[cfg(test)]
mod tests {
    use desk_api_contract::DeskApiErrorKind;
    use desk_host::{CapabilityStatus, MemoryDeskService, MemoryNotificationService};
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn unsupported_operation_fails_without_calling_host() {
        let host = MemoryDeskService::with_desks([Desk::new("a"), Desk::new("b")]);
        let caps = DeskApiCapabilities::all_available()
            .with(HostOperation::RemoveDesk, CapabilityStatus::Unavailable);
        let api = DeskApi::new(Rc::new(host.clone()), caps);

        let err = block_on(api.remove_desk("a", RemoveDeskOptions::default()))
            .expect_err("remove is unsupported");
        assert_eq!(err.kind(), DeskApiErrorKind::Unsupported);
        assert_eq!(err.to_string(), "removeDesk is not supported in this version");
        assert!(host.calls().is_empty());
    }

    #[test]
    fn host_errors_are_carried_verbatim() {
        let host = MemoryDeskService::with_desks([Desk::new("a")]);
        let api = DeskApi::new(Rc::new(host), DeskApiCapabilities::all_available());

        let err = block_on(api.switch_desk("missing")).expect_err("unknown desk");
        assert_eq!(err, DeskApiError::Host("desk not found: missing".to_string()));
    }

    #[test]
    fn notifications_unavailable_rejects_listener_registration() {
        let tray = MemoryNotificationService::default();
        let caps = DeskApiCapabilities::all_available()
            .with(HostOperation::Notifications, CapabilityStatus::Unavailable);
        let api = NotificationApi::new(Rc::new(tray.clone()), caps);

        assert!(matches!(
            api.wait_for_button_click("n"),
            Err(DeskApiError::Unsupported {
                method: "notifications"
            })
        ));
        assert_eq!(tray.listener_count("n"), 0);
    }
}
