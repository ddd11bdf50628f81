//! Host capability descriptor and the service bundle injected into the bridge.

use std::rc::Rc;

use crate::{DeskService, NotificationService};

/// Host availability state for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// The host implements the operation.
    Available,
    /// The host predates the operation or does not implement it.
    Unavailable,
}

impl CapabilityStatus {
    /// Returns whether the operation can be used.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Host operation guarded by capability detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOperation {
    /// `launchDesk`.
    LaunchDesk,
    /// `removeDesk`.
    RemoveDesk,
    /// `setWindowProperties`.
    SetWindowProperties,
    /// `getActiveDesk`.
    GetActiveDesk,
    /// `switchDesk`.
    SwitchDesk,
    /// `getDeskByID`.
    GetDeskById,
    /// `getAllDesks`.
    GetAllDesks,
    /// Desk lifecycle event listeners.
    DeskEvents,
    /// Notification create/clear/click.
    Notifications,
}

impl HostOperation {
    /// Every guarded operation.
    pub const ALL: [Self; 9] = [
        Self::LaunchDesk,
        Self::RemoveDesk,
        Self::SetWindowProperties,
        Self::GetActiveDesk,
        Self::SwitchDesk,
        Self::GetDeskById,
        Self::GetAllDesks,
        Self::DeskEvents,
        Self::Notifications,
    ];

    /// Host method name used in diagnostics and unsupported-operation errors.
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::LaunchDesk => "launchDesk",
            Self::RemoveDesk => "removeDesk",
            Self::SetWindowProperties => "setWindowProperties",
            Self::GetActiveDesk => "getActiveDesk",
            Self::SwitchDesk => "switchDesk",
            Self::GetDeskById => "getDeskByID",
            Self::GetAllDesks => "getAllDesks",
            Self::DeskEvents => "deskEvents",
            Self::Notifications => "notifications",
        }
    }
}

/// Capability snapshot computed once when the host is wired up.
///
/// Hosts of different versions expose different subsets of the desk API; the bridge consults
/// this snapshot instead of probing the host on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeskApiCapabilities {
    /// `launchDesk` availability.
    pub launch_desk: CapabilityStatus,
    /// `removeDesk` availability.
    pub remove_desk: CapabilityStatus,
    /// `setWindowProperties` availability.
    pub set_window_properties: CapabilityStatus,
    /// `getActiveDesk` availability.
    pub get_active_desk: CapabilityStatus,
    /// `switchDesk` availability.
    pub switch_desk: CapabilityStatus,
    /// `getDeskByID` availability.
    pub get_desk_by_id: CapabilityStatus,
    /// `getAllDesks` availability.
    pub get_all_desks: CapabilityStatus,
    /// Desk lifecycle event availability.
    pub desk_events: CapabilityStatus,
    /// Notification availability.
    pub notifications: CapabilityStatus,
}

impl DeskApiCapabilities {
    /// Every operation available.
    pub const fn all_available() -> Self {
        Self::uniform(CapabilityStatus::Available)
    }

    /// Nothing available.
    pub const fn unavailable() -> Self {
        Self::uniform(CapabilityStatus::Unavailable)
    }

    const fn uniform(status: CapabilityStatus) -> Self {
        Self {
            launch_desk: status,
            remove_desk: status,
            set_window_properties: status,
            get_active_desk: status,
            switch_desk: status,
            get_desk_by_id: status,
            get_all_desks: status,
            desk_events: status,
            notifications: status,
        }
    }

    /// Builds a snapshot from the set of operations a host reports.
    pub fn from_supported(supported: impl IntoIterator<Item = HostOperation>) -> Self {
        supported
            .into_iter()
            .fold(Self::unavailable(), |caps, op| {
                caps.with(op, CapabilityStatus::Available)
            })
    }

    /// Returns the status of `op`.
    pub const fn status(&self, op: HostOperation) -> CapabilityStatus {
        match op {
            HostOperation::LaunchDesk => self.launch_desk,
            HostOperation::RemoveDesk => self.remove_desk,
            HostOperation::SetWindowProperties => self.set_window_properties,
            HostOperation::GetActiveDesk => self.get_active_desk,
            HostOperation::SwitchDesk => self.switch_desk,
            HostOperation::GetDeskById => self.get_desk_by_id,
            HostOperation::GetAllDesks => self.get_all_desks,
            HostOperation::DeskEvents => self.desk_events,
            HostOperation::Notifications => self.notifications,
        }
    }

    /// Returns whether `op` is available.
    pub const fn supports(&self, op: HostOperation) -> bool {
        self.status(op).is_available()
    }

    /// Returns a copy with `op` set to `status`.
    pub const fn with(mut self, op: HostOperation, status: CapabilityStatus) -> Self {
        match op {
            HostOperation::LaunchDesk => self.launch_desk = status,
            HostOperation::RemoveDesk => self.remove_desk = status,
            HostOperation::SetWindowProperties => self.set_window_properties = status,
            HostOperation::GetActiveDesk => self.get_active_desk = status,
            HostOperation::SwitchDesk => self.switch_desk = status,
            HostOperation::GetDeskById => self.get_desk_by_id = status,
            HostOperation::GetAllDesks => self.get_all_desks = status,
            HostOperation::DeskEvents => self.desk_events = status,
            HostOperation::Notifications => self.notifications = status,
        }
        self
    }

    /// Operations the host lacks, for startup diagnostics.
    pub fn missing(&self) -> Vec<HostOperation> {
        HostOperation::ALL
            .into_iter()
            .filter(|op| !self.supports(*op))
            .collect()
    }
}

impl Default for DeskApiCapabilities {
    fn default() -> Self {
        Self::all_available()
    }
}

/// Host service bundle handed to the bridge at construction.
///
/// All host selection happens before this bundle is built, which keeps the bridge decoupled
/// from concrete host adapters.
#[derive(Clone)]
pub struct DeskHostServices {
    /// Window-manager desk service.
    pub desks: Rc<dyn DeskService>,
    /// User-visible notification service.
    pub notifications: Rc<dyn NotificationService>,
    /// Host availability snapshot.
    pub capabilities: DeskApiCapabilities,
}

impl DeskHostServices {
    /// Bundles the given services with a capability snapshot.
    pub fn new(
        desks: Rc<dyn DeskService>,
        notifications: Rc<dyn NotificationService>,
        capabilities: DeskApiCapabilities,
    ) -> Self {
        Self {
            desks,
            notifications,
            capabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_supported_marks_only_listed_operations() {
        let caps = DeskApiCapabilities::from_supported([
            HostOperation::LaunchDesk,
            HostOperation::GetActiveDesk,
        ]);
        assert!(caps.supports(HostOperation::LaunchDesk));
        assert!(caps.supports(HostOperation::GetActiveDesk));
        assert!(!caps.supports(HostOperation::RemoveDesk));
        assert_eq!(caps.missing().len(), HostOperation::ALL.len() - 2);
    }

    #[test]
    fn with_overrides_single_operation() {
        let caps = DeskApiCapabilities::all_available()
            .with(HostOperation::GetAllDesks, CapabilityStatus::Unavailable);
        assert_eq!(caps.missing(), vec![HostOperation::GetAllDesks]);
        assert_eq!(HostOperation::GetDeskById.method_name(), "getDeskByID");
    }
}
