//! Window-manager desk service contract and no-op adapter.

use std::{future::Future, pin::Pin};

use desk_api_contract::{Desk, LaunchOptions, RemoveDeskOptions, WindowProperties};
use futures::stream::LocalBoxStream;

/// Object-safe boxed future used by [`DeskService`].
pub type DeskServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Stream of raw host desk callbacks.
pub type DeskEventStream = LocalBoxStream<'static, DeskHostEvent>;

/// Raw desk lifecycle callback as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskHostEvent {
    /// A desk was created, either fresh or by undoing a removal.
    Added {
        /// New desk.
        desk_id: String,
        /// Whether the desk came back through undo.
        from_undo: bool,
    },
    /// A desk was removed.
    Removed {
        /// Removed desk.
        desk_id: String,
    },
    /// The active desk changed.
    Switched {
        /// Newly active desk.
        activated: String,
        /// Previously active desk.
        deactivated: String,
    },
}

/// Host service managing virtual desks.
///
/// Errors are the host's own last-error text and are propagated verbatim.
pub trait DeskService {
    /// Creates a desk and returns its UUID.
    fn launch_desk<'a>(
        &'a self,
        options: &'a LaunchOptions,
    ) -> DeskServiceFuture<'a, Result<String, String>>;

    /// Removes a desk.
    fn remove_desk<'a>(
        &'a self,
        desk_id: &'a str,
        options: RemoveDeskOptions,
    ) -> DeskServiceFuture<'a, Result<(), String>>;

    /// Applies window-level desk properties.
    fn set_window_properties<'a>(
        &'a self,
        window_id: i32,
        properties: WindowProperties,
    ) -> DeskServiceFuture<'a, Result<(), String>>;

    /// Returns the active desk's UUID.
    fn get_active_desk<'a>(&'a self) -> DeskServiceFuture<'a, Result<String, String>>;

    /// Activates a desk.
    fn switch_desk<'a>(&'a self, desk_id: &'a str) -> DeskServiceFuture<'a, Result<(), String>>;

    /// Looks up a desk.
    fn get_desk_by_id<'a>(&'a self, desk_id: &'a str)
        -> DeskServiceFuture<'a, Result<Desk, String>>;

    /// Lists every desk.
    fn get_all_desks<'a>(&'a self) -> DeskServiceFuture<'a, Result<Vec<Desk>, String>>;

    /// Subscribes to desk lifecycle callbacks. Each call yields an independent stream.
    fn subscribe_events(&self) -> Result<DeskEventStream, String>;
}

fn unavailable() -> String {
    "desk host is unavailable on this target".to_string()
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op desk service for targets without a window manager.
pub struct NoopDeskService;

impl DeskService for NoopDeskService {
    fn launch_desk<'a>(
        &'a self,
        _options: &'a LaunchOptions,
    ) -> DeskServiceFuture<'a, Result<String, String>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn remove_desk<'a>(
        &'a self,
        _desk_id: &'a str,
        _options: RemoveDeskOptions,
    ) -> DeskServiceFuture<'a, Result<(), String>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn set_window_properties<'a>(
        &'a self,
        _window_id: i32,
        _properties: WindowProperties,
    ) -> DeskServiceFuture<'a, Result<(), String>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn get_active_desk<'a>(&'a self) -> DeskServiceFuture<'a, Result<String, String>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn switch_desk<'a>(&'a self, _desk_id: &'a str) -> DeskServiceFuture<'a, Result<(), String>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn get_desk_by_id<'a>(
        &'a self,
        _desk_id: &'a str,
    ) -> DeskServiceFuture<'a, Result<Desk, String>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn get_all_desks<'a>(&'a self) -> DeskServiceFuture<'a, Result<Vec<Desk>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn subscribe_events(&self) -> Result<DeskEventStream, String> {
        Err(unavailable())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_desk_service_rejects_mutations_and_lists_nothing() {
        let service = NoopDeskService;
        let service_obj: &dyn DeskService = &service;

        assert!(block_on(service_obj.launch_desk(&LaunchOptions::default())).is_err());
        assert!(block_on(service_obj.get_active_desk()).is_err());
        assert_eq!(
            block_on(service_obj.get_all_desks()).expect("list"),
            Vec::<Desk>::new()
        );
        assert!(service_obj.subscribe_events().is_err());
    }
}
