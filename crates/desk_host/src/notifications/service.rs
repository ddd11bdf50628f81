//! Notification service contracts, no-op adapter, and in-memory adapter.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Content of a button notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Icon shown next to the text.
    pub icon_url: String,
    /// Button labels, in index order.
    pub buttons: Vec<String>,
    /// Keep the notification on screen until the user acts on it.
    pub require_interaction: bool,
}

/// Host service for user-visible notifications with buttons.
pub trait NotificationService {
    /// Shows a notification under `id`, replacing any notification with the same id.
    fn create<'a>(
        &'a self,
        id: &'a str,
        options: &'a NotificationOptions,
    ) -> NotificationFuture<'a, Result<(), String>>;

    /// Removes the notification with `id`. Resolves to whether one was showing.
    ///
    /// Clearing also closes every pending [`NotificationService::wait_for_button_click`] on
    /// that id.
    fn clear<'a>(&'a self, id: &'a str) -> NotificationFuture<'a, Result<bool, String>>;

    /// Waits for the next button click on `id`.
    ///
    /// The listener is registered when this method is called, not when the future is first
    /// polled. Resolves to the clicked button index, or `None` when the notification is closed
    /// or cleared before any click.
    fn wait_for_button_click<'a>(&'a self, id: &'a str) -> NotificationFuture<'a, Option<usize>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets. Nothing is shown and nobody clicks.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn create<'a>(
        &'a self,
        _id: &'a str,
        _options: &'a NotificationOptions,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn clear<'a>(&'a self, _id: &'a str) -> NotificationFuture<'a, Result<bool, String>> {
        Box::pin(async { Ok(false) })
    }

    fn wait_for_button_click<'a>(&'a self, _id: &'a str) -> NotificationFuture<'a, Option<usize>> {
        Box::pin(async { None })
    }
}

#[derive(Debug, Default)]
struct MemoryNotificationState {
    showing: HashMap<String, NotificationOptions>,
    created: Vec<(String, NotificationOptions)>,
    cleared: Vec<String>,
    listeners: HashMap<String, Vec<oneshot::Sender<usize>>>,
    create_failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory notification tray. Tests play the user through [`Self::click`] and
/// [`Self::close`].
pub struct MemoryNotificationService {
    inner: Rc<RefCell<MemoryNotificationState>>,
}

impl MemoryNotificationService {
    /// Notification currently showing under `id`.
    pub fn showing(&self, id: &str) -> Option<NotificationOptions> {
        self.inner.borrow().showing.get(id).cloned()
    }

    /// Every notification created so far, in order.
    pub fn created(&self) -> Vec<(String, NotificationOptions)> {
        self.inner.borrow().created.clone()
    }

    /// Ids passed to [`NotificationService::clear`], in order.
    pub fn cleared(&self) -> Vec<String> {
        self.inner.borrow().cleared.clone()
    }

    /// Number of click listeners still waiting on `id`.
    pub fn listener_count(&self, id: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(id)
            .map_or(0, |listeners| listeners.iter().filter(|tx| !tx.is_canceled()).count())
    }

    /// Makes the next [`NotificationService::create`] fail with `message`.
    pub fn fail_next_create(&self, message: impl Into<String>) {
        self.inner.borrow_mut().create_failure = Some(message.into());
    }

    /// Simulates a click on `button_index` of the notification showing under `id`.
    ///
    /// Returns whether any listener received the click.
    pub fn click(&self, id: &str, button_index: usize) -> bool {
        let mut state = self.inner.borrow_mut();
        if !state.showing.contains_key(id) {
            return false;
        }
        state
            .listeners
            .remove(id)
            .unwrap_or_default()
            .into_iter()
            .fold(false, |delivered, tx| tx.send(button_index).is_ok() || delivered)
    }

    /// Simulates the user dismissing the notification without clicking a button.
    pub fn close(&self, id: &str) -> bool {
        let mut state = self.inner.borrow_mut();
        state.listeners.remove(id);
        state.showing.remove(id).is_some()
    }
}

impl NotificationService for MemoryNotificationService {
    fn create<'a>(
        &'a self,
        id: &'a str,
        options: &'a NotificationOptions,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if let Some(message) = state.create_failure.take() {
                return Err(message);
            }
            state.showing.insert(id.to_string(), options.clone());
            state.created.push((id.to_string(), options.clone()));
            Ok(())
        })
    }

    fn clear<'a>(&'a self, id: &'a str) -> NotificationFuture<'a, Result<bool, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.cleared.push(id.to_string());
            state.listeners.remove(id);
            Ok(state.showing.remove(id).is_some())
        })
    }

    fn wait_for_button_click<'a>(&'a self, id: &'a str) -> NotificationFuture<'a, Option<usize>> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .borrow_mut()
            .listeners
            .entry(id.to_string())
            .or_default()
            .push(tx);
        Box::pin(async move { rx.await.ok() })
    }
}
