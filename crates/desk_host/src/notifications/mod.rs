//! Notification host-service contracts and adapters.

pub mod service;
