//! Desk host-service contracts and adapters.

pub mod memory;
pub mod service;
