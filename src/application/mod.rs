//! Application layer: forms, the transaction presenter and the service that
//! wires them to storage.
//!
//! `AnchorService` resolves records through the ports in
//! [`crate::domain::ports`] and never touches storage types directly.

pub mod context;
pub mod forms;
pub mod presenter;
pub mod service;
