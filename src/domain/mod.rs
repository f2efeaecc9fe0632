//! Domain types and the pure validation rules.
//!
//! Nothing in here performs I/O; storage is reached through [`ports`].

pub mod amount;
pub mod asset;
pub mod card;
pub mod ports;
pub mod transaction;
