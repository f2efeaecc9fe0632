//! Adapters between external formats and the domain: CSV in, JSON out.

pub mod csv;
pub mod json;
