//! Controller layer: UI actions, status messages, and dispatch into the storefront.

pub mod events;
pub mod orchestration;
