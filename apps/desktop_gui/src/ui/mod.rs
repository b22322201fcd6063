//! UI layer for the desktop storefront: app shell and panels.

pub mod app;

pub use app::StorefrontApp;
