// Projects gallery: fetch, reconciliation against stored preferences,
// gallery assembly, and the management API.

pub mod gallery;
pub mod handlers;
pub mod reconcile;
pub mod service;
