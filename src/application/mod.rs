// Application layer - Reconciliation, focus and polling use cases
pub mod focus_controller;
pub mod poll_loop;
pub mod reconciler;
pub mod snapshot_source;
pub mod surfaces;
