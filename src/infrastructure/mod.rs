// Infrastructure layer - External dependencies and adapters
pub mod clock;
pub mod config;
pub mod http_snapshot_source;
pub mod view_surfaces;
