// Application layer - Stores, pollers and the dashboard controller
pub mod dashboard;
pub mod grid_device;
pub mod poller;
pub mod record_store;
pub mod source_backend;
pub mod supervisor;
