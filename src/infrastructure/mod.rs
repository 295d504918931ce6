// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod jenkins_backend;
pub mod launchpad_codec;
pub mod launchpad_device;
pub mod mmonit_backend;
