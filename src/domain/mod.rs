// Domain layer - Pure types with no I/O
pub mod error;
pub mod grid;
pub mod indicator;
pub mod record;
pub mod source;
