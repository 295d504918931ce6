// Presentation layer - Operator-facing input and output
pub mod event_dispatch;
