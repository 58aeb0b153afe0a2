//! Observability infrastructure for TurboCommerce product cards.
//!
//! This crate provides:
//! - `CardContext` - Identifies the card a log entry belongs to
//! - `StructuredLogger` - Structured logging with card context
//! - `LogCapture` - In-memory sink for inspecting emitted entries

mod logging;

pub use logging::*;
