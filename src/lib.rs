//! tickboard: a board of ticking novelty counters
//!
//! This library wires the workspace crates together:
//! - Configuration loading (`config`)
//! - Terminal rendering of counter snapshots (`display`)
//! - Startup and the interactive run loop (`app`)

pub mod app;
pub mod config;
pub mod display;

// Re-export commonly used types
pub use config::{AppConfig, OutputMode};
pub use display::TerminalRenderer;
pub use tickboard_core::{CounterRegistry, CounterSession, CounterSnapshot};
