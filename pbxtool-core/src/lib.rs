//! Embeddable core library for pbxtool.
//!
//! [`PbxTool`] wraps one `project.pbxproj` and exposes every command as a
//! method returning a typed result from `pbxtool-types`. Nothing here prints;
//! rendering belongs to the caller.
//!
//! # Ports
//!
//! The wall clock used for backup names is the [`Clock`](ports::Clock) port.
//! [`adapters`] provides the system clock and a stepping clock for tests.
//!
//! # Layers
//!
//! - [`project`]: lazily loaded model with explicit invalidate/reload
//! - [`backup`]: timestamped manifest snapshots
//! - [`query`] and [`check`]: read-only views and integrity findings
//! - [`mutate`]: model edits behind add, remove, and fix

pub mod adapters;
pub mod backup;
pub mod check;
pub mod error;
pub mod mutate;
pub mod ports;
pub mod project;
pub mod query;
pub mod settings;
mod tool;

#[cfg(test)]
mod test_support;

pub use error::{ErrorCategory, ToolError, ToolResult};
pub use settings::ToolSettings;
pub use tool::PbxTool;

// Re-export the model so callers don't need pbxtool-model directly.
pub use pbxtool_model::{ModelError, XcodeProject};
