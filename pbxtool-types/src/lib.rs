//! Shared DTOs for the pbxtool workspace.
//!
//! Every façade operation in `pbxtool-core` returns one of these types instead
//! of printing, so the CLI can render them as text or JSON and tests can
//! assert on them directly.
//!
//! # Design constraints
//! - Plain data only: no references into the project model.
//! - Serializable; the CLI emits them verbatim with `--format json`.

pub mod check;
pub mod ops;
pub mod project;

pub use check::{CheckReport, Issue, IssueKind, Severity};
pub use ops::{AddFailure, AddReport, BackupEntry, FixReport, RemoveReport, RestoreOutcome};
pub use project::{FileEntry, FileInfo, GroupRow, NodeKind, TargetEntry};
