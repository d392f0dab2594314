//! Object model for Xcode `project.pbxproj` manifests.
//!
//! Responsibilities:
//! - Parse the OpenStep property-list text into an object table keyed by id.
//! - Offer the handful of graph edits pbxtool needs (add a file with build
//!   entries, remove a file, purge an object, resolve nested groups).
//! - Write the table back in Xcode's sectioned layout.
//!
//! Build settings, schemes, and workspaces are not modelled.

mod error;
mod file_types;
mod parse;
mod project;
mod value;
mod write;

pub use error::{ModelError, ModelResult};
pub use file_types::{FileKind, PhaseKind, classify};
pub use parse::parse_plist;
pub use project::{FileOptions, XcodeProject};
pub use value::{Dict, Object, ObjectId, Objects, Value};

/// Record kinds (`isa` values) the tool looks at.
pub mod isa {
    pub const PROJECT: &str = "PBXProject";
    pub const FILE_REFERENCE: &str = "PBXFileReference";
    pub const BUILD_FILE: &str = "PBXBuildFile";
    pub const GROUP: &str = "PBXGroup";
    pub const VARIANT_GROUP: &str = "PBXVariantGroup";
    pub const NATIVE_TARGET: &str = "PBXNativeTarget";
    pub const SOURCES_BUILD_PHASE: &str = "PBXSourcesBuildPhase";
    pub const RESOURCES_BUILD_PHASE: &str = "PBXResourcesBuildPhase";
    pub const FRAMEWORKS_BUILD_PHASE: &str = "PBXFrameworksBuildPhase";
    pub const CONFIGURATION_LIST: &str = "XCConfigurationList";
}
