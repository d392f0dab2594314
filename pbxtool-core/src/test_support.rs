//! Hand-built projects for unit tests.

use camino::Utf8Path;
use pbxtool_model::{Object, ObjectId, XcodeProject};

const SKELETON: &str = "// !$*UTF8*$!\n{ archiveVersion = 1; \
    objects = { ROOT = { isa = PBXProject; mainGroup = MAIN; }; }; rootObject = ROOT; }\n";

/// A project whose root object points at main group `MAIN`, plus `objects`.
pub(crate) fn project_with(objects: Vec<(&str, Object)>) -> XcodeProject {
    let mut project =
        XcodeProject::parse(SKELETON, Utf8Path::new("Test.xcodeproj/project.pbxproj"))
            .expect("skeleton parses");
    for (id, object) in objects {
        project.objects_mut().insert(ObjectId::from(id), object);
    }
    project
}
