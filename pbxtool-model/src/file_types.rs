//! Extension-to-type table used when a file reference is created.

use crate::isa;
use camino::Utf8Path;

/// Build phase a new file's build entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Sources,
    Resources,
    Frameworks,
}

impl PhaseKind {
    pub fn isa(self) -> &'static str {
        match self {
            PhaseKind::Sources => isa::SOURCES_BUILD_PHASE,
            PhaseKind::Resources => isa::RESOURCES_BUILD_PHASE,
            PhaseKind::Frameworks => isa::FRAMEWORKS_BUILD_PHASE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKind {
    pub file_type: &'static str,
    /// `None` for files that are referenced but never built (headers, plists).
    pub phase: Option<PhaseKind>,
}

pub fn classify(path: &Utf8Path) -> FileKind {
    use PhaseKind::*;

    let ext = path.extension().map(str::to_ascii_lowercase);
    let (file_type, phase) = match ext.as_deref() {
        Some("swift") => ("sourcecode.swift", Some(Sources)),
        Some("m") => ("sourcecode.c.objc", Some(Sources)),
        Some("mm") => ("sourcecode.cpp.objcpp", Some(Sources)),
        Some("c") => ("sourcecode.c.c", Some(Sources)),
        Some("cc") | Some("cpp") | Some("cxx") => ("sourcecode.cpp.cpp", Some(Sources)),
        Some("metal") => ("sourcecode.metal", Some(Sources)),
        Some("xcdatamodeld") => ("wrapper.xcdatamodel", Some(Sources)),
        Some("h") => ("sourcecode.c.h", None),
        Some("hpp") => ("sourcecode.cpp.h", None),
        Some("storyboard") => ("file.storyboard", Some(Resources)),
        Some("xib") => ("file.xib", Some(Resources)),
        Some("xcassets") => ("folder.assetcatalog", Some(Resources)),
        Some("strings") => ("text.plist.strings", Some(Resources)),
        Some("json") => ("text.json", Some(Resources)),
        Some("png") => ("image.png", Some(Resources)),
        Some("jpg") | Some("jpeg") => ("image.jpeg", Some(Resources)),
        Some("plist") => ("text.plist.xml", None),
        Some("entitlements") => ("text.plist.entitlements", None),
        Some("xcconfig") => ("text.xcconfig", None),
        Some("md") => ("net.daringfireball.markdown", None),
        Some("framework") => ("wrapper.framework", Some(Frameworks)),
        Some("a") => ("archive.ar", Some(Frameworks)),
        Some("dylib") => ("compiled.mach-o.dylib", Some(Frameworks)),
        Some("tbd") => ("sourcecode.text-based-dylib-definition", Some(Frameworks)),
        _ => ("text", None),
    };
    FileKind { file_type, phase }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swift_sources_go_to_sources_phase() {
        let kind = classify(Utf8Path::new("UI/Views/Main.swift"));
        assert_eq!(kind.file_type, "sourcecode.swift");
        assert_eq!(kind.phase, Some(PhaseKind::Sources));
    }

    #[test]
    fn headers_and_plists_are_not_built() {
        assert_eq!(classify(Utf8Path::new("Bridge.h")).phase, None);
        assert_eq!(classify(Utf8Path::new("Info.plist")).phase, None);
    }

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(classify(Utf8Path::new("Logo.PNG")).file_type, "image.png");
    }

    #[test]
    fn unknown_extension_is_plain_text() {
        let kind = classify(Utf8Path::new("LICENSE"));
        assert_eq!(kind.file_type, "text");
        assert_eq!(kind.phase, None);
    }
}
