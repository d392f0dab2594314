#![no_main]

//! Arbitrary text through the plist reader, and anything it accepts through
//! the writer and back.

use camino::Utf8Path;
use libfuzzer_sys::fuzz_target;
use pbxtool_model::{XcodeProject, parse_plist};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    let _ = parse_plist(s);

    let Ok(project) = XcodeProject::parse(s, Utf8Path::new("Fuzz.xcodeproj/project.pbxproj")) else {
        return;
    };
    let written = project.to_pbxproj();
    let reread = XcodeProject::parse(&written, project.path())
        .expect("writer output must parse");
    assert_eq!(reread.objects(), project.objects());
});
