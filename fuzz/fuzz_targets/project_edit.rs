#![no_main]

//! Structured edits against a small valid project. Every sequence must leave
//! a manifest that still parses.

use camino::Utf8Path;
use libfuzzer_sys::fuzz_target;
use pbxtool_model::{FileOptions, XcodeProject};

const BASE: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	objectVersion = 56;
	objects = {
		ROOT = {isa = PBXProject; mainGroup = MAIN; targets = (APP); };
		MAIN = {isa = PBXGroup; children = (); sourceTree = "<group>"; };
		APP = {
			isa = PBXNativeTarget;
			name = App;
			buildPhases = (SRC);
			productType = "com.apple.product-type.application";
		};
		SRC = {isa = PBXSourcesBuildPhase; files = (); };
	};
	rootObject = ROOT;
}
"#;

#[derive(Debug, arbitrary::Arbitrary)]
enum Edit {
    Add {
        path: String,
        group: Option<String>,
        all_targets: bool,
    },
    RemoveByName(String),
    Purge(String),
}

fuzz_target!(|edits: Vec<Edit>| {
    let manifest = Utf8Path::new("App.xcodeproj/project.pbxproj");
    let Ok(mut project) = XcodeProject::parse(BASE, manifest) else {
        return;
    };

    for edit in edits.into_iter().take(16) {
        match edit {
            Edit::Add { path, group, all_targets } => {
                let parent = match group {
                    Some(g) => match project.get_or_create_group(&g) {
                        Ok(id) => Some(id),
                        Err(_) => continue,
                    },
                    None => None,
                };
                let opts = FileOptions {
                    target_name: (!all_targets).then(|| "App".to_string()),
                    parent,
                    ..FileOptions::default()
                };
                let _ = project.add_file(&path, &opts);
            }
            Edit::RemoveByName(name) => {
                for id in project.files_by_name(&name) {
                    project.remove_file_by_id(id.as_str());
                }
            }
            Edit::Purge(id) => {
                project.purge_object(&id);
            }
        }
    }

    let written = project.to_pbxproj();
    let reread = XcodeProject::parse(&written, project.path()).expect("writer output must parse");
    assert_eq!(reread.objects(), project.objects());
});
