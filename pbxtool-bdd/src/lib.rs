//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.
//! It only carries the project fixtures the scenarios build on.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// The checked-in sample project shared with the other crates' tests.
pub fn sample_manifest() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures/sample/DMSAApp.xcodeproj/project.pbxproj")
}

/// Manifest text for a bare project whose main group holds one reference per
/// `(path, lastKnownFileType)` pair.
pub fn manifest_with_files(files: &[(&str, &str)]) -> String {
    let ids: Vec<String> = (1..=files.len()).map(|i| format!("F{i:023}")).collect();
    let mut objects = String::new();
    objects.push_str("\t\tROOT = {isa = PBXProject; mainGroup = MAIN; targets = (); };\n");
    objects.push_str(&format!(
        "\t\tMAIN = {{isa = PBXGroup; children = ({}); sourceTree = \"<group>\"; }};\n",
        ids.join(", ")
    ));
    for (id, (path, file_type)) in ids.iter().zip(files) {
        objects.push_str(&format!(
            "\t\t{id} = {{isa = PBXFileReference; lastKnownFileType = {file_type}; \
             path = \"{path}\"; sourceTree = \"<group>\"; }};\n"
        ));
    }
    format!(
        "// !$*UTF8*$!\n{{\n\tarchiveVersion = 1;\n\tclasses = {{\n\t}};\n\
         \tobjectVersion = 56;\n\tobjects = {{\n{objects}\t}};\n\trootObject = ROOT;\n}}\n"
    )
}

/// Copy the sample project to `<root>/DMSAApp/DMSAApp.xcodeproj/project.pbxproj`.
pub fn install_sample(root: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let text = fs::read_to_string(sample_manifest()).context("read sample project")?;
    install_manifest(root, &text)
}

pub fn install_manifest(root: &Utf8Path, text: &str) -> anyhow::Result<Utf8PathBuf> {
    let bundle = root.join("DMSAApp").join("DMSAApp.xcodeproj");
    fs::create_dir_all(&bundle)?;
    let manifest = bundle.join("project.pbxproj");
    fs::write(&manifest, text)?;
    Ok(manifest)
}
