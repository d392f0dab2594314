use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use cucumber::{given, then, when, World};
use pbxtool_bdd::{install_manifest, install_sample, manifest_with_files};
use pbxtool_core::adapters::SteppingClock;
use pbxtool_core::{PbxTool, ToolSettings};
use pbxtool_model::{Object, ObjectId, isa};
use pbxtool_types::{CheckReport, FixReport, IssueKind, RemoveReport, RestoreOutcome};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug, Default, World)]
pub struct PbxtoolWorld {
    temp: Option<TempDir>,
    tool: Option<PbxTool>,
    created_backups: Vec<String>,
    object_count: Option<usize>,
    listed: Vec<String>,
    check: Option<CheckReport>,
    fix: Option<FixReport>,
    removed: Option<RemoveReport>,
    restored: Option<RestoreOutcome>,
}

fn tool(world: &mut PbxtoolWorld) -> &mut PbxTool {
    world.tool.as_mut().expect("project set up")
}

fn open_tool(world: &mut PbxtoolWorld, manifest: Utf8PathBuf, root: &Utf8Path) {
    let settings = ToolSettings {
        project_path: manifest,
        backup_dir: root.join(".pbxproj_backups"),
        ..ToolSettings::default()
    };
    let start = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid start time");
    world.tool = Some(PbxTool::with_clock(
        settings,
        Arc::new(SteppingClock::new(start)),
    ));
}

fn scratch(world: &mut PbxtoolWorld) -> Utf8PathBuf {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf-8 temp path");
    world.temp = Some(td);
    root
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).collect()
}

// Setup

#[given("the sample project")]
async fn sample_project(world: &mut PbxtoolWorld) {
    let root = scratch(world);
    let manifest = install_sample(&root).expect("install sample");
    open_tool(world, manifest, &root);
}

#[given(expr = "a project with files {string}")]
async fn project_with_files(world: &mut PbxtoolWorld, files: String) {
    let specs: Vec<(String, String)> = split_list(&files)
        .into_iter()
        .map(|spec| {
            let (path, file_type) = spec.split_once(':').expect("path:type");
            (path.to_string(), file_type.to_string())
        })
        .collect();
    let pairs: Vec<(&str, &str)> = specs
        .iter()
        .map(|(p, t)| (p.as_str(), t.as_str()))
        .collect();

    let root = scratch(world);
    let manifest = install_manifest(&root, &manifest_with_files(&pairs)).expect("install");
    open_tool(world, manifest, &root);
}

#[given(expr = "a build file {string} that references missing file {string}")]
async fn dangling_build_file(world: &mut PbxtoolWorld, id: String, missing: String) {
    let project = tool(world).project().expect("load project");
    project.objects_mut().insert(
        ObjectId::new(id),
        Object::new(isa::BUILD_FILE).with("fileRef", missing.as_str()),
    );
    project.save().expect("save project");
}

// Actions

#[when(expr = "I back up the project {int} times")]
async fn back_up(world: &mut PbxtoolWorld, times: usize) {
    for _ in 0..times {
        let path = tool(world).backup().expect("backup");
        let name = path.file_name().expect("backup file name").to_string();
        world.created_backups.push(name);
    }
}

#[when("I restore the latest backup")]
async fn restore_latest(world: &mut PbxtoolWorld) {
    world.restored = Some(tool(world).restore(None).expect("restore"));
}

#[when(expr = "I remove {string}")]
async fn remove(world: &mut PbxtoolWorld, name: String) {
    let count = tool(world).project().expect("load project").objects().len();
    world.object_count = Some(count);
    world.removed = Some(tool(world).remove_files(&[name], true).expect("remove"));
}

#[when(expr = "I list files of type {string}")]
async fn list_of_type(world: &mut PbxtoolWorld, file_type: String) {
    let files = tool(world).list_files(None, Some(&file_type)).expect("list");
    world.listed = files.into_iter().map(|f| f.name).collect();
}

#[when(expr = "I list files matching {string}")]
async fn list_matching(world: &mut PbxtoolWorld, pattern: String) {
    let files = tool(world).list_files(Some(&pattern), None).expect("list");
    world.listed = files.into_iter().map(|f| f.name).collect();
}

#[when(expr = "I find files matching {string}")]
async fn find_matching(world: &mut PbxtoolWorld, pattern: String) {
    let files = tool(world).find_files(&pattern).expect("find");
    world.listed = files.into_iter().map(|f| f.name).collect();
}

#[when("I check the project")]
async fn check(world: &mut PbxtoolWorld) {
    world.check = Some(tool(world).check().expect("check"));
}

#[when("I fix the project")]
async fn fix(world: &mut PbxtoolWorld) {
    world.fix = Some(tool(world).fix().expect("fix"));
}

// Outcomes

#[then("the backup names sort in creation order")]
async fn backups_sort_in_creation_order(world: &mut PbxtoolWorld) {
    let mut sorted = world.created_backups.clone();
    sorted.sort();
    assert_eq!(sorted, world.created_backups);
}

#[then("the backup list starts with the newest backup")]
async fn backup_list_newest_first(world: &mut PbxtoolWorld) {
    let newest = world.created_backups.last().cloned().expect("a backup was made");
    let listed = tool(world).list_backups().expect("list backups");
    assert_eq!(listed.first().map(|b| b.name.clone()), Some(newest));
}

#[then("the restored backup is the newest one")]
async fn restored_newest(world: &mut PbxtoolWorld) {
    let listed = tool(world).list_backups().expect("list backups");
    let restored = world.restored.clone().expect("restore ran");
    assert!(restored.latest);
    assert_eq!(
        restored.backup.file_name(),
        listed.first().map(|b| b.name.as_str())
    );
}

#[then(expr = "the project has no file named {string}")]
async fn no_file_named(world: &mut PbxtoolWorld, name: String) {
    let project = tool(world).project().expect("load project");
    assert!(
        project.files_by_name(&name).is_empty(),
        "expected no reference named {name}"
    );
}

#[then(expr = "the listed names are {string}")]
async fn listed_names(world: &mut PbxtoolWorld, expected: String) {
    assert_eq!(world.listed, split_list(&expected));
}

#[then(expr = "the check reports an error for {string}")]
async fn check_reports_error(world: &mut PbxtoolWorld, subject: String) {
    let report = world.check.as_ref().expect("check ran");
    assert!(
        report.errors.iter().any(|i| i.subject == subject),
        "expected an error for {subject}, got {:?}",
        report.errors
    );
}

#[then(expr = "the check reports {int} errors")]
async fn check_error_count(world: &mut PbxtoolWorld, count: usize) {
    let report = world.check.as_ref().expect("check ran");
    assert_eq!(report.errors.len(), count, "errors: {:?}", report.errors);
}

#[then(expr = "the check reports exactly one duplicate warning for {string}")]
async fn one_duplicate_warning(world: &mut PbxtoolWorld, path: String) {
    let report = world.check.as_ref().expect("check ran");
    let duplicates: Vec<_> = report
        .warnings
        .iter()
        .filter(|i| i.kind == IssueKind::DuplicateReference)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].subject, path);
}

#[then(expr = "{int} problems were fixed")]
async fn problems_fixed(world: &mut PbxtoolWorld, count: usize) {
    let report = world.fix.as_ref().expect("fix ran");
    assert_eq!(report.fixed_count(), count);
}

#[then(expr = "{string} is reported as not found")]
async fn reported_not_found(world: &mut PbxtoolWorld, name: String) {
    let report = world.removed.as_ref().expect("remove ran");
    assert_eq!(report.not_found, vec![name]);
    assert!(report.removed.is_empty());
}

#[then(expr = "{string} is reported as removed")]
async fn reported_removed(world: &mut PbxtoolWorld, name: String) {
    let report = world.removed.as_ref().expect("remove ran");
    assert_eq!(report.removed, vec![name]);
    assert!(report.saved);
}

#[then("the object count is unchanged")]
async fn object_count_unchanged(world: &mut PbxtoolWorld) {
    let before = world.object_count.expect("count recorded");
    let after = tool(world).project().expect("load project").objects().len();
    assert_eq!(before, after);
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    PbxtoolWorld::cucumber().run(features_path).await;
}
