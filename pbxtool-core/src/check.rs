//! Integrity checks over the object table. Nothing here mutates.

use pbxtool_model::{XcodeProject, isa};
use pbxtool_types::{CheckReport, Issue, IssueKind};
use std::collections::{HashMap, HashSet};

/// Build files whose `fileRef` names an object that does not exist.
pub fn broken_references(project: &XcodeProject) -> Vec<Issue> {
    let objects = project.objects();
    objects
        .of_isa(isa::BUILD_FILE)
        .filter_map(|(id, build_file)| {
            let file_ref = build_file.get_str("fileRef")?;
            (!objects.contains(file_ref)).then(|| Issue {
                kind: IssueKind::BrokenReference,
                subject: id.to_string(),
                detail: format!("references missing file {file_ref}"),
            })
        })
        .collect()
}

/// One issue per file reference whose `path` was already seen.
///
/// A reference without a `path` counts as having the empty path, so pathless
/// references are duplicates of each other.
pub fn duplicate_references(project: &XcodeProject) -> Vec<Issue> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut issues = Vec::new();
    for (id, file) in project.objects().of_isa(isa::FILE_REFERENCE) {
        let path = file.get_str("path").unwrap_or_default();
        match seen.get(path) {
            Some(first) => issues.push(Issue {
                kind: IssueKind::DuplicateReference,
                subject: if path.is_empty() {
                    "(no path)".to_string()
                } else {
                    path.to_string()
                },
                detail: format!("{id} duplicates {first}"),
            }),
            None => {
                seen.insert(path, id.as_str());
            }
        }
    }
    issues
}

/// Build files that no build phase lists.
pub fn orphan_build_files(project: &XcodeProject) -> Vec<Issue> {
    let objects = project.objects();
    let listed: HashSet<&str> = objects
        .iter()
        .filter(|(_, o)| o.is_build_phase())
        .flat_map(|(_, phase)| phase.ids("files"))
        .collect();
    objects
        .of_isa(isa::BUILD_FILE)
        .filter(|(id, _)| !listed.contains(id.as_str()))
        .map(|(id, _)| Issue {
            kind: IssueKind::OrphanBuildFile,
            subject: id.to_string(),
            detail: "not listed in any build phase".to_string(),
        })
        .collect()
}

pub fn check(project: &XcodeProject) -> CheckReport {
    let mut report = CheckReport::default();
    for issue in broken_references(project)
        .into_iter()
        .chain(duplicate_references(project))
        .chain(orphan_build_files(project))
    {
        report.push(issue);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::project_with;
    use pbxtool_model::{Object, Value};
    use pretty_assertions::assert_eq;

    fn build_file(file_ref: &str) -> Object {
        Object::new(isa::BUILD_FILE).with("fileRef", file_ref)
    }

    fn phase(files: &[&str]) -> Object {
        Object::new(isa::SOURCES_BUILD_PHASE).with(
            "files",
            files.iter().map(|f| Value::from(*f)).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn dangling_file_ref_is_an_error() {
        let project = project_with(vec![
            ("B1", build_file("X123")),
            ("P1", phase(&["B1"])),
        ]);
        let report = check(&project);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].subject, "B1");
        assert!(report.errors[0].detail.contains("X123"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn shared_path_warns_once_per_extra_copy() {
        let file = || Object::new(isa::FILE_REFERENCE).with("path", "Shared/Util.swift");
        let project = project_with(vec![("F1", file()), ("F2", file())]);
        let report = check(&project);
        assert_eq!(report.count_of(IssueKind::DuplicateReference), 1);
        assert_eq!(report.warnings[0].subject, "Shared/Util.swift");

        let project = project_with(vec![("F1", file()), ("F2", file()), ("F3", file())]);
        assert_eq!(check(&project).count_of(IssueKind::DuplicateReference), 2);
    }

    #[test]
    fn pathless_references_share_the_empty_path() {
        let project = project_with(vec![
            ("F1", Object::new(isa::FILE_REFERENCE).with("name", "A")),
            ("F2", Object::new(isa::FILE_REFERENCE).with("name", "B")),
            ("F3", Object::new(isa::FILE_REFERENCE).with("path", "C.swift")),
        ]);
        let report = check(&project);
        assert!(report.errors.is_empty());
        assert_eq!(report.count_of(IssueKind::DuplicateReference), 1);
        assert_eq!(report.warnings[0].subject, "(no path)");
        assert_eq!(report.warnings[0].detail, "F2 duplicates F1");
    }

    #[test]
    fn unlisted_build_file_is_an_orphan_warning() {
        let project = project_with(vec![
            ("F1", Object::new(isa::FILE_REFERENCE).with("path", "A.swift")),
            ("B1", build_file("F1")),
            ("B2", build_file("F1")),
            ("P1", phase(&["B1"])),
        ]);
        let orphans = orphan_build_files(&project);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].subject, "B2");
        assert!(check(&project).errors.is_empty());
    }
}
