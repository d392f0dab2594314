//! Text and JSON rendering of façade results.

use camino::Utf8Path;
use pbxtool_types::{
    AddReport, BackupEntry, CheckReport, FileEntry, FileInfo, FixReport, GroupRow, Issue,
    NodeKind, RemoveReport, RestoreOutcome, TargetEntry,
};
use serde::Serialize;
use std::io::Write;

const WIDE_RULE: &str =
    "----------------------------------------------------------------------";
const RULE: &str = "--------------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writes command results to `out` in the selected format.
pub struct Renderer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// `list` / `list-swift`. `issues` adds a footer when the project has problems.
    pub fn files(
        &mut self,
        files: &[FileEntry],
        pattern: Option<&str>,
        issues: usize,
    ) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(files);
        }
        let out = &mut self.out;
        match pattern {
            Some(p) => writeln!(out, "Project files (filter: {p}):")?,
            None => writeln!(out, "Project files:")?,
        }
        writeln!(out, "{WIDE_RULE}")?;
        for f in files {
            writeln!(out, "  [{:8}] {}", f.short_type(), f.name)?;
        }
        writeln!(out, "{WIDE_RULE}")?;
        writeln!(out, "{} files", files.len())?;
        if issues > 0 {
            writeln!(out, "\nwarning: project has {issues} problem references")?;
        }
        Ok(())
    }

    pub fn groups(&mut self, rows: &[GroupRow]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(rows);
        }
        let out = &mut self.out;
        writeln!(out, "Project groups:")?;
        writeln!(out, "{RULE}")?;
        for row in rows {
            let indent = "  ".repeat(row.depth);
            match row.kind {
                NodeKind::Group => writeln!(out, "{indent}{}/", row.name)?,
                NodeKind::File => writeln!(out, "{indent}{}", row.name)?,
            }
        }
        Ok(())
    }

    pub fn targets(&mut self, targets: &[TargetEntry]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(targets);
        }
        let out = &mut self.out;
        writeln!(out, "Build targets:")?;
        writeln!(out, "{RULE}")?;
        for t in targets {
            writeln!(out, "  [{}] {}", t.short_type(), t.name)?;
        }
        writeln!(out, "\n{} targets", targets.len())?;
        Ok(())
    }

    pub fn found(&mut self, pattern: &str, files: &[FileEntry]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(files);
        }
        let out = &mut self.out;
        writeln!(out, "Find: {pattern}")?;
        writeln!(out, "{RULE}")?;
        for f in files {
            writeln!(out, "  {} ({})", f.name, f.path)?;
        }
        writeln!(out, "\n{} matches", files.len())?;
        Ok(())
    }

    pub fn info(&mut self, name: &str, infos: &[FileInfo]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(infos);
        }
        let out = &mut self.out;
        for info in infos {
            writeln!(out, "File info: {name}")?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "  ID:          {}", info.id)?;
            writeln!(out, "  Name:        {}", info.name.as_deref().unwrap_or("N/A"))?;
            writeln!(out, "  Path:        {}", info.path.as_deref().unwrap_or("N/A"))?;
            writeln!(out, "  Type:        {}", info.file_type.as_deref().unwrap_or("N/A"))?;
            writeln!(
                out,
                "  Source tree: {}",
                info.source_tree.as_deref().unwrap_or("N/A")
            )?;
            for build_file in &info.build_files {
                writeln!(out, "  Build file:  {build_file}")?;
            }
        }
        Ok(())
    }

    pub fn check(&mut self, report: &CheckReport) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }
        let out = &mut self.out;
        writeln!(out, "Project integrity check:")?;
        writeln!(out, "{RULE}")?;
        if !report.errors.is_empty() {
            writeln!(out, "{} errors:", report.errors.len())?;
            write_issues(out, "x", &report.errors)?;
        }
        if !report.warnings.is_empty() {
            writeln!(out, "{} warnings:", report.warnings.len())?;
            write_issues(out, "!", &report.warnings)?;
        }
        if report.is_clean() {
            writeln!(out, "ok: project integrity is good")?;
        }
        Ok(())
    }

    pub fn added(&mut self, report: &AddReport) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }
        let out = &mut self.out;
        let target = report.target.as_deref().unwrap_or("(no target)");
        for path in &report.added {
            writeln!(out, "added: {path} -> {target}")?;
        }
        if report.added.len() > 1 {
            writeln!(out, "\n{} files added", report.added.len())?;
        }
        if !report.failed.is_empty() {
            writeln!(out, "\n{} files failed:", report.failed.len())?;
            for failure in &report.failed {
                writeln!(out, "  x {}: {}", failure.path, failure.reason)?;
            }
        }
        Ok(())
    }

    pub fn removed(&mut self, report: &RemoveReport) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }
        let out = &mut self.out;
        for name in &report.removed {
            writeln!(out, "removed: {name}")?;
        }
        if report.saved {
            writeln!(out, "\n{} file references removed", report.removed.len())?;
        }
        if !report.not_found.is_empty() {
            writeln!(out, "\n{} files not found:", report.not_found.len())?;
            for name in &report.not_found {
                writeln!(out, "  - {name}")?;
            }
        }
        Ok(())
    }

    pub fn fixed(&mut self, report: &FixReport) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }
        let out = &mut self.out;
        for id in &report.fixed {
            writeln!(out, "removed broken reference: {id}")?;
        }
        for id in &report.vanished {
            writeln!(out, "! reference already gone: {id}")?;
        }
        if report.fixed.is_empty() {
            writeln!(out, "nothing to fix")?;
        } else {
            writeln!(out, "\nfixed {} problems", report.fixed_count())?;
        }
        Ok(())
    }

    pub fn backed_up(&mut self, path: &Utf8Path) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(&serde_json::json!({ "backup": path }));
        }
        writeln!(self.out, "backed up to: {path}")?;
        Ok(())
    }

    pub fn restored(&mut self, outcome: &RestoreOutcome) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(outcome);
        }
        if outcome.latest
            && let Some(name) = outcome.backup.file_name()
        {
            writeln!(self.out, "using latest backup: {name}")?;
        }
        writeln!(self.out, "restored from: {}", outcome.backup)?;
        Ok(())
    }

    pub fn backups(&mut self, entries: &[BackupEntry]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(entries);
        }
        let out = &mut self.out;
        if entries.is_empty() {
            writeln!(out, "no backups")?;
            return Ok(());
        }
        writeln!(out, "Backups:")?;
        writeln!(out, "{RULE}")?;
        for entry in entries {
            writeln!(out, "  {} ({:.1} KB)", entry.name, entry.size_kib())?;
        }
        Ok(())
    }

    /// Free-form progress line; suppressed in JSON mode.
    pub fn note(&mut self, line: &str) -> anyhow::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

fn write_issues(out: &mut impl Write, marker: &str, issues: &[Issue]) -> anyhow::Result<()> {
    for issue in issues {
        writeln!(out, "  {marker} {}: {}", issue.subject, issue.detail)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbxtool_types::{AddFailure, IssueKind};
    use pretty_assertions::assert_eq;

    fn text(render: impl FnOnce(&mut Renderer<Vec<u8>>) -> anyhow::Result<()>) -> String {
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Text);
        render(&mut renderer).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn entry(name: &str, file_type: &str) -> FileEntry {
        FileEntry {
            id: format!("ID-{name}"),
            name: name.to_string(),
            path: name.to_string(),
            file_type: file_type.to_string(),
        }
    }

    #[test]
    fn file_list_pads_type_and_warns_on_issues() {
        let files = vec![entry("A.swift", "sourcecode.swift"), entry("B", "")];
        let out = text(|r| r.files(&files, Some("a"), 2));
        assert!(out.starts_with("Project files (filter: a):\n"));
        assert!(out.contains("  [swift   ] A.swift\n"));
        assert!(out.contains("  [?       ] B\n"));
        assert!(out.contains("2 files\n"));
        assert!(out.ends_with("warning: project has 2 problem references\n"));
    }

    #[test]
    fn clean_file_list_has_no_footer() {
        let out = text(|r| r.files(&[], None, 0));
        assert!(!out.contains("warning"));
    }

    #[test]
    fn group_tree_indents_by_depth() {
        let rows = vec![
            GroupRow {
                depth: 0,
                kind: NodeKind::Group,
                name: "(unnamed)".to_string(),
            },
            GroupRow {
                depth: 1,
                kind: NodeKind::File,
                name: "main.swift".to_string(),
            },
        ];
        let out = text(|r| r.groups(&rows));
        assert!(out.ends_with("(unnamed)/\n  main.swift\n"));
    }

    #[test]
    fn check_report_lists_errors_and_warnings() {
        let mut report = CheckReport::default();
        report.push(Issue {
            kind: IssueKind::BrokenReference,
            subject: "B1".to_string(),
            detail: "references missing file X123".to_string(),
        });
        report.push(Issue {
            kind: IssueKind::DuplicateReference,
            subject: "Shared/Util.swift".to_string(),
            detail: "F2 duplicates F1".to_string(),
        });
        let out = text(|r| r.check(&report));
        assert!(out.contains("1 errors:\n  x B1: references missing file X123\n"));
        assert!(out.contains("1 warnings:\n  ! Shared/Util.swift: F2 duplicates F1\n"));
        assert!(!out.contains("ok:"));

        let out = text(|r| r.check(&CheckReport::default()));
        assert!(out.ends_with("ok: project integrity is good\n"));
    }

    #[test]
    fn add_report_shows_failures() {
        let report = AddReport {
            target: Some("App".to_string()),
            added: vec!["A.swift".to_string()],
            failed: vec![AddFailure {
                path: "Ghost.swift".to_string(),
                reason: "file does not exist".to_string(),
            }],
            saved: true,
        };
        let out = text(|r| r.added(&report));
        assert!(out.starts_with("added: A.swift -> App\n"));
        assert!(out.contains("  x Ghost.swift: file does not exist\n"));
    }

    #[test]
    fn json_mode_emits_the_dto() {
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Json);
        renderer
            .fixed(&FixReport {
                fixed: vec!["B1".to_string()],
                vanished: vec![],
                saved: true,
            })
            .unwrap();
        renderer.note("ignored in json").unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&renderer.into_inner()).unwrap();
        assert_eq!(value["fixed"][0], "B1");
        assert_eq!(value["saved"], true);
    }

    #[test]
    fn backups_show_size_in_kib() {
        let entries = vec![BackupEntry {
            name: "project.pbxproj.20250101_000000".to_string(),
            size_bytes: 2048,
        }];
        let out = text(|r| r.backups(&entries));
        assert!(out.contains("  project.pbxproj.20250101_000000 (2.0 KB)\n"));
        assert_eq!(text(|r| r.backups(&[])), "no backups\n");
    }
}
