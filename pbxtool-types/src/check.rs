use serde::{Deserialize, Serialize};

/// Category of an integrity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A build file whose `fileRef` is missing from the object table.
    BrokenReference,
    /// A file reference whose `path` was already seen.
    DuplicateReference,
    /// A build file listed by no build phase.
    OrphanBuildFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::BrokenReference => Severity::Error,
            IssueKind::DuplicateReference | IssueKind::OrphanBuildFile => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Object id for build-file issues, the shared path for duplicates.
    pub subject: String,
    pub detail: String,
}

/// Result of `check()`: errors are broken references, everything else warns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    #[serde(default)]
    pub errors: Vec<Issue>,
    #[serde(default)]
    pub warnings: Vec<Issue>,
}

impl CheckReport {
    /// Route an issue into `errors` or `warnings` by its severity.
    pub fn push(&mut self, issue: Issue) {
        match issue.kind.severity() {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(|i| i.kind == kind)
            .count()
    }
}
