//! Xcode-style writer.
//!
//! Objects are grouped into `/* Begin <isa> section */` blocks sorted by isa
//! and id, `isa` leads every object, and id references carry `/* comment */`
//! annotations the way Xcode emits them.

use crate::isa;
use crate::project::XcodeProject;
use crate::value::{Object, Value};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

/// Keys whose string values are ids Xcode writes without annotation.
const UNANNOTATED_KEYS: &[&str] = &["remoteGlobalIDString", "TestTargetID"];

/// Kinds Xcode writes on a single line.
const SINGLE_LINE_ISAS: &[&str] = &[isa::BUILD_FILE, isa::FILE_REFERENCE];

pub(crate) fn write_project(project: &XcodeProject) -> String {
    let comments = comments_for(project);
    let writer = Writer {
        comments: &comments,
    };

    let mut out = String::from("// !$*UTF8*$!\n{\n");
    let mut keys: Vec<&str> = project.header().keys().map(String::as_str).collect();
    keys.push("objects");
    keys.sort_unstable();

    for key in keys {
        if key == "objects" {
            writer.objects(&mut out, project);
            continue;
        }
        if let Some(value) = project.header().get(key) {
            let _ = write!(out, "\t{} = ", quote(key));
            writer.value(&mut out, value, 1, false, key);
            out.push_str(";\n");
        }
    }
    out.push_str("}\n");
    out
}

struct Writer<'a> {
    comments: &'a HashMap<String, String>,
}

impl Writer<'_> {
    fn objects(&self, out: &mut String, project: &XcodeProject) {
        out.push_str("\tobjects = {\n");
        let isas: BTreeSet<&str> = project.objects().iter().map(|(_, o)| o.isa()).collect();
        for kind in isas {
            let _ = write!(out, "\n/* Begin {kind} section */\n");
            let inline = SINGLE_LINE_ISAS.contains(&kind);
            for (id, object) in project.objects().of_isa(kind) {
                out.push_str("\t\t");
                self.reference(out, id.as_str());
                out.push_str(" = ");
                self.object(out, object, inline);
                out.push_str(";\n");
            }
            let _ = writeln!(out, "/* End {kind} section */");
        }
        out.push_str("\t};\n");
    }

    fn object(&self, out: &mut String, object: &Object, inline: bool) {
        let isa_value = Value::String(object.isa().to_string());
        let fields = std::iter::once(("isa", &isa_value))
            .chain(object.fields().iter().map(|(k, v)| (k.as_str(), v)));
        if inline {
            out.push('{');
            for (key, value) in fields {
                let _ = write!(out, "{} = ", quote(key));
                self.value(out, value, 0, true, key);
                out.push_str("; ");
            }
            out.push('}');
        } else {
            out.push_str("{\n");
            for (key, value) in fields {
                let _ = write!(out, "{}{} = ", tabs(3), quote(key));
                self.value(out, value, 3, false, key);
                out.push_str(";\n");
            }
            out.push_str(&tabs(2));
            out.push('}');
        }
    }

    fn value(&self, out: &mut String, value: &Value, indent: usize, inline: bool, key: &str) {
        match value {
            Value::String(s) => {
                if UNANNOTATED_KEYS.contains(&key) {
                    out.push_str(&quote(s));
                } else {
                    self.reference(out, s);
                }
            }
            Value::Data(bytes) => {
                out.push('<');
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                out.push('>');
            }
            Value::Array(items) if inline => {
                out.push('(');
                for item in items {
                    self.value(out, item, indent, true, key);
                    out.push_str(", ");
                }
                out.push(')');
            }
            Value::Array(items) => {
                out.push_str("(\n");
                for item in items {
                    out.push_str(&tabs(indent + 1));
                    self.value(out, item, indent + 1, false, key);
                    out.push_str(",\n");
                }
                out.push_str(&tabs(indent));
                out.push(')');
            }
            Value::Dict(dict) if inline => {
                out.push('{');
                for (k, v) in dict {
                    let _ = write!(out, "{} = ", quote(k));
                    self.value(out, v, indent, true, k);
                    out.push_str("; ");
                }
                out.push('}');
            }
            Value::Dict(dict) => {
                out.push_str("{\n");
                for (k, v) in dict {
                    let _ = write!(out, "{}{} = ", tabs(indent + 1), quote(k));
                    self.value(out, v, indent + 1, false, k);
                    out.push_str(";\n");
                }
                out.push_str(&tabs(indent));
                out.push('}');
            }
        }
    }

    /// Write a string, annotated when it names a known object.
    fn reference(&self, out: &mut String, s: &str) {
        out.push_str(&quote(s));
        if let Some(comment) = self.comments.get(s) {
            let _ = write!(out, " /* {} */", comment.replace("*/", "* /"));
        }
    }
}

fn tabs(n: usize) -> String {
    "\t".repeat(n)
}

fn quote(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.'))
        && !s.contains("//")
        && !s.contains("/*");
    if bare {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\U{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Annotation text for every object id Xcode would comment.
fn comments_for(project: &XcodeProject) -> HashMap<String, String> {
    let objects = project.objects();
    let mut comments = HashMap::new();

    for (id, object) in objects.iter() {
        let name = object.get_str("name");
        let comment = match object.isa() {
            isa::BUILD_FILE | isa::CONFIGURATION_LIST => None,
            isa::PROJECT => Some("Project object"),
            isa::SOURCES_BUILD_PHASE => Some("Sources"),
            isa::RESOURCES_BUILD_PHASE => Some("Resources"),
            isa::FRAMEWORKS_BUILD_PHASE => Some("Frameworks"),
            "PBXHeadersBuildPhase" => Some("Headers"),
            "PBXShellScriptBuildPhase" => name.or(Some("ShellScript")),
            "PBXCopyFilesBuildPhase" => name.or(Some("CopyFiles")),
            "PBXTargetDependency" => Some("PBXTargetDependency"),
            "PBXContainerItemProxy" => Some("PBXContainerItemProxy"),
            "XCSwiftPackageProductDependency" => object.get_str("productName"),
            _ => object.display_name(),
        };
        if let Some(comment) = comment {
            comments.insert(id.to_string(), comment.to_string());
        }
    }

    // Build files are named after their file and the phase listing them.
    let mut phase_of: HashMap<&str, &str> = HashMap::new();
    for (id, object) in objects.iter().filter(|(_, o)| o.is_build_phase()) {
        for build_file in object.ids("files") {
            phase_of.insert(build_file, id.as_str());
        }
    }
    for (id, object) in objects.of_isa(isa::BUILD_FILE) {
        let file = object
            .get_str("fileRef")
            .or_else(|| object.get_str("productRef"))
            .and_then(|r| comments.get(r));
        let phase = phase_of.get(id.as_str()).and_then(|p| comments.get(*p));
        let comment = match (file, phase) {
            (Some(file), Some(phase)) => format!("{file} in {phase}"),
            (Some(file), None) => file.clone(),
            _ => continue,
        };
        comments.insert(id.to_string(), comment);
    }

    for (_, owner) in objects.iter() {
        let Some(list) = owner.get_str("buildConfigurationList") else {
            continue;
        };
        let owner_name = match owner.isa() {
            isa::PROJECT => project.project_name(),
            _ => owner.get_str("name"),
        };
        let comment = match owner_name {
            Some(name) => format!("Build configuration list for {} \"{name}\"", owner.isa()),
            None => format!("Build configuration list for {}", owner.isa()),
        };
        comments.insert(list.to_string(), comment);
    }

    comments
}
