mod config;
mod render;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use pbxtool_core::{PbxTool, ToolError};
use render::{OutputFormat, Renderer};
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pbxtool",
    version,
    about = "List, add, remove, and repair file references in an Xcode project.pbxproj.",
    arg_required_else_help = true
)]
struct Cli {
    /// Path to project.pbxproj
    /// (default: from pbxtool.toml, else DMSAApp/DMSAApp.xcodeproj/project.pbxproj).
    #[arg(long, global = true)]
    project: Option<Utf8PathBuf>,

    /// Backup directory (default: from pbxtool.toml, else .pbxproj_backups).
    #[arg(long, global = true)]
    backup_dir: Option<Utf8PathBuf>,

    /// Output format (text, json).
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List file references, optionally filtered by name.
    List(ListArgs),
    /// Show the group tree.
    ListGroups,
    /// List native targets.
    ListTargets,
    /// List Swift source files.
    ListSwift,
    /// Add a file to the project.
    Add(AddArgs),
    /// Add several files under one backup.
    AddMany(AddManyArgs),
    /// Remove file references by display name.
    Remove(RemoveArgs),
    /// Find files by shell pattern (*, ?, [seq]).
    Find(FindArgs),
    /// Show details for a file reference.
    Info(InfoArgs),
    /// Check project integrity.
    Check,
    /// Remove broken build-file entries.
    Fix,
    /// Back up the project file.
    Backup,
    /// Restore the project file from a backup (default: latest).
    Restore(RestoreArgs),
    /// List backups, newest first.
    ListBackups,
    /// Remove references to views deleted from the app.
    Cleanup,
}

#[derive(Debug, Parser)]
struct ListArgs {
    /// Case-insensitive substring of the file name.
    pattern: Option<String>,

    /// Substring of the declared file type (e.g. "swift").
    #[arg(long = "type")]
    file_type: Option<String>,
}

#[derive(Debug, Parser)]
struct AddArgs {
    /// File on disk to add.
    file: Utf8PathBuf,

    /// Target to build the file in (default: the application target).
    target: Option<String>,

    /// Group path such as "App/Views"; missing groups are created.
    group: Option<String>,
}

#[derive(Debug, Parser)]
struct AddManyArgs {
    /// Files on disk to add.
    #[arg(required = true)]
    files: Vec<Utf8PathBuf>,

    #[arg(long)]
    target: Option<String>,

    #[arg(long)]
    group: Option<String>,
}

#[derive(Debug, Parser)]
struct RemoveArgs {
    /// Display names of the references to remove.
    #[arg(required = true)]
    files: Vec<String>,
}

#[derive(Debug, Parser)]
struct FindArgs {
    pattern: String,
}

#[derive(Debug, Parser)]
struct InfoArgs {
    file: String,
}

#[derive(Debug, Parser)]
struct RestoreArgs {
    /// Backup file name inside the backup directory.
    name: Option<String>,
}

/// Always exits 0; failures are reported on the console.
fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
    }
    ExitCode::SUCCESS
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help, version, and usage errors alike.
            e.print().context("print usage")?;
            return Ok(());
        }
    };

    let file_config =
        config::load_or_default(Utf8Path::new(".")).context("load pbxtool.toml config")?;
    let settings = ConfigMerger::new(file_config).merge_cli_args(cli.project, cli.backup_dir);
    debug!(
        "merged config: project={}, backup_dir={}, default_target={:?}",
        settings.project_path, settings.backup_dir, settings.default_target
    );

    let mut tool = PbxTool::new(settings);
    let mut out = Renderer::new(std::io::stdout().lock(), cli.format);

    match run(&mut tool, cli.cmd, &mut out) {
        Ok(()) => Ok(()),
        Err(e) if e.is_reportable() => {
            println!("error: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Failures are either reportable [`ToolError`]s or unexpected ones; rendering
/// failures count as unexpected.
fn run<W: Write>(tool: &mut PbxTool, cmd: Command, out: &mut Renderer<W>) -> Result<(), ToolError> {
    match cmd {
        Command::List(args) => {
            let files = tool.list_files(args.pattern.as_deref(), args.file_type.as_deref())?;
            let issues = tool.check()?.issue_count();
            out.files(&files, args.pattern.as_deref(), issues)?;
        }
        Command::ListGroups => out.groups(&tool.list_groups()?)?,
        Command::ListTargets => out.targets(&tool.list_targets()?)?,
        Command::ListSwift => {
            let files = tool.list_swift_files()?;
            let issues = tool.check()?.issue_count();
            out.files(&files, None, issues)?;
        }
        Command::Add(args) => {
            let report = tool.add_file(&args.file, args.target.as_deref(), args.group.as_deref())?;
            out.added(&report)?;
        }
        Command::AddMany(args) => {
            let report =
                tool.add_files(&args.files, args.target.as_deref(), args.group.as_deref())?;
            out.added(&report)?;
        }
        Command::Remove(args) => out.removed(&tool.remove_files(&args.files, true)?)?,
        Command::Find(args) => {
            let files = tool.find_files(&args.pattern)?;
            out.found(&args.pattern, &files)?;
        }
        Command::Info(args) => {
            let infos = tool.file_info(&args.file)?;
            out.info(&args.file, &infos)?;
        }
        Command::Check => out.check(&tool.check()?)?,
        Command::Fix => {
            out.note("Fixing project...")?;
            out.fixed(&tool.fix()?)?;
        }
        Command::Backup => out.backed_up(&tool.backup()?)?,
        Command::Restore(args) => out.restored(&tool.restore(args.name.as_deref())?)?,
        Command::ListBackups => out.backups(&tool.list_backups()?)?,
        Command::Cleanup => {
            out.note("Cleaning up references to deleted UI files...")?;
            out.removed(&tool.cleanup_deleted_ui_files()?)?;
        }
    }
    Ok(())
}
