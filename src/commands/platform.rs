//! pfm platform コマンド
//!
//! プロジェクトのプラットフォームを一覧・追加・削除する。

use crate::config::ToolPaths;
use crate::error::Result;
use crate::orchestrator::{AddReport, Command, Orchestrator, Outcome};
use crate::output::CommandSummary;
use crate::platform::PlatformRegistry;
use crate::project::ProjectContext;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(after_help = "\
OPERATIONS:
  ls, list      Show installed platforms (default)
  add           Create platform projects and reinstall plugins
  rm, remove    Delete platform projects and their merges directories

ENVIRONMENT:
  PFM_LIB_DIR             Directory holding cordova-<platform>/bin/create
  PFM_PLUGIN_INSTALLER    Plugin installer executable
  PFM_LOG                 Log filter (e.g. debug, pfm=trace)")]
pub struct Args {
    /// Operation to run: ls, list, add, rm, remove
    pub operation: Option<String>,

    /// Target platforms (e.g. android ios)
    pub targets: Vec<String>,

    /// Project directory (searched upward for a .pfm directory)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Directory containing the platform libraries
    #[arg(long)]
    pub lib_dir: Option<PathBuf>,

    /// Plugin installer executable
    #[arg(long)]
    pub plugin_installer: Option<PathBuf>,

    /// Output the platform list in JSON format
    #[arg(long)]
    pub json: bool,
}

/// 一覧出力用の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PlatformEntry {
    name: String,
    display_name: Option<String>,
    path: String,
}

pub async fn run(args: Args) -> Result<()> {
    let start = match args.project {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let project = ProjectContext::discover(&start)?;
    let command = Command::parse(args.operation.as_deref())?;
    let tools = tool_paths(command, args.lib_dir, args.plugin_installer)?;

    let orchestrator = Orchestrator::new(project, PlatformRegistry::builtin(), tools);
    match orchestrator.execute(command, &args.targets, None).await? {
        Outcome::Listed(names) => {
            let entries = list_entries(&names, orchestrator.registry());
            if args.json {
                print_json(&entries)?;
            } else {
                print_table(&entries);
            }
            Ok(())
        }
        Outcome::Added(mut report) => {
            print_add_report(&report);
            match report.take_error() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
        Outcome::Removed(names) => {
            for name in &names {
                println!("{} Removed {}", "✓".green(), name.bold());
            }
            Ok(())
        }
    }
}

/// 外部ツールのパス
///
/// 外部ツールを起動するのは add だけなので、list / remove では
/// 指定値をそのまま使い、環境変数・デフォルトの解決は行わない。
fn tool_paths(
    command: Command,
    lib_dir: Option<PathBuf>,
    plugin_installer: Option<PathBuf>,
) -> Result<ToolPaths> {
    match command {
        Command::Add => ToolPaths::resolve(lib_dir, plugin_installer),
        Command::List | Command::Remove => Ok(ToolPaths::new(
            lib_dir.unwrap_or_default(),
            plugin_installer.unwrap_or_default(),
        )),
    }
}

fn list_entries(names: &[String], registry: &PlatformRegistry) -> Vec<PlatformEntry> {
    names
        .iter()
        .map(|name| PlatformEntry {
            name: name.clone(),
            display_name: registry
                .get(name)
                .ok()
                .map(|p| p.display_name().to_string()),
            path: format!("platforms/{name}"),
        })
        .collect()
}

fn print_json(entries: &[PlatformEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| std::io::Error::other(format!("Failed to serialize platforms: {e}")))?;
    println!("{json}");
    Ok(())
}

fn print_table(entries: &[PlatformEntry]) {
    if entries.is_empty() {
        println!("No platforms installed");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Platform", "Path"]);
    for entry in entries {
        table.add_row(vec![
            entry.name.as_str(),
            entry.display_name.as_deref().unwrap_or("-"),
            entry.path.as_str(),
        ]);
    }
    println!("{table}");
}

fn print_add_report(report: &AddReport) {
    for added in report.added() {
        match added.plugins().len() {
            0 => println!("{} Added {}", "✓".green(), added.target().bold()),
            n => println!(
                "{} Added {} ({} plugin(s) reinstalled)",
                "✓".green(),
                added.target().bold(),
                n
            ),
        }
    }
    for failure in report.failures() {
        let message = failure.error().to_string();
        let headline = message.lines().next().unwrap_or_default();
        println!("{} {}: {}", "✗".red(), failure.target().bold(), headline);
    }

    let failed = report.failures().len() + usize::from(report.aborted().is_some());
    let summary = CommandSummary::format(report.added().len(), failed);
    println!("{} {}", summary.prefix, summary.message);
}

#[cfg(test)]
#[path = "platform_test.rs"]
mod tests;
