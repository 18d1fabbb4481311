//! プラットフォームのライフサイクル管理
//!
//! list / add / remove の3操作を、複数のターゲットに対して実行する。
//!
//! ## 操作の流れ
//!
//! ```text
//!  run(operation, targets)
//!        │
//!        ├─ ls / list ─▶ before_platform_ls ─▶ after_platform_ls ─▶ platforms/ の一覧
//!        │
//!        ├─ add ───────▶ ターゲットごとに:
//!        │                 before_platform_add ─▶ 既存チェック ─▶ タスク起動
//!        │                   タスク: 要件チェック ─▶ create スクリプト ─▶ update_project
//!        │                           ─▶ merges/<target> 作成 ─▶ after_platform_add
//!        │                           ─▶ プラグイン再インストール（1つずつ）
//!        │                 全タスク完了後に完了通知（1回だけ）
//!        │
//!        └─ rm / remove ─▶ ターゲットごとに:
//!                            before_platform_rm ─▶ platforms/<target> 削除
//!                            ─▶ merges/<target> 削除 ─▶ after_platform_rm
//! ```
//!
//! あるターゲットの失敗は他のターゲットを取り消さない。作成途中の
//! サブプロジェクトは自動では巻き戻さないので、`remove` で掃除する。

mod report;

pub use report::{AddReport, AddedPlatform, TargetFailure};

use crate::config::ToolPaths;
use crate::error::{PlatformError, Result};
use crate::hooks::{HookEvent, HookNotifier, ScriptHooks};
use crate::manifest::Manifest;
use crate::overrides::{remove_dir_if_exists, OverrideDirs};
use crate::platform::{GeneratorInput, Platform, PlatformRegistry};
use crate::process::{Invocation, ProcessRunner, SystemRunner};
use crate::project::{validate_target_name, ProjectContext};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// 全ターゲット完了後に1度だけ呼ばれる完了通知
pub type CompletionSignal = Box<dyn FnOnce() + Send>;

/// プラットフォームコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Add,
    Remove,
}

impl Command {
    /// 操作名をパース（省略時は list）
    pub fn parse(operation: Option<&str>) -> Result<Self> {
        match operation {
            None | Some("ls") | Some("list") => Ok(Command::List),
            Some("add") => Ok(Command::Add),
            Some("rm") | Some("remove") => Ok(Command::Remove),
            Some(other) => Err(PlatformError::UnknownCommand(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Add => "add",
            Command::Remove => "remove",
        }
    }
}

/// 操作結果
#[derive(Debug)]
pub enum Outcome {
    /// インストール済みプラットフォーム（名前順）
    Listed(Vec<String>),
    Added(AddReport),
    /// 削除したプラットフォーム（要求順）
    Removed(Vec<String>),
}

/// ターゲットのタスク間で共有する状態
///
/// すべて読み取り専用。ディレクトリはターゲット名ごとに分かれているため
/// タスク間でロックは不要。
#[derive(Clone)]
struct Shared {
    project: ProjectContext,
    tools: ToolPaths,
    hooks: Arc<dyn HookNotifier>,
    runner: Arc<dyn ProcessRunner>,
    overrides: OverrideDirs,
}

/// ライフサイクルオーケストレータ
pub struct Orchestrator {
    shared: Arc<Shared>,
    registry: PlatformRegistry,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("project", &self.shared.project.root())
            .field("tools", &self.shared.tools)
            .field("registry", &self.registry)
            .finish()
    }
}

impl Orchestrator {
    /// `.pfm/hooks` のスクリプトと実プロセスを使うオーケストレータ
    pub fn new(project: ProjectContext, registry: PlatformRegistry, tools: ToolPaths) -> Self {
        let hooks = Arc::new(ScriptHooks::new(project.hooks_dir(), project.root()));
        let overrides = OverrideDirs::new(project.merges_dir());
        Self {
            shared: Arc::new(Shared {
                project,
                tools,
                hooks,
                runner: Arc::new(SystemRunner),
                overrides,
            }),
            registry,
        }
    }

    /// フック通知先を差し替え
    pub fn with_hooks(self, hooks: Arc<dyn HookNotifier>) -> Self {
        self.rebuild(|shared| shared.hooks = hooks)
    }

    /// プロセス実行を差し替え
    pub fn with_runner(self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.rebuild(|shared| shared.runner = runner)
    }

    fn rebuild(self, update: impl FnOnce(&mut Shared)) -> Self {
        let mut shared = Shared::clone(&self.shared);
        update(&mut shared);
        Self {
            shared: Arc::new(shared),
            registry: self.registry,
        }
    }

    pub fn project(&self) -> &ProjectContext {
        &self.shared.project
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// 操作名で実行し、失敗をハードエラーとして返す
    ///
    /// add でいずれかのターゲットが失敗した場合、完了通知の後に
    /// 要求順で最初のエラー（打ち切りエラーがあればそれ）を返す。
    pub async fn run(
        &self,
        operation: Option<&str>,
        targets: &[String],
        on_complete: Option<CompletionSignal>,
    ) -> Result<Outcome> {
        let command = Command::parse(operation)?;
        match self.execute(command, targets, on_complete).await? {
            Outcome::Added(mut report) => match report.take_error() {
                Some(error) => Err(error),
                None => Ok(Outcome::Added(report)),
            },
            outcome => Ok(outcome),
        }
    }

    /// コマンドを実行
    ///
    /// add のターゲット単位の失敗は `AddReport` に記録して返す。
    pub async fn execute(
        &self,
        command: Command,
        targets: &[String],
        on_complete: Option<CompletionSignal>,
    ) -> Result<Outcome> {
        let manifest = Arc::new(Manifest::load(&self.shared.project.manifest_path())?);
        debug!(command = command.as_str(), ?targets, manifest = %manifest.id, "platform command");

        match command {
            Command::List => self.list().map(Outcome::Listed),
            Command::Add => self
                .add(manifest, targets, on_complete)
                .await
                .map(Outcome::Added),
            Command::Remove => self.remove(targets, on_complete).map(Outcome::Removed),
        }
    }

    /// インストール済みプラットフォームの一覧
    pub fn list(&self) -> Result<Vec<String>> {
        self.shared.hooks.fire(HookEvent::BeforePlatformLs);
        self.shared.hooks.fire(HookEvent::AfterPlatformLs);
        self.shared.project.installed_platforms()
    }

    /// プラットフォームを追加
    ///
    /// 名前・アダプタの検証はディスパッチ前に全ターゲット分行う。
    /// 既存のプラットフォームが見つかった時点で以降のディスパッチを打ち切るが、
    /// 起動済みのタスクは最後まで実行する。
    pub async fn add(
        &self,
        manifest: Arc<Manifest>,
        targets: &[String],
        on_complete: Option<CompletionSignal>,
    ) -> Result<AddReport> {
        if targets.is_empty() {
            return Err(PlatformError::NoTargets(Command::Add.as_str().to_string()));
        }
        let platforms = targets
            .iter()
            .map(|target| {
                validate_target_name(target)?;
                self.registry.get(target)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut report = AddReport::new();
        let mut tasks = JoinSet::new();
        let mut dispatched = HashMap::new();

        for (index, (target, platform)) in targets.iter().zip(platforms).enumerate() {
            self.shared.hooks.fire(HookEvent::BeforePlatformAdd);

            if self.shared.project.platform_dir(target).exists() {
                report.abort(PlatformError::PlatformAlreadyExists(target.clone()));
                break;
            }

            let shared = Arc::clone(&self.shared);
            let manifest = Arc::clone(&manifest);
            let task_target = target.clone();
            let handle = tasks.spawn(async move {
                add_platform(&shared, platform.as_ref(), &manifest, &task_target).await
            });
            dispatched.insert(handle.id(), (index, target.clone()));
            debug!(platform = %target, index, "dispatched platform add");
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, result)) => {
                    let Some((index, target)) = dispatched.remove(&id) else {
                        continue;
                    };
                    match result {
                        Ok(plugins) => {
                            info!(platform = %target, plugins = plugins.len(), "platform added");
                            report.record_success(index, &target, plugins);
                        }
                        Err(e) => {
                            error!(platform = %target, error = %e, "platform add failed");
                            report.record_failure(index, &target, e);
                        }
                    }
                }
                Err(join_error) => {
                    let Some((index, target)) = dispatched.remove(&join_error.id()) else {
                        continue;
                    };
                    error!(platform = %target, error = %join_error, "platform add task did not finish");
                    let failure = PlatformError::Task {
                        target: target.clone(),
                        detail: join_error.to_string(),
                    };
                    report.record_failure(index, &target, failure);
                }
            }
        }

        if let Some(on_complete) = on_complete {
            on_complete();
        }

        Ok(report.finish())
    }

    /// プラットフォームを削除
    ///
    /// 存在しないプラットフォームの削除はエラーにならず、フックは発火する。
    pub fn remove(
        &self,
        targets: &[String],
        on_complete: Option<CompletionSignal>,
    ) -> Result<Vec<String>> {
        if targets.is_empty() {
            return Err(PlatformError::NoTargets(Command::Remove.as_str().to_string()));
        }
        for target in targets {
            validate_target_name(target)?;
        }

        for target in targets {
            self.shared.hooks.fire(HookEvent::BeforePlatformRm);
            remove_dir_if_exists(&self.shared.project.platform_dir(target))?;
            self.shared.overrides.remove(target)?;
            self.shared.hooks.fire(HookEvent::AfterPlatformRm);
            info!(platform = %target, "platform removed");
        }

        if let Some(on_complete) = on_complete {
            on_complete();
        }

        Ok(targets.to_vec())
    }
}

/// 1ターゲット分の add パイプライン
///
/// 成功時は再インストールしたプラグイン名を返す。
async fn add_platform(
    shared: &Shared,
    platform: &dyn Platform,
    manifest: &Manifest,
    target: &str,
) -> Result<Vec<String>> {
    let project = &shared.project;
    let output_dir = project.platform_dir(target);

    debug!(platform = target, "checking requirements");
    platform
        .check_requirements(shared.runner.as_ref())
        .await
        .map_err(|detail| PlatformError::UnmetRequirements {
            target: target.to_string(),
            detail,
        })?;

    std::fs::create_dir_all(project.platforms_dir())
        .map_err(|e| PlatformError::from(e).with_target(target))?;
    let input = GeneratorInput {
        output_dir: output_dir.clone(),
        package_id: manifest.package_id(),
        name: manifest.display_name(),
    };
    let invocation =
        Invocation::new(shared.tools.generator(&platform.repo())).args(platform.generator_args(&input));
    debug!(platform = target, args = ?invocation.args_lossy(), "running create script");
    let created = shared.runner.run(&invocation, project.root()).await;
    if !created.success {
        return Err(PlatformError::GeneratorFailed {
            target: target.to_string(),
            output: created.output,
        });
    }

    debug!(platform = target, "updating project from manifest");
    platform
        .open_project(&output_dir)
        .update_project(manifest, &project.app_dir())
        .await
        .map_err(|e| {
            if e.target().is_some() {
                return e;
            }
            PlatformError::ProjectUpdate {
                target: target.to_string(),
                detail: e.to_string(),
            }
        })?;

    shared
        .overrides
        .ensure(target)
        .map_err(|e| e.with_target(target))?;
    fire_blocking(shared, HookEvent::AfterPlatformAdd).await;

    reinstall_plugins(shared, target, &output_dir).await
}

/// インストール済みプラグインを新しいサブプロジェクトへ1つずつ再インストール
///
/// 最初の失敗で残りのプラグインは処理しない。
async fn reinstall_plugins(shared: &Shared, target: &str, output_dir: &Path) -> Result<Vec<String>> {
    let plugins_dir = shared.project.plugins_dir();
    let plugins = shared
        .project
        .installed_plugins()
        .map_err(|e| e.with_target(target))?;

    for plugin in &plugins {
        let invocation = Invocation::new(&shared.tools.plugin_installer)
            .arg("--platform")
            .arg(target)
            .arg("--project")
            .arg(output_dir)
            .arg("--plugin")
            .arg(plugin)
            .arg("--plugins_dir")
            .arg(&plugins_dir);
        debug!(platform = target, plugin = %plugin, "reinstalling plugin");

        let installed = shared.runner.run(&invocation, shared.project.root()).await;
        if !installed.success {
            return Err(PlatformError::PluginReinstallFailed {
                plugin: plugin.clone(),
                target: target.to_string(),
                output: installed.output,
            });
        }
    }

    Ok(plugins)
}

/// タスク内からのフック通知（フックスクリプトはブロッキングで実行される）
async fn fire_blocking(shared: &Shared, event: HookEvent) {
    let hooks = Arc::clone(&shared.hooks);
    if let Err(e) = tokio::task::spawn_blocking(move || hooks.fire(event)).await {
        warn!(hook = %event, error = %e, "hook notification did not finish");
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
