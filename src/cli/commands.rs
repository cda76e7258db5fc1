use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use webdav_sync::config::AppConfig;
use webdav_sync::open_remote_session;
use webdav_sync::remote_file::RemotePath;
use webdav_sync::sync::{CancelFlag, OperationResult, WebdavSyncer};
use webdav_sync::transport::{TransferDirection, WebdavTransport};

use super::args::{Cli, Command};
use super::logging::{init_console_logging, init_logging};

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };

    if let Command::InitConfig = cli.command {
        init_console_logging(cli.verbose);
        return init_config(&config_path);
    }

    let config = AppConfig::load(&config_path)
        .with_context(|| format!("无法加载配置 {}", config_path.display()))?;
    init_logging(&config.logging, cli.verbose)?;

    let cancel = CancelFlag::new();
    watch_interrupt(cancel.clone());

    let syncer = match open_remote_session(&config, cancel).await {
        Ok(syncer) => syncer,
        Err(e) => {
            let result = e.to_result();
            eprintln!("{result}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let progress_task = spawn_progress_line(&syncer);
    let exit = execute(&syncer, &config, cli.command).await;
    if let Some(task) = progress_task {
        task.abort();
        eprintln!();
    }

    exit
}

fn init_config(path: &Path) -> Result<ExitCode> {
    if AppConfig::write_default(path)? {
        info!("已生成配置文件 {}", path.display());
    } else {
        info!("配置文件 {} 已存在，无需生成", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

async fn execute(
    syncer: &WebdavSyncer<WebdavTransport>,
    config: &AppConfig,
    command: Command,
) -> Result<ExitCode> {
    let result = match command {
        Command::InitConfig => return Ok(ExitCode::SUCCESS),
        Command::List { path, recursive } => {
            let target = config.resolve_remote(path.as_deref().unwrap_or(""))?;
            if recursive {
                syncer
                    .list_recursive(&target)
                    .await
                    .map(|paths| print_lines(paths.iter()))
            } else {
                syncer.list(&target).await.map(|names| print_lines(names.iter()))
            }
        }
        Command::Search { word, path } => {
            let target = config.resolve_remote(path.as_deref().unwrap_or(""))?;
            syncer
                .search(&word, &target)
                .await
                .map(|paths| print_lines(paths.iter()))
        }
        Command::Info { path } => {
            let target = config.resolve_remote(&path)?;
            syncer.info(&target).await.map(|info| {
                match info.size {
                    Some(size) if !info.is_directory() => {
                        println!("{target}\t文件\t{size} 字节")
                    }
                    _ => println!("{target}\t目录"),
                }
                OperationResult::ok(format!("{target} 查询完成"))
            })
        }
        Command::Upload { local, remote } => {
            let base = config.resolve_remote(remote.as_deref().unwrap_or(""))?;
            Ok(syncer.upload(&local, &base, false).await)
        }
        Command::Download { remote, local } => {
            let source = config.resolve_remote(&remote)?;
            let target = local.unwrap_or_else(|| default_download_target(config, &source));
            Ok(syncer.download(&source, &target).await)
        }
        Command::Delete { path } => {
            let target = config.resolve_remote(&path)?;
            Ok(syncer.delete(&target).await)
        }
        Command::Copy { from, to } => {
            let (from, to) = (config.resolve_remote(&from)?, config.resolve_remote(&to)?);
            Ok(syncer.copy(&from, &to).await)
        }
        Command::Move { from, to } => {
            let (from, to) = (config.resolve_remote(&from)?, config.resolve_remote(&to)?);
            Ok(syncer.move_resource(&from, &to).await)
        }
        Command::Mkdir { path } => {
            let target = config.resolve_remote(&path)?;
            Ok(syncer.create_directory(&target).await)
        }
    };

    let result = result.unwrap_or_else(|e| e.to_result());
    if result.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{result}");
        Ok(ExitCode::FAILURE)
    }
}

fn print_lines<I, D>(items: I) -> OperationResult
where
    I: Iterator<Item = D>,
    D: std::fmt::Display,
{
    let mut count = 0usize;
    for item in items {
        println!("{item}");
        count += 1;
    }
    OperationResult::ok(format!("共 {count} 项"))
}

fn default_download_target(config: &AppConfig, source: &RemotePath) -> PathBuf {
    match source.name() {
        "" => config.local.path.clone(),
        name => config.local.path.join(name),
    }
}

/// Ctrl-C 只置位取消标志，当前步骤完成后流程自行停止
fn watch_interrupt(cancel: CancelFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到中断信号，当前步骤完成后停止");
            cancel.cancel();
        }
    });
}

/// 终端下在 stderr 上刷新一行传输进度
fn spawn_progress_line(
    syncer: &WebdavSyncer<WebdavTransport>,
) -> Option<JoinHandle<()>> {
    if !std::io::stderr().is_terminal() {
        return None;
    }

    let mut watcher = syncer.progress().watch();
    Some(tokio::spawn(async move {
        while let Ok(progress) = watcher.changed().await {
            let verb = match progress.direction {
                TransferDirection::Upload => "上传",
                TransferDirection::Download => "下载",
            };
            let pct = progress.pct();
            let mut stderr = std::io::stderr().lock();
            let _ = if pct.is_nan() {
                write!(stderr, "\r{} {} {} 字节", verb, progress.path, progress.bytes_done)
            } else {
                write!(stderr, "\r{} {} {:.1}%", verb, progress.path, pct)
            };
            let _ = stderr.flush();
        }
    }))
}
