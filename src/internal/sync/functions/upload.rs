//! 上传方向的目录对账。
//!
//! 规则：
//! - 远程目标不存在：目录先建后逐项上传，文件直接上传
//! - 远程目标存在：目录对比两侧完整子孙集合，文件只比较大小
//! - 大小相同即视为一致，不比较内容或修改时间

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::internal::local_file::functions::{
    base_name, local_metadata, walk_local_tree,
};
use crate::internal::local_file::structs::LocalEntry;
use crate::internal::remote_file::structs::RemotePath;
use crate::internal::sync::functions::remote_ops::log_outcome;
use crate::internal::sync::structs::{OperationResult, SyncError, WebdavSyncer};
use crate::internal::transport::traits::Transport;

impl<T: Transport> WebdavSyncer<T> {
    /// 上传本地文件或目录
    ///
    /// - `recurse = false`：目标为 `remote_base/<本地名称>`
    /// - `recurse = true`：`remote_base` 即目标路径，由调用方算好
    pub async fn upload(
        &self,
        local: &Path,
        remote_base: &RemotePath,
        recurse: bool,
    ) -> OperationResult {
        let result = self.upload_entry(local, remote_base, recurse).await;
        log_outcome(&result);
        result.into()
    }

    async fn upload_entry(
        &self,
        local: &Path,
        remote_base: &RemotePath,
        recurse: bool,
    ) -> Result<String, SyncError> {
        self.cancel.check()?;

        let meta = local_metadata(local)
            .await?
            .ok_or_else(|| SyncError::LocalNotFound(local.to_path_buf()))?;

        let target = if recurse {
            remote_base.clone()
        } else {
            let name = base_name(local)
                .ok_or_else(|| SyncError::LocalNotFound(local.to_path_buf()))?;
            remote_base.join(&name)
        };

        if !self.transport.check(&target).await? {
            return if meta.is_dir() {
                self.upload_new_directory(local, &target).await
            } else {
                self.upload_file(local, &target).await
            };
        }

        let remote_is_dir = self.transport.is_dir(&target).await?;
        match (meta.is_dir(), remote_is_dir) {
            (true, true) => self.reconcile_directory(local, &target).await,
            (false, false) => {
                if self.refresh_file(local, &target, meta.len()).await? {
                    Ok(format!("已更新 {} 到 {}", local.display(), target))
                } else {
                    Ok(format!("{target} 大小一致，跳过上传"))
                }
            }
            (true, false) => Err(SyncError::Conflict(format!(
                "本地 {} 是目录，远程 {} 是文件",
                local.display(),
                target
            ))),
            (false, true) => Err(SyncError::Conflict(format!(
                "本地 {} 是文件，远程 {} 是目录",
                local.display(),
                target
            ))),
        }
    }

    /// 远程不存在的目录：创建后逐项上传全部子孙
    async fn upload_new_directory(
        &self,
        local: &Path,
        target: &RemotePath,
    ) -> Result<String, SyncError> {
        let entries = walk_local_tree(local, self.options.max_depth).await?;

        self.create_remote_directory(target).await?;
        info!("已创建远程目录 {}，开始上传 {} 项", target, entries.len());

        self.apply_tree(local, target, &entries, &HashMap::new()).await
    }

    /// 两侧都是目录：对比完整子孙集合，补齐缺失项、更新大小不一致的文件
    async fn reconcile_directory(
        &self,
        local: &Path,
        target: &RemotePath,
    ) -> Result<String, SyncError> {
        let remote: HashMap<RemotePath, bool> = self
            .walk_remote_tree(target)
            .await?
            .into_iter()
            .map(|entry| (entry.path, entry.is_dir))
            .collect();
        let entries = walk_local_tree(local, self.options.max_depth).await?;

        debug!(
            "对账 {} ↔ {}：本地 {} 项，远程 {} 项",
            local.display(),
            target,
            entries.len(),
            remote.len()
        );

        self.apply_tree(local, target, &entries, &remote).await
    }

    /// 逐项处理本地目录树，单项失败只记录，继续处理其余条目
    ///
    /// `remote` 为远程已有路径及其是否目录。创建失败的目录，其子孙不再处理。
    async fn apply_tree(
        &self,
        local: &Path,
        target: &RemotePath,
        entries: &[LocalEntry],
        remote: &HashMap<RemotePath, bool>,
    ) -> Result<String, SyncError> {
        let mut failures = Vec::new();
        let mut failed_dirs: Vec<PathBuf> = Vec::new();
        let mut changed = 0usize;
        let mut skipped = 0usize;

        for entry in entries {
            if failed_dirs.iter().any(|dir| entry.path.starts_with(dir)) {
                continue;
            }

            let remote_path = target.join(&entry.relative);
            let outcome = self.apply_entry(entry, &remote_path, remote.get(&remote_path)).await;

            match outcome {
                Ok(true) => changed += 1,
                Ok(false) => skipped += 1,
                Err(SyncError::Cancelled) => return Err(SyncError::Cancelled),
                Err(e) => {
                    warn!("{}", e);
                    if entry.is_dir {
                        failed_dirs.push(entry.path.clone());
                    }
                    failures.push(e);
                }
            }
        }

        if failures.is_empty() {
            Ok(format!(
                "{} → {}：更新 {} 项，跳过 {} 项",
                local.display(),
                target,
                changed,
                skipped
            ))
        } else {
            Err(SyncError::Incomplete {
                location: format!("{} → {}", local.display(), target),
                failures,
            })
        }
    }

    /// 处理单个条目，返回是否产生了远程变更
    async fn apply_entry(
        &self,
        entry: &LocalEntry,
        remote_path: &RemotePath,
        remote_is_dir: Option<&bool>,
    ) -> Result<bool, SyncError> {
        self.cancel.check()?;

        match (entry.is_dir, remote_is_dir) {
            (true, None) => {
                self.create_remote_directory(remote_path).await?;
                Ok(true)
            }
            (true, Some(true)) => Ok(false),
            (false, None) => {
                self.upload_file(&entry.path, remote_path).await?;
                Ok(true)
            }
            (false, Some(false)) => {
                self.refresh_file(&entry.path, remote_path, entry.size).await
            }
            (true, Some(false)) => Err(SyncError::Conflict(format!(
                "本地 {} 是目录，远程 {} 是文件",
                entry.path.display(),
                remote_path
            ))),
            (false, Some(true)) => Err(SyncError::Conflict(format!(
                "本地 {} 是文件，远程 {} 是目录",
                entry.path.display(),
                remote_path
            ))),
        }
    }

    /// 两侧都是文件：大小相同跳过，否则重新上传；返回是否重新上传
    async fn refresh_file(
        &self,
        local: &Path,
        target: &RemotePath,
        local_size: u64,
    ) -> Result<bool, SyncError> {
        let remote_size = self.transport.info(target).await?.size;

        if remote_size == Some(local_size) {
            debug!("{} 大小一致，跳过", target);
            return Ok(false);
        }

        info!(
            "{} 大小不一致（本地 {}，远程 {:?}），重新上传",
            target, local_size, remote_size
        );
        self.upload_file(local, target).await?;
        Ok(true)
    }
}
