//! 单文件传输：父目录自动创建、传输后大小校验、残留清理。

use std::path::Path;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::internal::local_file::functions::{
    commit_staged, create_local_dir, file_size, local_metadata, remove_partial,
    staging_path,
};
use crate::internal::remote_file::structs::RemotePath;
use crate::internal::sync::functions::remote_ops::log_outcome;
use crate::internal::sync::structs::{OperationResult, SyncError, WebdavSyncer};
use crate::internal::transport::structs::{TransferDirection, TransportError};
use crate::internal::transport::traits::Transport;

impl<T: Transport> WebdavSyncer<T> {
    /// 创建远程目录，缺失的上级目录会一并创建；目录已存在视为成功
    pub async fn create_directory(&self, path: &RemotePath) -> OperationResult {
        let result = self.create_directory_inner(path).await;
        log_outcome(&result);
        result.into()
    }

    /// 传输单个文件，目录不在此处理
    pub async fn transfer_one(
        &self,
        direction: TransferDirection,
        local: &Path,
        remote: &RemotePath,
    ) -> OperationResult {
        let result = match direction {
            TransferDirection::Upload => self.transfer_upload(local, remote).await,
            TransferDirection::Download => self.transfer_download(remote, local).await,
        };
        log_outcome(&result);
        result.into()
    }

    async fn create_directory_inner(
        &self,
        path: &RemotePath,
    ) -> Result<String, SyncError> {
        self.cancel.check()?;

        if self.transport.check(path).await? {
            if self.transport.is_dir(path).await? {
                return Ok(format!("远程目录 {path} 已存在"));
            }
            return Err(SyncError::Conflict(format!(
                "{path} 已存在且不是目录"
            )));
        }

        self.create_remote_directory(path).await?;
        Ok(format!("已创建远程目录 {path}"))
    }

    /// mkdir；上级缺失时先递归创建上级，再对原目标重试一次
    ///
    /// 遇到 ParentMissing 以外的错误即终止。
    pub(crate) fn create_remote_directory<'a>(
        &'a self,
        path: &'a RemotePath,
    ) -> BoxFuture<'a, Result<(), SyncError>> {
        async move {
            self.cancel.check()?;

            match self.transport.mkdir(path).await {
                Ok(()) => {
                    debug!("已创建远程目录 {}", path);
                    Ok(())
                }
                Err(TransportError::ParentMissing(_)) => {
                    let parent = path.parent().ok_or_else(|| {
                        SyncError::CreateDirectory {
                            path: path.clone(),
                            source: TransportError::ParentMissing(RemotePath::root()),
                        }
                    })?;
                    info!("{} 的上级目录不存在，先创建 {}", path, parent);

                    self.create_remote_directory(&parent).await?;
                    self.transport.mkdir(path).await.map_err(|source| {
                        SyncError::CreateDirectory { path: path.clone(), source }
                    })
                }
                Err(source) => {
                    Err(SyncError::CreateDirectory { path: path.clone(), source })
                }
            }
        }
        .boxed()
    }

    /// 保证远程目录链存在：自下而上探测缺失的层级，再自上而下逐级创建
    ///
    /// 每个缺失的层级只产生一次 mkdir。
    pub(crate) async fn ensure_remote_dir(&self, dir: &RemotePath) -> Result<(), SyncError> {
        let mut missing = Vec::new();
        let mut current = Some(dir.clone());

        while let Some(path) = current {
            if path.is_root() || self.transport.check(&path).await? {
                break;
            }
            current = path.parent();
            missing.push(path);
        }

        for path in missing.iter().rev() {
            self.cancel.check()?;
            self.transport.mkdir(path).await.map_err(|source| {
                SyncError::CreateDirectory { path: path.clone(), source }
            })?;
            info!("已创建远程目录 {}", path);
        }

        Ok(())
    }

    /// 上传；父目录缺失时创建父目录并只重试一次
    pub(crate) async fn put_file(
        &self,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<(), SyncError> {
        self.cancel.check()?;

        match self.transport.upload(local, remote, &self.progress).await {
            Ok(()) => Ok(()),
            Err(TransportError::ParentMissing(_)) => {
                let parent = remote.parent().unwrap_or_else(RemotePath::root);
                info!("{} 的父目录 {} 不存在，创建后重试上传", remote, parent);

                self.ensure_remote_dir(&parent).await?;
                self.cancel.check()?;
                self.transport
                    .upload(local, remote, &self.progress)
                    .await
                    .map_err(SyncError::from)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 上传后校验远程大小；不一致时删除刚写入的远程文件
    pub(crate) async fn verify_upload(
        &self,
        remote: &RemotePath,
        local_size: u64,
    ) -> Result<(), SyncError> {
        let remote_size = self.transport.info(remote).await?.size;

        if remote_size == Some(local_size) {
            return Ok(());
        }

        warn!(
            "{} 上传后大小不一致（本地 {}，远程 {:?}），删除远程文件",
            remote, local_size, remote_size
        );
        if let Err(e) = self.transport.delete(remote).await {
            warn!("无法删除不完整的远程文件 {}: {}", remote, e);
        }

        Err(SyncError::PartialTransfer(format!(
            "{remote} 上传不完整：本地 {local_size} 字节，远程 {}",
            remote_size.map_or("未知".to_string(), |s| format!("{s} 字节"))
        )))
    }

    /// 上传单个文件并校验
    pub(crate) async fn upload_file(
        &self,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<String, SyncError> {
        let local_size = file_size(local).await?;

        self.put_file(local, remote).await?;
        self.verify_upload(remote, local_size).await?;

        Ok(format!("已上传 {} 到 {}", local.display(), remote))
    }

    /// 下载单个已知大小的远程文件
    ///
    /// 本地已有同样大小的文件时跳过。数据先写入 `<name>.part`，
    /// 大小一致后才替换目标；失败或大小不一致时只删除暂存文件。
    pub(crate) async fn fetch_file(
        &self,
        remote: &RemotePath,
        local: &Path,
        remote_size: u64,
    ) -> Result<String, SyncError> {
        self.cancel.check()?;

        if let Some(meta) = local_metadata(local).await? {
            if meta.is_dir() {
                return Err(SyncError::Conflict(format!(
                    "本地 {} 是目录，无法写入远程文件 {}",
                    local.display(),
                    remote
                )));
            }
            if meta.len() == remote_size {
                return Ok(format!("{} 大小一致，跳过下载", local.display()));
            }
            info!(
                "{} 大小不一致（本地 {}，远程 {}），重新下载",
                local.display(),
                meta.len(),
                remote_size
            );
        }

        if let Some(parent) = local.parent() {
            create_local_dir(parent).await?;
        }

        // 校验通过前不触碰目标文件
        let staged = staging_path(local);
        if let Err(e) = self.transport.download(remote, &staged, &self.progress).await {
            remove_partial(&staged).await;
            return Err(e.into());
        }

        let staged_size = file_size(&staged).await?;
        if staged_size != remote_size {
            remove_partial(&staged).await;
            return Err(SyncError::PartialTransfer(format!(
                "{remote} 下载不完整：远程 {remote_size} 字节，本地 {staged_size} 字节"
            )));
        }

        if let Err(e) = commit_staged(&staged, local).await {
            remove_partial(&staged).await;
            return Err(e);
        }

        Ok(format!("已下载 {} 到 {}", remote, local.display()))
    }

    async fn transfer_upload(
        &self,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<String, SyncError> {
        match local_metadata(local).await? {
            None => Err(SyncError::LocalNotFound(local.to_path_buf())),
            Some(meta) if meta.is_dir() => Err(SyncError::Conflict(format!(
                "{} 是目录，单文件传输只处理文件",
                local.display()
            ))),
            Some(_) => self.upload_file(local, remote).await,
        }
    }

    async fn transfer_download(
        &self,
        remote: &RemotePath,
        local: &Path,
    ) -> Result<String, SyncError> {
        self.require_remote(remote).await?;

        let info = self.info(remote).await?;
        match info.size {
            Some(size) if !info.is_directory() => {
                self.fetch_file(remote, local, size).await
            }
            _ => Err(SyncError::Conflict(format!(
                "{remote} 是目录，单文件传输只处理文件"
            ))),
        }
    }
}
