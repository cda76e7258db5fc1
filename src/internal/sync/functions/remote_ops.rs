//! 远程资源操作：连接探测、存在检查、列表、元数据、删除、复制、移动。

use tracing::{info, warn};

use crate::internal::remote_file::structs::{RemotePath, ResourceInfo};
use crate::internal::sync::structs::{
    FailureKind, OperationResult, SyncError, WebdavSyncer,
};
use crate::internal::transport::structs::TransportError;
use crate::internal::transport::traits::Transport;

/// 复制或移动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relocation {
    Copy,
    Move,
}

impl Relocation {
    fn verb(self) -> &'static str {
        match self {
            Relocation::Copy => "复制",
            Relocation::Move => "移动",
        }
    }
}

impl<T: Transport> WebdavSyncer<T> {
    /// 探测服务器是否可用
    pub async fn connect(&self) -> OperationResult {
        match self.transport.connect().await {
            Ok(()) => {
                info!("已连接到 WebDAV 服务器");
                OperationResult::ok("已连接到 WebDAV 服务器")
            }
            Err(e) => {
                warn!("无法连接到 WebDAV 服务器: {}", e);
                OperationResult::fail(
                    FailureKind::Transport,
                    format!("无法连接到 WebDAV 服务器: {e}"),
                )
            }
        }
    }

    pub async fn check(&self, path: &RemotePath) -> Result<bool, SyncError> {
        Ok(self.transport.check(path).await?)
    }

    /// 直接子项，目录以 `/` 结尾
    pub async fn list(&self, path: &RemotePath) -> Result<Vec<String>, SyncError> {
        self.transport
            .list(path)
            .await
            .map_err(|source| SyncError::List { path: path.clone(), source })
    }

    pub async fn info(&self, path: &RemotePath) -> Result<ResourceInfo, SyncError> {
        match self.transport.info(path).await {
            Ok(info) => Ok(info),
            Err(TransportError::NotFound(_)) => Err(SyncError::NotFound(path.clone())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, path: &RemotePath) -> OperationResult {
        let result = self.delete_inner(path).await;
        log_outcome(&result);
        result.into()
    }

    pub async fn copy(&self, from: &RemotePath, to: &RemotePath) -> OperationResult {
        let result = self.relocate(Relocation::Copy, from, to).await;
        log_outcome(&result);
        result.into()
    }

    pub async fn move_resource(
        &self,
        from: &RemotePath,
        to: &RemotePath,
    ) -> OperationResult {
        let result = self.relocate(Relocation::Move, from, to).await;
        log_outcome(&result);
        result.into()
    }

    /// 远程资源必须存在，否则返回 NotFound
    pub(crate) async fn require_remote(&self, path: &RemotePath) -> Result<(), SyncError> {
        if self.transport.check(path).await? {
            Ok(())
        } else {
            Err(SyncError::NotFound(path.clone()))
        }
    }

    async fn delete_inner(&self, path: &RemotePath) -> Result<String, SyncError> {
        self.cancel.check()?;
        self.require_remote(path).await?;

        self.transport.delete(path).await?;
        Ok(format!("已删除 {path}"))
    }

    async fn relocate(
        &self,
        kind: Relocation,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<String, SyncError> {
        self.cancel.check()?;
        self.require_remote(from).await?;

        match self.relocate_once(kind, from, to).await {
            Ok(()) => {}
            Err(TransportError::ParentMissing(_)) => {
                let parent = to.parent().unwrap_or_else(RemotePath::root);
                info!("{} 的父目录 {} 不存在，创建后重试", to, parent);

                self.ensure_remote_dir(&parent).await?;
                self.cancel.check()?;
                self.relocate_once(kind, from, to).await?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(format!("已{} {} 到 {}", kind.verb(), from, to))
    }

    async fn relocate_once(
        &self,
        kind: Relocation,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<(), TransportError> {
        match kind {
            Relocation::Copy => self.transport.copy(from, to).await,
            Relocation::Move => self.transport.move_to(from, to).await,
        }
    }
}

/// 把单个操作的结果写入日志
pub(crate) fn log_outcome(result: &Result<String, SyncError>) {
    match result {
        Ok(reason) => info!("{}", reason),
        Err(e) => warn!("{}", e),
    }
}
