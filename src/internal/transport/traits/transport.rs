//! 传输层能力接口：同步核心只依赖这一组远程操作。
//!
//! 生产实现见 [`WebdavTransport`](crate::transport::WebdavTransport)；测试中使用内存实现。

use std::path::Path;

use async_trait::async_trait;

use crate::internal::remote_file::structs::{RemotePath, ResourceInfo};
use crate::internal::transport::structs::transfer_progress::ProgressState;
use crate::internal::transport::structs::transport_error::TransportError;

/// 远程命名空间上的一组操作
///
/// 所有路径都是规范化的 [`RemotePath`]。一个实现对应一个连接会话，
/// 核心逻辑按顺序逐个 await，不会并发调用同一个实现。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 探测连接是否可用，默认实现为列出根目录。
    async fn connect(&self) -> Result<(), TransportError> {
        self.list(&RemotePath::root()).await.map(|_| ())
    }

    /// 资源是否存在
    async fn check(&self, path: &RemotePath) -> Result<bool, TransportError>;

    /// 列出直接子项名称，目录以 `/` 结尾，保持服务端返回顺序
    async fn list(&self, path: &RemotePath) -> Result<Vec<String>, TransportError>;

    /// 查询资源描述
    async fn info(&self, path: &RemotePath) -> Result<ResourceInfo, TransportError>;

    /// 是否目录
    async fn is_dir(&self, path: &RemotePath) -> Result<bool, TransportError> {
        Ok(self.info(path).await?.is_directory())
    }

    /// 下载远程文件写入本地路径，过程中更新 `progress`
    async fn download(
        &self,
        remote: &RemotePath,
        local: &Path,
        progress: &ProgressState,
    ) -> Result<(), TransportError>;

    /// 上传本地文件到远程路径；父目录不存在时返回 [`TransportError::ParentMissing`]
    async fn upload(
        &self,
        local: &Path,
        remote: &RemotePath,
        progress: &ProgressState,
    ) -> Result<(), TransportError>;

    /// 创建一级目录；祖先目录不存在时返回 [`TransportError::ParentMissing`]
    async fn mkdir(&self, path: &RemotePath) -> Result<(), TransportError>;

    async fn delete(&self, path: &RemotePath) -> Result<(), TransportError>;

    async fn copy(
        &self,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<(), TransportError>;

    async fn move_to(
        &self,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<(), TransportError>;
}
