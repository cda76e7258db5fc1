//! 同步核心错误类型。

use std::path::PathBuf;

use thiserror::Error;

use crate::internal::remote_file::structs::RemotePath;
use crate::internal::transport::structs::TransportError;

use super::operation_result::{FailureKind, OperationResult};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("远程资源 {0} 不存在")]
    NotFound(RemotePath),

    #[error("找不到本地文件 {}，中止上传", .0.display())]
    LocalNotFound(PathBuf),

    #[error("列出远程目录 {path} 失败: {source}")]
    List {
        path: RemotePath,
        #[source]
        source: TransportError,
    },

    #[error("{location} 超出最大递归深度 {max_depth}")]
    DepthExceeded { location: String, max_depth: usize },

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("无法创建远程目录 {path}: {source}")]
    CreateDirectory {
        path: RemotePath,
        #[source]
        source: TransportError,
    },

    #[error("{0}")]
    PartialTransfer(String),

    #[error("本地文件操作失败 {}: {source}", .path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{location} 部分失败，共 {} 项: {}", .failures.len(), first_reason(.failures))]
    Incomplete {
        location: String,
        failures: Vec<SyncError>,
    },

    #[error("操作已取消")]
    Cancelled,
}

fn first_reason(failures: &[SyncError]) -> String {
    failures.first().map(|e| e.to_string()).unwrap_or_default()
}

impl SyncError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SyncError::NotFound(_) | SyncError::LocalNotFound(_) => {
                FailureKind::NotFound
            }
            SyncError::List { .. } | SyncError::DepthExceeded { .. } => {
                FailureKind::ListError
            }
            SyncError::Transport(e) => transport_kind(e),
            SyncError::CreateDirectory { source, .. } => match source {
                TransportError::ParentMissing(_) => FailureKind::ParentMissing,
                other => transport_kind(other),
            },
            SyncError::PartialTransfer(_) => FailureKind::PartialTransfer,
            SyncError::LocalIo { .. } => FailureKind::LocalIo,
            SyncError::Conflict(_) => FailureKind::Conflict,
            // 汇总错误沿用第一个失败项的类型
            SyncError::Incomplete { failures, .. } => failures
                .first()
                .map(SyncError::kind)
                .unwrap_or(FailureKind::Transport),
            SyncError::Cancelled => FailureKind::Cancelled,
        }
    }

    /// 转为结构化结果，便于读操作与写操作统一输出
    pub fn to_result(&self) -> OperationResult {
        OperationResult::fail(self.kind(), self.to_string())
    }
}

fn transport_kind(error: &TransportError) -> FailureKind {
    match error {
        TransportError::ParentMissing(_) => FailureKind::ParentMissing,
        TransportError::NotFound(_) => FailureKind::NotFound,
        TransportError::Io(_) => FailureKind::LocalIo,
        _ => FailureKind::Transport,
    }
}

impl From<SyncError> for OperationResult {
    fn from(error: SyncError) -> Self {
        error.to_result()
    }
}

impl From<Result<String, SyncError>> for OperationResult {
    fn from(result: Result<String, SyncError>) -> Self {
        match result {
            Ok(reason) => OperationResult::ok(reason),
            Err(error) => error.into(),
        }
    }
}
