//! 传输层错误类型。

use thiserror::Error;

use crate::internal::remote_file::structs::RemotePath;

/// 传输层错误
///
/// `ParentMissing` 是区分出来的特例：上层据此自动创建父目录并重试一次，
/// 不需要去匹配错误文本。
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("远程父目录不存在: {0}")]
    ParentMissing(RemotePath),

    #[error("远程资源不存在: {0}")]
    NotFound(RemotePath),

    #[error("状态异常 {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("本地文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML 解析失败: {0}")]
    Xml(String),

    #[error("路径格式错误: {0}")]
    InvalidPath(String),

    #[error("认证信息无效: {0}")]
    Auth(String),
}

impl TransportError {
    pub fn is_parent_missing(&self) -> bool {
        matches!(self, TransportError::ParentMissing(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound(_))
    }
}
