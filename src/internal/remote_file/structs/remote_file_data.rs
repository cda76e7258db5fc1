use chrono::{DateTime, FixedOffset};

use super::remote_path::RemotePath;

/// 从 PROPFIND 响应中整理出来的单个远程资源
#[derive(Debug, Clone)]
pub struct RemoteFileData {
    pub path: RemotePath,           // 相对 base_url 的规范化路径
    pub name: String,               // 最后一级名称（取自 href，而非 displayname）
    pub is_dir: bool,               // 是否目录
    pub size: Option<u64>,          // 文件大小（字节）
    pub last_modified: Option<DateTime<FixedOffset>>, // 原始时间
    pub mime: Option<String>,       // MIME 类型
    pub etag: Option<String>,       // 清理后的 ETag
}

/// 资源描述：元数据查询的结果
///
/// `size` 为 `None` 表示目录（是否为空需要再调用一次列表确认），
/// 有值则表示该字节长度的文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    pub size: Option<u64>,
    pub is_dir: bool,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub etag: Option<String>,
}

impl ResourceInfo {
    pub fn directory() -> Self {
        Self { size: None, is_dir: true, last_modified: None, etag: None }
    }

    pub fn file(size: u64) -> Self {
        Self { size: Some(size), is_dir: false, last_modified: None, etag: None }
    }

    /// 按约定，没有大小的资源一律当作目录处理
    pub fn is_directory(&self) -> bool {
        self.is_dir || self.size.is_none()
    }
}

impl From<&RemoteFileData> for ResourceInfo {
    fn from(data: &RemoteFileData) -> Self {
        Self {
            // 部分服务端会给目录返回 getcontentlength，这里统一抹掉
            size: if data.is_dir { None } else { data.size },
            is_dir: data.is_dir,
            last_modified: data.last_modified,
            etag: data.etag.clone(),
        }
    }
}
