use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::internal::sync::structs::SyncError;

/// 本地目录的权限：属主读写执行，同组读执行
#[cfg(unix)]
const LOCAL_DIR_MODE: u32 = 0o750;

fn local_io(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::LocalIo { path: path.to_path_buf(), source }
}

/// 读取本地元数据，不存在时返回 `None`
pub async fn local_metadata(path: &Path) -> Result<Option<Metadata>, SyncError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(local_io(path, e)),
    }
}

pub async fn file_size(path: &Path) -> Result<u64, SyncError> {
    fs::metadata(path)
        .await
        .map(|meta| meta.len())
        .map_err(|e| local_io(path, e))
}

/// 取路径最后一级名称；`.`、`..` 之类的路径先规范化再取
pub fn base_name(path: &Path) -> Option<String> {
    if let Some(name) = path.file_name() {
        return Some(name.to_string_lossy().into_owned());
    }

    std::fs::canonicalize(path)
        .ok()?
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// 递归创建本地目录，已存在时直接返回
pub async fn create_local_dir(path: &Path) -> Result<(), SyncError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(LOCAL_DIR_MODE);

    builder.create(path).await.map_err(|e| local_io(path, e))?;
    debug!("本地目录已就绪: {}", path.display());

    Ok(())
}

/// 下载时的暂存文件：与目标同目录，文件名追加 `.part`
pub fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    target.with_file_name(name)
}

/// 校验通过的暂存文件替换到目标位置
pub async fn commit_staged(staged: &Path, target: &Path) -> Result<(), SyncError> {
    fs::rename(staged, target)
        .await
        .map_err(|e| local_io(target, e))
}

/// 删除传输失败留下的本地文件，清理失败只记录日志
pub async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("已删除残留文件 {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("无法删除残留文件 {}: {}", path.display(), e),
    }
}

