use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::internal::local_file::structs::LocalEntry;
use crate::internal::sync::structs::SyncError;

/// 先序遍历本地目录（不含起点），同级按文件名排序
///
/// 目录总是排在其内容之前。符号链接按其指向的文件或目录处理，
/// 循环链接与失效链接会使遍历失败。
/// 超过 `max_depth` 层的条目会使整个遍历失败，而不是被静默截断。
pub async fn walk_local_tree(
    root: &Path,
    max_depth: usize,
) -> Result<Vec<LocalEntry>, SyncError> {
    let root = root.to_path_buf();

    let task_root = root.clone();
    tokio::task::spawn_blocking(move || walk_blocking(&task_root, max_depth))
        .await
        .map_err(|e| SyncError::LocalIo {
            path: root,
            source: std::io::Error::other(e),
        })?
}

fn walk_blocking(
    root: &Path,
    max_depth: usize,
) -> Result<Vec<LocalEntry>, SyncError> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth.saturating_add(1))
        .follow_links(true)
        .sort_by_file_name();

    let mut entries = Vec::new();

    for item in walker {
        let item = item.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            SyncError::LocalIo { path, source: e.into() }
        })?;

        if item.depth() > max_depth {
            return Err(SyncError::DepthExceeded {
                location: item.path().display().to_string(),
                max_depth,
            });
        }

        let relative = relative_slash_path(root, item.path());
        let is_dir = item.file_type().is_dir();
        let size = if is_dir {
            0
        } else {
            item.metadata()
                .map_err(|e| SyncError::LocalIo {
                    path: item.path().to_path_buf(),
                    source: e.into(),
                })?
                .len()
        };

        entries.push(LocalEntry {
            path: item.path().to_path_buf(),
            relative,
            name: item.file_name().to_string_lossy().into_owned(),
            is_dir,
            size,
        });
    }

    Ok(entries)
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
