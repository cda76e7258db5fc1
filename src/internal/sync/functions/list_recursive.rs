//! 远程目录递归列表（后序：子孙在其所在目录之前）。

use std::collections::HashSet;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::internal::remote_file::structs::{
    RemotePath, is_child_name, parse_listing_entry,
};
use crate::internal::sync::structs::{SyncError, WebdavSyncer};
use crate::internal::transport::traits::Transport;

/// 递归列表中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub path: RemotePath,
    pub is_dir: bool,
}

/// 一次遍历的累积状态
#[derive(Default)]
struct TreeWalk {
    entries: Vec<RemoteEntry>,
    seen: HashSet<RemotePath>,
    visited: HashSet<RemotePath>,
}

impl TreeWalk {
    fn push(&mut self, path: RemotePath, is_dir: bool) {
        if self.seen.insert(path.clone()) {
            self.entries.push(RemoteEntry { path, is_dir });
        }
    }
}

impl<T: Transport> WebdavSyncer<T> {
    /// 列出 `path` 下的全部子孙路径，去重且顺序稳定
    ///
    /// 任一层级列表失败即终止，返回 [`SyncError::List`]。
    pub async fn list_recursive(
        &self,
        path: &RemotePath,
    ) -> Result<Vec<RemotePath>, SyncError> {
        let entries = self.walk_remote_tree(path).await?;
        Ok(entries.into_iter().map(|entry| entry.path).collect())
    }

    /// 与 [`list_recursive`](Self::list_recursive) 相同，但保留目录标记
    pub(crate) async fn walk_remote_tree(
        &self,
        path: &RemotePath,
    ) -> Result<Vec<RemoteEntry>, SyncError> {
        let mut walk = TreeWalk::default();
        self.collect_post_order(path, 0, &mut walk).await?;

        debug!("{} 下共 {} 项", path, walk.entries.len());
        Ok(walk.entries)
    }

    fn collect_post_order<'a>(
        &'a self,
        dir: &'a RemotePath,
        depth: usize,
        walk: &'a mut TreeWalk,
    ) -> BoxFuture<'a, Result<(), SyncError>> {
        async move {
            self.cancel.check()?;

            if depth > self.options.max_depth {
                return Err(SyncError::DepthExceeded {
                    location: dir.to_string(),
                    max_depth: self.options.max_depth,
                });
            }
            // 同一目录被列出两次时只展开一次
            if !walk.visited.insert(dir.clone()) {
                return Ok(());
            }

            let names = self
                .transport
                .list(dir)
                .await
                .map_err(|source| SyncError::List { path: dir.clone(), source })?;

            for entry in &names {
                let (name, is_dir) = parse_listing_entry(entry);
                if !is_child_name(name) {
                    if !name.is_empty() {
                        warn!("{} 下的条目名称 {:?} 无效，跳过", dir, entry);
                    }
                    continue;
                }

                let child = dir.join(name);
                if is_dir {
                    self.collect_post_order(&child, depth + 1, walk).await?;
                }
                walk.push(child, is_dir);
            }

            Ok(())
        }
        .boxed()
    }
}
