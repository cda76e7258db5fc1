use std::collections::HashSet;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::warn;

use crate::internal::remote_file::structs::{
    RemotePath, is_child_name, parse_listing_entry,
};
use crate::internal::sync::structs::{SyncError, WebdavSyncer};
use crate::internal::transport::traits::Transport;

#[derive(Default)]
struct SearchState {
    matches: Vec<RemotePath>,
    seen: HashSet<RemotePath>,
    visited: HashSet<RemotePath>,
}

impl<T: Transport> WebdavSyncer<T> {
    /// 先序遍历 `path`，收集名称包含 `word` 的路径
    ///
    /// 目录无论是否匹配都会继续向下搜索；结果按首次出现的顺序去重。
    pub async fn search(
        &self,
        word: &str,
        path: &RemotePath,
    ) -> Result<Vec<RemotePath>, SyncError> {
        let mut state = SearchState::default();
        self.search_pre_order(word, path, 0, &mut state).await?;

        Ok(state.matches)
    }

    fn search_pre_order<'a>(
        &'a self,
        word: &'a str,
        dir: &'a RemotePath,
        depth: usize,
        state: &'a mut SearchState,
    ) -> BoxFuture<'a, Result<(), SyncError>> {
        async move {
            self.cancel.check()?;

            if depth > self.options.max_depth {
                return Err(SyncError::DepthExceeded {
                    location: dir.to_string(),
                    max_depth: self.options.max_depth,
                });
            }
            if !state.visited.insert(dir.clone()) {
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
                if name.contains(word) && state.seen.insert(child.clone()) {
                    state.matches.push(child.clone());
                }
                if is_dir {
                    self.search_pre_order(word, &child, depth + 1, state).await?;
                }
            }

            Ok(())
        }
        .boxed()
    }
}
