//! 下载方向：单文件或整个目录，目录下载遇错即停。

use std::path::Path;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{info, warn};

use crate::internal::local_file::functions::create_local_dir;
use crate::internal::remote_file::structs::{
    RemotePath, is_child_name, parse_listing_entry,
};
use crate::internal::sync::functions::remote_ops::log_outcome;
use crate::internal::sync::structs::{OperationResult, SyncError, WebdavSyncer};
use crate::internal::transport::traits::Transport;

impl<T: Transport> WebdavSyncer<T> {
    /// 下载远程文件或目录到 `local`
    ///
    /// 远程是目录时，`local` 即本地目录，子项写入 `local/<名称>`。
    pub async fn download(&self, remote: &RemotePath, local: &Path) -> OperationResult {
        let result = self.download_entry(remote, local, 0).await;
        log_outcome(&result);
        result.into()
    }

    fn download_entry<'a>(
        &'a self,
        remote: &'a RemotePath,
        local: &'a Path,
        depth: usize,
    ) -> BoxFuture<'a, Result<String, SyncError>> {
        async move {
            self.cancel.check()?;

            if depth > self.options.max_depth {
                return Err(SyncError::DepthExceeded {
                    location: remote.to_string(),
                    max_depth: self.options.max_depth,
                });
            }

            self.require_remote(remote).await?;

            let info = self.info(remote).await?;
            if let Some(size) = info.size.filter(|_| !info.is_dir) {
                return self.fetch_file(remote, local, size).await;
            }

            // 没有大小：目录，或服务端没给出长度的文件，需要再列一次确认
            let names = self.list(remote).await?;
            if names.is_empty() {
                warn!("{} 是空目录或文件已损坏，跳过", remote);
                return Ok(format!("{remote} 是空目录或文件已损坏，已跳过"));
            }

            create_local_dir(local).await?;
            info!("下载目录 {} 到 {}，共 {} 项", remote, local.display(), names.len());

            for entry in &names {
                let (name, _) = parse_listing_entry(entry);
                if !is_child_name(name) {
                    warn!("{} 下的条目名称 {:?} 无效，跳过", remote, entry);
                    continue;
                }

                let child_remote = remote.join(name);
                let child_local = local.join(name);
                let reason = self
                    .download_entry(&child_remote, &child_local, depth + 1)
                    .await?;
                info!("{}", reason);
            }

            Ok(format!("已下载目录 {} 到 {}", remote, local.display()))
        }
        .boxed()
    }
}
