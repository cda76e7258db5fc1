//! 基于 reqwest 的 WebDAV 传输实现。
//!
//! 状态码到错误的映射（RFC 4918）：
//! - `404` → [`TransportError::NotFound`]
//! - `409` → [`TransportError::ParentMissing`]（PUT / MKCOL / COPY / MOVE 的中间目录不存在）
//! - 其余非 2xx → [`TransportError::Status`]

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, HeaderMap, HeaderValue};
use reqwest::{Body, Method, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use crate::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::remote_file::structs::{
    RemoteFileData, RemotePath, ResourceInfo,
};
use crate::internal::transport::structs::transfer_progress::{
    ProgressState, TransferDirection, TransferProgress,
};
use crate::internal::transport::structs::transport_error::TransportError;
use crate::internal::transport::traits::Transport;
use crate::internal::webdav::enums::{Depth, WebDavMethod};
use crate::internal::webdav::functions::format_url_path::format_url_path;
use crate::internal::webdav::functions::get_folders_raw_data::get_folders_raw_data;
use crate::internal::webdav::functions::send_webdav_request::send_webdav_request;
use crate::webdav::structs::MultiStatus;
use crate::webdav::traits::ToRemoteFileData;

/// 上传时每次从本地文件读取的块大小
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// WebDAV 传输实现，一个实例对应一个认证会话
#[derive(Debug, Clone)]
pub struct WebdavTransport {
    webdav_auth: WebdavAuth,
}

impl WebdavTransport {
    pub fn new(webdav_auth: WebdavAuth) -> Self {
        Self { webdav_auth }
    }

    pub fn auth(&self) -> &WebdavAuth {
        &self.webdav_auth
    }

    /// PROPFIND 并整理为领域结构体；404 转为 NotFound
    ///
    /// 不带尾部 `/` 的请求被重定向时，按目录 URL 重试一次。
    async fn propfind(
        &self,
        path: &RemotePath,
        depth: Depth,
    ) -> Result<Vec<RemoteFileData>, TransportError> {
        let as_collection = matches!(depth, Depth::One);

        let result = match self.propfind_at(path, &depth, as_collection).await {
            Err(TransportError::Status { status, .. })
                if !as_collection && is_redirect(status) =>
            {
                debug!("{} 的 PROPFIND 被重定向（{}），改用目录地址重试", path, status);
                self.propfind_at(path, &depth, true).await
            }
            other => other,
        };

        match result {
            Ok(multi_status) => Ok(multi_status
                .to_remote_file_data(&self.webdav_auth.base_url)),
            Err(TransportError::Status { status: 404, .. }) => {
                Err(TransportError::NotFound(path.clone()))
            }
            Err(e) => Err(e),
        }
    }

    async fn propfind_at(
        &self,
        path: &RemotePath,
        depth: &Depth,
        as_collection: bool,
    ) -> Result<MultiStatus, TransportError> {
        let url = format_url_path(&self.webdav_auth, path, as_collection)?;
        get_folders_raw_data(&self.webdav_auth, &url, depth).await
    }

    /// COPY / MOVE 共用：Destination 为绝对 URL，允许覆盖
    async fn relocate(
        &self,
        method: WebDavMethod,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<(), TransportError> {
        let from_url = format_url_path(&self.webdav_auth, from, false)?;
        let to_url = format_url_path(&self.webdav_auth, to, false)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Destination",
            HeaderValue::from_str(to_url.as_str())
                .map_err(|e| TransportError::InvalidPath(e.to_string()))?,
        );
        headers.insert("Overwrite", HeaderValue::from_static("T"));

        let result = send_webdav_request(
            &self.webdav_auth,
            method.to_head_method()?,
            &from_url,
            headers,
            None,
        )
        .await;

        map_mutation_status(result, from, to)
    }
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 307 | 308)
}

/// 把 PUT / MKCOL / COPY / MOVE 的状态码翻译为区分后的错误
///
/// `source` 是请求直接作用的资源，`target` 是要写入的位置（COPY / MOVE 时两者不同）。
fn map_mutation_status(
    result: Result<StatusCode, TransportError>,
    source: &RemotePath,
    target: &RemotePath,
) -> Result<(), TransportError> {
    match result {
        Ok(_) => Ok(()),
        Err(TransportError::Status { status: 404, .. }) => {
            Err(TransportError::NotFound(source.clone()))
        }
        Err(TransportError::Status { status: 409, .. }) => {
            Err(TransportError::ParentMissing(
                target.parent().unwrap_or_else(RemotePath::root),
            ))
        }
        Err(e) => Err(e),
    }
}

/// 上传流的内部状态；读出错后置为 None，流随之结束
struct UploadStream {
    file: Option<File>,
    progress: ProgressState,
    path: RemotePath,
    bytes_done: u64,
    total: u64,
}

#[async_trait]
impl Transport for WebdavTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        self.propfind(&RemotePath::root(), Depth::Zero).await.map(|_| ())
    }

    async fn check(&self, path: &RemotePath) -> Result<bool, TransportError> {
        match self.propfind(path, Depth::Zero).await {
            Ok(_) => Ok(true),
            Err(TransportError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list(
        &self,
        path: &RemotePath,
    ) -> Result<Vec<String>, TransportError> {
        let entries = self.propfind(path, Depth::One).await?;

        // 响应里包含请求路径本身，按路径过滤掉
        let names = entries
            .into_iter()
            .filter(|entry| &entry.path != path && !entry.name.is_empty())
            .map(|entry| {
                if entry.is_dir {
                    format!("{}/", entry.name)
                } else {
                    entry.name
                }
            })
            .collect();

        Ok(names)
    }

    async fn info(
        &self,
        path: &RemotePath,
    ) -> Result<ResourceInfo, TransportError> {
        let entries = self.propfind(path, Depth::Zero).await?;

        entries
            .iter()
            .find(|entry| &entry.path == path)
            .or_else(|| entries.first())
            .map(ResourceInfo::from)
            .ok_or_else(|| TransportError::NotFound(path.clone()))
    }

    async fn download(
        &self,
        remote: &RemotePath,
        local: &Path,
        progress: &ProgressState,
    ) -> Result<(), TransportError> {
        let url = format_url_path(&self.webdav_auth, remote, false)?;

        let res = self.webdav_auth.client.get(url).send().await?;
        let status = res.status();

        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound(remote.clone()));
        }
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), message });
        }

        let total = res.content_length();
        let mut bytes_done: u64 = 0;
        let _ = progress.update(TransferProgress {
            direction: TransferDirection::Download,
            path: remote.clone(),
            bytes_done,
            total,
        });

        let mut file = File::create(local).await?;
        let mut stream = res.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            bytes_done += chunk.len() as u64;

            file.write_all(&chunk).await?;

            let _ = progress.update(TransferProgress {
                direction: TransferDirection::Download,
                path: remote.clone(),
                bytes_done,
                total,
            });
        }

        file.flush().await?;
        debug!("GET {} 完成，{} 字节", remote, bytes_done);

        Ok(())
    }

    async fn upload(
        &self,
        local: &Path,
        remote: &RemotePath,
        progress: &ProgressState,
    ) -> Result<(), TransportError> {
        let url = format_url_path(&self.webdav_auth, remote, false)?;

        let file = File::open(local).await?;
        let total = file.metadata().await?.len();

        let _ = progress.update(TransferProgress {
            direction: TransferDirection::Upload,
            path: remote.clone(),
            bytes_done: 0,
            total: Some(total),
        });

        let state = UploadStream {
            file: Some(file),
            progress: progress.clone(),
            path: remote.clone(),
            bytes_done: 0,
            total,
        };

        let stream = futures_util::stream::unfold(state, |mut state| async move {
            let mut file = state.file.take()?;
            let mut buf = vec![0u8; UPLOAD_CHUNK_SIZE];

            match file.read(&mut buf).await {
                Ok(0) => None,
                Ok(n) => {
                    buf.truncate(n);
                    state.bytes_done += n as u64;
                    let _ = state.progress.update(TransferProgress {
                        direction: TransferDirection::Upload,
                        path: state.path.clone(),
                        bytes_done: state.bytes_done,
                        total: Some(state.total),
                    });
                    state.file = Some(file);
                    Some((Ok::<Bytes, std::io::Error>(Bytes::from(buf)), state))
                }
                Err(e) => Some((Err(e), state)),
            }
        });

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(total));

        let result = send_webdav_request(
            &self.webdav_auth,
            Method::PUT,
            &url,
            headers,
            Some(Body::wrap_stream(stream)),
        )
        .await;

        map_mutation_status(result, remote, remote)
    }

    async fn mkdir(&self, path: &RemotePath) -> Result<(), TransportError> {
        let url = format_url_path(&self.webdav_auth, path, true)?;

        let result = send_webdav_request(
            &self.webdav_auth,
            WebDavMethod::MKCOL.to_head_method()?,
            &url,
            HeaderMap::new(),
            None,
        )
        .await;

        map_mutation_status(result, path, path)
    }

    async fn delete(&self, path: &RemotePath) -> Result<(), TransportError> {
        let url = format_url_path(&self.webdav_auth, path, false)?;

        let result = send_webdav_request(
            &self.webdav_auth,
            Method::DELETE,
            &url,
            HeaderMap::new(),
            None,
        )
        .await;

        map_mutation_status(result, path, path)
    }

    async fn copy(
        &self,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<(), TransportError> {
        self.relocate(WebDavMethod::COPY, from, to).await
    }

    async fn move_to(
        &self,
        from: &RemotePath,
        to: &RemotePath,
    ) -> Result<(), TransportError> {
        self.relocate(WebDavMethod::MOVE, from, to).await
    }
}
