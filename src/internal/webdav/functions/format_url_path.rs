use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::remote_file::structs::RemotePath;
use crate::internal::transport::structs::TransportError;

/// 路径片段中需要转义的字符：除 RFC 3986 unreserved 之外全部转义
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 把远程路径拼到 base_url 之下
///
/// - `is_collection` 为 true 时补上尾部 `/`，MKCOL 与目录 PROPFIND 需要
/// - 拼接结果不允许跳出 base_url（换 host、换 scheme 或回到上级目录）
pub(crate) fn format_url_path(
    webdav_auth: &WebdavAuth,
    path: &RemotePath,
    is_collection: bool,
) -> Result<Url, TransportError> {
    let base_url = webdav_auth.base_url.as_ref();

    let mut relative = path
        .segments()
        .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    if is_collection && !relative.is_empty() {
        relative.push('/');
    }

    let joined_url = base_url
        .join(&relative)
        .map_err(|_| TransportError::InvalidPath(path.to_string()))?;

    if joined_url.scheme() != base_url.scheme()
        || joined_url.host_str() != base_url.host_str()
        || joined_url.port_or_known_default() != base_url.port_or_known_default()
        || !joined_url.path().starts_with(base_url.path())
    {
        return Err(TransportError::InvalidPath(format!(
            "父目录不允许: {path}"
        )));
    }

    Ok(joined_url)
}

/// 把服务端返回的 href 还原为相对 base_url 的远程路径
///
/// href 可能是绝对 URL，也可能是以 `/` 开头的绝对路径，且经过 URL 编码。
pub(crate) fn href_to_remote_path(base_url: &Url, href: &str) -> RemotePath {
    let full_path = base_url
        .join(href)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| href.to_string());

    let base_path = base_url.path().trim_end_matches('/');
    let relative = match full_path.strip_prefix(base_path) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => full_path.as_str(),
    };

    let decoded = percent_encoding::percent_decode_str(relative)
        .decode_utf8_lossy()
        .to_string();

    RemotePath::new(&decoded)
}
