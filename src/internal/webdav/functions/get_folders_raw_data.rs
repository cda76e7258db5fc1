use quick_xml::de::from_str;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::transport::structs::TransportError;
use crate::internal::webdav::enums::{Depth, WebDavMethod};
use crate::webdav::structs::MultiStatus;

/// 内部使用的PROPFIND请求体
const _PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:resourcetype/>
    <D:getcontentlength/>
    <D:getlastmodified/>
    <D:getcontenttype/>
    <D:getetag/>
    <D:displayname/>
  </D:prop>
</D:propfind>"#;

/// 获取原始webdav文件夹数据
///
/// 非 2xx / 207 的响应统一返回 [`TransportError::Status`]，由调用方按状态码细分。
pub async fn get_folders_raw_data(
    webdav_auth: &WebdavAuth,
    absolute_url: &Url,
    depth: &Depth,
) -> Result<MultiStatus, TransportError> {
    // 组装请求头
    let mut headers = HeaderMap::new();
    headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
    headers.insert("Depth", HeaderValue::from_static(depth.as_str()));
    headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

    let method = WebDavMethod::PROPFIND.to_head_method()?;

    let res = webdav_auth
        .client
        .request(method, absolute_url.clone())
        .headers(headers)
        .body(_PROPFIND_BODY)
        .send()
        .await?;

    let status = res.status();

    let xml_text = res.text().await?;

    if !status.is_success() && status != StatusCode::MULTI_STATUS {
        return Err(TransportError::Status {
            status: status.as_u16(),
            message: xml_text,
        });
    }

    from_str::<MultiStatus>(&xml_text)
        .map_err(|e| TransportError::Xml(e.to_string()))
}
