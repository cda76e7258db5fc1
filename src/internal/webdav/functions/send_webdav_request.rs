use reqwest::header::HeaderMap;
use reqwest::{Body, Method, StatusCode};
use url::Url;

use crate::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::transport::structs::TransportError;

/// 发送一次不关心响应体的请求（PUT / MKCOL / DELETE / COPY / MOVE）
///
/// 成功时返回状态码；失败时把响应体带进 [`TransportError::Status`]，
/// 由调用方决定 404 / 409 等状态的具体含义。
pub(crate) async fn send_webdav_request(
    webdav_auth: &WebdavAuth,
    method: Method,
    absolute_url: &Url,
    headers: HeaderMap,
    body: Option<Body>,
) -> Result<StatusCode, TransportError> {
    let mut request = webdav_auth
        .client
        .request(method, absolute_url.clone())
        .headers(headers);

    if let Some(body) = body {
        request = request.body(body);
    }

    let res = request.send().await?;
    let status = res.status();

    if status.is_success() {
        return Ok(status);
    }

    let message = res.text().await.unwrap_or_default();

    Err(TransportError::Status { status: status.as_u16(), message })
}
