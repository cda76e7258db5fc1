use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use sha2::{Digest, Sha256};
use url::Url;

use crate::internal::transport::structs::TransportError;

/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 认证结构体
///
/// 该结构体定位
/// - 用于存储基础WebDav认证信息
/// - 为 [`WebdavTransport`](crate::transport::WebdavTransport) 提供预置了认证头的 http 客户端
///
/// 默认Eq时会匹配base_url和token，如果需要单独比较token，需使用eq_only_token方法
#[derive(Clone)]
pub struct WebdavAuth {
    pub client: Client,     // 内部是Arc，不需要特殊处理
    pub base_url: Arc<Url>, // 传输层会被多个任务共享，这里用Arc
    pub(crate) username: Arc<String>,
    pub(crate) encrypted_token: Arc<String>, // 对外导出时，不允许直接访问，哪怕它是被加密的
}

impl WebdavAuth {
    /// 创建新的认证结构体，使用默认超时
    pub fn new(
        username: &str,
        password: &str,
        base_url: &str,
    ) -> Result<Self, TransportError> {
        Self::with_timeout(username, password, base_url, DEFAULT_TIMEOUT)
    }

    /// 创建新的认证结构体，并指定单次请求超时
    pub fn with_timeout(
        username: &str,
        password: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http_client =
            _InternalHttpClient::_create(username, password, timeout)?;

        let base_url = _format_base_url(base_url)?;

        Ok(Self {
            client: http_client.client,
            base_url: Arc::new(base_url),
            username: Arc::new(username.to_string()),
            encrypted_token: Arc::new(http_client.encrypted_token),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// 仅比较token是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }
}

/// 用于比较认证结构体是否相等
impl PartialEq for WebdavAuth {
    fn eq(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
            && self.base_url == other.base_url
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for WebdavAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebdavAuth")
            .field("base_url", &self.base_url.as_str())
            .field("client", &"<Client with hidden authorization>")
            .finish()
    }
}

fn _format_base_url(url: &str) -> Result<Url, TransportError> {
    if url.is_empty() {
        return Err(TransportError::InvalidPath("路径为空".to_string()));
    }

    let mut base_url = Url::parse(url)
        .map_err(|e| TransportError::InvalidPath(e.to_string()))?;

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}

/// 内部临时使用的http客户端结构体，在初始化WebdavAuth时使用
struct _InternalHttpClient {
    client: Client,
    encrypted_token: String,
}

impl _InternalHttpClient {
    fn _encrypt_str(data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 创建http客户端，内部使用
    fn _create(
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();

        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));

        let mut auth_value = HeaderValue::from_str(&format!("Basic {}", token))
            .map_err(|e| TransportError::Auth(e.to_string()))?;
        auth_value.set_sensitive(true);

        headers.insert(AUTHORIZATION, auth_value);

        let http_client = Client::builder()
            .http1_only()
            // 重定向由调用方处理，避免 PROPFIND 被改写成 GET
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let encrypted_token = Self::_encrypt_str(&token);

        Ok(Self { client: http_client, encrypted_token })
    }
}
