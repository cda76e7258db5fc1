use reqwest::Method;

use crate::internal::transport::structs::TransportError;

/// 标准 HTTP 之外的 WebDAV 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebDavMethod {
    PROPFIND,
    MKCOL,
    COPY,
    MOVE,
}

impl WebDavMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebDavMethod::PROPFIND => "PROPFIND",
            WebDavMethod::MKCOL => "MKCOL",
            WebDavMethod::COPY => "COPY",
            WebDavMethod::MOVE => "MOVE",
        }
    }

    pub fn to_head_method(&self) -> Result<Method, TransportError> {
        Method::from_bytes(self.as_str().as_bytes())
            .map_err(|e| TransportError::InvalidPath(e.to_string()))
    }
}

pub enum Depth {
    /// 仅返回当前资源
    Zero,
    /// 返回当前资源及直接子资源
    One,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
        }
    }
}
