//! WebDAV 协议层：请求方法、PROPFIND 原始 XML 模型与底层请求函数。

pub mod enums;
pub mod functions;
pub mod raw_xml;
