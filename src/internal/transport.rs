//! 传输层：能力接口、错误类型、进度模型，以及基于 reqwest 的 WebDAV 实现。

pub mod structs;
pub mod traits;
