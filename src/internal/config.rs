//! 配置文件：TOML + 环境变量覆盖。
//!
//! 环境变量以 `WEBDAV_SYNC_` 开头，段与键之间用 `__` 分隔，
//! 例如 `WEBDAV_SYNC_WEBDAV__PASSWORD`。

pub mod structs;
