use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置文件 {} 不存在，可先执行 init-config 生成", .0.display())]
    MissingFile(PathBuf),

    #[error("无法确定系统配置目录")]
    NoConfigDir,

    #[error("配置读取失败: {0}")]
    Load(#[from] config::ConfigError),

    #[error("配置项无效: {0}")]
    Invalid(String),

    #[error("写入配置文件 {} 失败: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
