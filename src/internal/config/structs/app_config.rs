use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::internal::remote_file::structs::RemotePath;
use crate::internal::sync::structs::{DEFAULT_MAX_DEPTH, SyncOptions};

use super::config_error::ConfigError;
use super::log_destination::LogDestination;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "WEBDAV_SYNC";

/// 配置目录下的应用子目录名
pub const APP_DIR_NAME: &str = "webdav-sync";

/// `init-config` 写出的默认配置
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"[webdav]
# WebDAV 服务地址，例如 https://dav.example.com/remote.php/webdav/
url = "http://localhost:8080/"
username = "user"
# 留空时可用环境变量 WEBDAV_SYNC_WEBDAV__PASSWORD 提供
password = ""
# 远程根目录，list/upload/copy/move/delete 的相对路径都以它为起点
share = "/"
timeout_secs = 30

[local]
# download 未指定本地路径时的默认目录
# path = "/home/user/webdav-sync"

[sync]
max_depth = 64

[logging]
# trace / debug / info / warn / error
level = "info"
# console 或 file
destination = "console"
# destination = "file" 时必填
# file_path = "/var/log/webdav-sync.log"
"#;

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub webdav: WebdavSection,
    #[serde(default)]
    pub local: LocalSection,
    #[serde(default)]
    pub sync: SyncSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebdavSection {
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_share")]
    pub share: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalSection {
    #[serde(default = "default_local_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncSection {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_destination")]
    pub destination: String,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_share() -> String {
    "/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_local_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_level() -> String {
    "info".to_string()
}

fn default_destination() -> String {
    "console".to_string()
}

impl Default for LocalSection {
    fn default() -> Self {
        Self { path: default_local_path() }
    }
}

impl Default for SyncSection {
    fn default() -> Self {
        Self { max_depth: default_max_depth() }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            destination: default_destination(),
            file_path: None,
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径：`<系统配置目录>/webdav-sync/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_DIR_NAME).join("config.toml"))
    }

    /// 读取配置文件并叠加环境变量，随后校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        if config.webdav.password.is_empty() {
            warn!("配置中的密码为空");
        }

        Ok(config)
    }

    /// 写出默认配置；文件已存在时不覆盖，返回 `false`
    pub fn write_default(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }

        let io_error = |source| ConfigError::Io { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(io_error)?;

        Ok(true)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webdav.url.trim().is_empty() {
            return Err(ConfigError::Invalid("webdav.url 不能为空".into()));
        }
        Url::parse(&self.webdav.url)
            .map_err(|e| ConfigError::Invalid(format!("webdav.url 无效: {e}")))?;

        if self.webdav.username.trim().is_empty() {
            return Err(ConfigError::Invalid("webdav.username 不能为空".into()));
        }
        if self.webdav.timeout_secs == 0 {
            return Err(ConfigError::Invalid("webdav.timeout_secs 必须大于 0".into()));
        }
        if self.sync.max_depth == 0 {
            return Err(ConfigError::Invalid("sync.max_depth 必须大于 0".into()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.webdav.timeout_secs)
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions { max_depth: self.sync.max_depth }
    }

    /// 远程根目录
    pub fn share_path(&self) -> RemotePath {
        RemotePath::new(&self.webdav.share)
    }

    /// 命令行给出的远程路径一律解析到远程根目录之下，`..` 越出根目录时报错
    pub fn resolve_remote(&self, raw: &str) -> Result<RemotePath, ConfigError> {
        let share = self.share_path();
        let path = share.join(raw);

        if !path.starts_with(&share) {
            return Err(ConfigError::Invalid(format!(
                "远程路径 {raw:?} 超出远程根目录 {share}"
            )));
        }
        Ok(path)
    }
}

impl LoggingSection {
    /// 解析日志输出位置；配置不可用时退回控制台，并给出提示
    pub fn resolve_destination(&self) -> (LogDestination, Option<String>) {
        match self.destination.trim().to_ascii_lowercase().as_str() {
            "console" | "" => (LogDestination::Console, None),
            "file" => match &self.file_path {
                Some(path) if !path.as_os_str().is_empty() => {
                    (LogDestination::File(path.clone()), None)
                }
                _ => (
                    LogDestination::Console,
                    Some("logging.destination 为 file 但未设置 file_path，改为输出到控制台".to_string()),
                ),
            },
            other => (
                LogDestination::Console,
                Some(format!("未知的日志输出位置 {other:?}，改为输出到控制台")),
            ),
        }
    }
}
