use tracing::info;

use crate::internal::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::config::structs::AppConfig;
use crate::internal::sync::structs::{CancelFlag, SyncError, WebdavSyncer};
use crate::internal::transport::structs::WebdavTransport;
use crate::internal::transport::traits::Transport;

/// 按配置建立远程会话
///
/// 依次完成：构造认证客户端、探测服务器、确认远程根目录存在。
/// 任一步失败都不会返回会话。
///
/// example:
/// ```ignore
/// use webdav_sync::config::AppConfig;
/// use webdav_sync::open_remote_session;
/// use webdav_sync::sync::CancelFlag;
///
/// let config = AppConfig::load(&AppConfig::default_path()?)?;
/// let syncer = open_remote_session(&config, CancelFlag::new()).await?;
///
/// for path in syncer.list_recursive(&config.share_path()).await? {
///     println!("{path}");
/// }
/// ```
pub async fn open_remote_session(
    config: &AppConfig,
    cancel: CancelFlag,
) -> Result<WebdavSyncer<WebdavTransport>, SyncError> {
    let auth = WebdavAuth::with_timeout(
        &config.webdav.username,
        &config.webdav.password,
        &config.webdav.url,
        config.timeout(),
    )?;
    let transport = WebdavTransport::new(auth);

    transport.connect().await?;
    info!("已连接 {}", config.webdav.url);

    let share = config.share_path();
    if !transport.check(&share).await? {
        return Err(SyncError::NotFound(share));
    }

    Ok(WebdavSyncer::with_options(transport, config.sync_options())
        .with_cancel_flag(cancel))
}
