use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::transport::structs::transfer_progress::{
    ProgressState, TransferProgress,
};
use crate::internal::transport::traits::Transport;

use super::cancel_flag::CancelFlag;
use super::sync_options::SyncOptions;

/// 同步会话：持有一个传输实现，所有同步操作都挂在它上面
///
/// 操作按顺序逐个 await 传输层调用，同一个会话不应并发使用。
/// 传输进度通过 [`progress`](Self::progress) 暴露，取消通过 [`cancel_flag`](Self::cancel_flag)。
///
/// example:
/// ```ignore
/// use webdav_sync::auth::WebdavAuth;
/// use webdav_sync::sync::WebdavSyncer;
/// use webdav_sync::transport::WebdavTransport;
///
/// let auth = WebdavAuth::new("account", "password", "http://localhost:8080/dav/")?;
/// let syncer = WebdavSyncer::new(WebdavTransport::new(auth));
///
/// let result = syncer.upload(Path::new("./photos"), &RemotePath::root(), false).await;
/// println!("{result}");
/// ```
pub struct WebdavSyncer<T: Transport> {
    pub(crate) transport: T,
    pub(crate) options: SyncOptions,
    pub(crate) cancel: CancelFlag,
    pub(crate) progress: ProgressState,
}

impl<T: Transport> WebdavSyncer<T> {
    pub fn new(transport: T) -> Self {
        Self::with_options(transport, SyncOptions::default())
    }

    pub fn with_options(transport: T, options: SyncOptions) -> Self {
        Self {
            transport,
            options,
            cancel: CancelFlag::new(),
            progress: UnlockReactiveProperty::new(TransferProgress::idle()),
        }
    }

    /// 替换取消标志，便于与外部信号处理共享同一个标志
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// 当前传输进度，可 `watch()` 监听
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }
}
