use crate::internal::remote_file::structs::RemotePath;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

/// 传输方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Upload,
    Download,
}

/// 传输进度：当前正在传输的单个文件的累计字节数
///
/// 调用方通过 [`WebdavSyncer::progress`](crate::sync::WebdavSyncer::progress) 读取或监听；
/// 进度比例可用 [`TransferProgress::pct`] 获取。
#[derive(Debug, Clone)]
pub struct TransferProgress {
    pub direction: TransferDirection,
    /// 正在传输的远程路径
    pub path: RemotePath,
    /// 已传输的字节数
    pub bytes_done: u64,
    /// 文件总大小（字节），未知时为 `None`
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn idle() -> Self {
        Self {
            direction: TransferDirection::Download,
            path: RemotePath::root(),
            bytes_done: 0,
            total: None,
        }
    }

    /// 进度百分比（0～100）；总大小为 0 或未知时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        self.total
            .filter(|&t| t > 0)
            .map(|t| (self.bytes_done as f64 / t as f64) * 100.0)
            .unwrap_or(f64::NAN)
    }
}

/// 传输层写入进度所用的共享句柄
pub type ProgressState = UnlockReactiveProperty<TransferProgress>;
