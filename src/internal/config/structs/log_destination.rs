use std::path::PathBuf;

/// 日志输出位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// 标准错误输出
    Console,
    /// 追加写入文件
    File(PathBuf),
}
