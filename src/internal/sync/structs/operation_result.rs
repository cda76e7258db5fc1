use core::fmt;

/// 失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 目标不存在（本地或远程）
    NotFound,
    /// 列出远程目录失败，或递归超出深度上限
    ListError,
    /// 其它远程调用失败
    Transport,
    /// 传输后大小不一致，残留文件已清理
    PartialTransfer,
    /// 父目录缺失且自动创建失败
    ParentMissing,
    /// 本地文件系统操作失败
    LocalIo,
    /// 本地与远程的资源类型不一致（文件对目录）
    Conflict,
    /// 被取消标志中止
    Cancelled,
}

/// 结果码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Fail(FailureKind),
}

/// 每个对外操作的结构化结果
///
/// `reason` 是给人看的描述，用于日志输出，不用于流程控制。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub code: ResultCode,
    pub reason: String,
}

impl OperationResult {
    pub fn ok(reason: impl Into<String>) -> Self {
        Self { code: ResultCode::Ok, reason: reason.into() }
    }

    pub fn fail(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self { code: ResultCode::Fail(kind), reason: reason.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResultCode::Ok
    }

    /// 失败类型；成功时为 `None`
    pub fn failure(&self) -> Option<FailureKind> {
        match self.code {
            ResultCode::Ok => None,
            ResultCode::Fail(kind) => Some(kind),
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            ResultCode::Ok => write!(f, "成功: {}", self.reason),
            ResultCode::Fail(kind) => write!(f, "失败({kind:?}): {}", self.reason),
        }
    }
}
