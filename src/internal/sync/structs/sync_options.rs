/// 默认最大递归深度
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// 同步行为配置
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// 目录递归的最大层数（相对操作起点）；超过即以 ListError 失败
    pub max_depth: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}
