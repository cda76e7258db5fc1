use std::path::PathBuf;

/// 本地目录树中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub path: PathBuf,    // 完整路径
    pub relative: String, // 相对遍历起点，以 `/` 分隔
    pub name: String,
    pub is_dir: bool,
    pub size: u64, // 目录为 0
}

impl LocalEntry {
    /// 相对起点的层级，直接子项为 1
    pub fn depth(&self) -> usize {
        self.relative.split('/').filter(|s| !s.is_empty()).count()
    }
}
