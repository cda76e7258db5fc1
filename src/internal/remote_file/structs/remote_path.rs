use core::fmt;

/// 远程路径：以 `/` 分隔、以 `/` 开头的规范化字符串
///
/// 构造时即完成规范化：
/// - 合并重复的 `/`，去掉尾部 `/`（根目录除外）
/// - 去掉 `.`，`..` 回退一级（不会越过根目录）
///
/// 因此两个指向同一资源的路径，直接比较即可。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemotePath(String);

impl RemotePath {
    /// 根目录 `/`
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// 从任意字符串创建并规范化
    pub fn new(raw: &str) -> Self {
        let mut segments: Vec<&str> = Vec::new();

        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }

        Self(format!("/{}", segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// 拼接子路径，`child` 可以包含多级（如 `a/b/c.txt`），结果重新规范化
    pub fn join(&self, child: &str) -> Self {
        Self::new(&format!("{}/{}", self.0, child))
    }

    /// 父目录；根目录没有父目录
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }

        match self.0.rfind('/') {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
        }
    }

    /// 最后一级名称；根目录返回空字符串
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// 各级名称（不含根）
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// 目录层级，根目录为 0
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// 是否位于 `ancestor` 之下（含自身）
    pub fn starts_with(&self, ancestor: &RemotePath) -> bool {
        ancestor.is_root()
            || self.0 == ancestor.0
            || self.0.starts_with(&format!("{}/", ancestor.0))
    }
}

impl Default for RemotePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RemotePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RemotePath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

/// 解析列表接口返回的一项：返回（名称，是否目录）
///
/// 列表中的目录以 `/` 结尾；个别服务端会返回多级路径，这里只取最后一级。
pub fn parse_listing_entry(entry: &str) -> (&str, bool) {
    let is_dir = entry.ends_with('/');
    let trimmed = entry.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);

    (name, is_dir)
}

/// 名称能否作为子项拼接：空名、`.`、`..` 都会指向当前目录之外的位置
pub fn is_child_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}
