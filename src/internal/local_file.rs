//! 本地文件系统辅助：元数据、目录创建、残留清理和目录树遍历。

pub mod functions;
pub mod structs;
