//! 远程资源领域模块：规范化路径、资源描述与 PROPFIND 整理结果。
//!
//! 对外导出以 [`crate::remote_file`] 为准，此处仅做模块划分。

pub mod structs;
