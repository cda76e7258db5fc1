//! 同步核心：递归列表、上传对账、单文件传输、远程资源操作与搜索。
//!
//! 所有操作都定义为 [`WebdavSyncer`](structs::webdav_syncer::WebdavSyncer) 的方法，
//! 按 `functions` 下的文件分组实现。

pub mod functions;
pub mod structs;
