use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// WebDAV 同步客户端
#[derive(Debug, Parser)]
#[command(name = "webdav-sync", version, about)]
pub struct Cli {
    /// 配置文件路径，默认为系统配置目录下的 webdav-sync/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 输出 debug 级别日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 生成默认配置文件（已存在时不覆盖）
    InitConfig,

    /// 列出远程目录
    List {
        /// 相对远程根目录的路径
        path: Option<String>,

        /// 递归列出全部子孙
        #[arg(short, long)]
        recursive: bool,
    },

    /// 按名称搜索远程文件
    Search {
        word: String,
        path: Option<String>,
    },

    /// 上传本地文件或目录，已存在时按大小对账
    Upload {
        local: PathBuf,
        /// 远程目标目录，默认为远程根目录
        remote: Option<String>,
    },

    /// 下载远程文件或目录
    Download {
        remote: String,
        /// 本地目标路径，默认为配置中的本地目录
        local: Option<PathBuf>,
    },

    /// 删除远程资源
    Delete { path: String },

    /// 复制远程资源
    Copy { from: String, to: String },

    /// 移动远程资源
    Move { from: String, to: String },

    /// 创建远程目录（含缺失的上级目录）
    Mkdir { path: String },

    /// 查看远程资源信息
    Info { path: String },
}
