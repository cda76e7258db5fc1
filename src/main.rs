//! webdav-sync：WebDAV 同步命令行。

mod cli;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 允许用 .env 提供 WEBDAV_SYNC_* 环境变量
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::commands::run(cli).await
}
