use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use problem_browser::app::{App, Command};
use problem_browser::config::Config;
use problem_browser::logger;

/// 竞赛题目浏览与提交客户端
#[derive(Debug, Parser)]
#[command(name = "problem_browser", version, about)]
struct Cli {
    /// TOML 配置文件
    #[arg(long, short, global = true, env = "PROBLEM_BROWSER_CONFIG")]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())
        .await
        .context("加载配置失败")?;

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).await?;
    let output = app.run(cli.command).await?;
    print!("{}", output);

    Ok(())
}
