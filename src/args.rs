use clap::{Parser, Subcommand};
use prscan::logging::LogFormat;
use std::path::PathBuf;

/// prscan - 幂等的 PR 问题报告引擎
#[derive(Parser, Debug)]
#[command(name = "prscan", version)]
#[command(about = "Plan pull request review comments without re-reporting earlier findings")]
pub struct Args {
    /// 子命令
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径（默认 ~/.config/prscan/config.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 日志格式
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 根据扫描结果和已有评论生成发布计划
    Plan {
        /// JSON 格式的运行描述
        #[arg(short, long)]
        input: PathBuf,
    },
    /// 跳过文件评论相关操作
    Skipped {
        #[command(subcommand)]
        action: SkippedAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SkippedAction {
    /// 从评论正文中恢复被跳过的文件列表
    Parse {
        /// 包含评论正文的文件
        #[arg(short, long)]
        input: PathBuf,
    },
}
