use clap::Parser;

const AFTER_HELP: &str = "\
Exit status: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.

Environment:
  ORATAB                       registry file to read instead of the platform default
  CHECK_ORACLE_STATUS_CONFIG   JSON file with listener name, restart threshold and exceptions";

/// 检查 oratab 中自动启动的 Oracle 实例及监听是否在运行
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, after_help = AFTER_HELP)]
pub struct CommandArgs {
    /// 输出调试信息到 stderr
    #[arg(short, long)]
    pub verbose: bool,
}
