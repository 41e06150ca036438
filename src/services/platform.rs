use std::fmt;

use crate::error::{CheckError, Result};
use crate::models::ProcessRecord;
use crate::services::process_checker::{SinglePassSource, TwoPassSource};
use crate::services::runner::CommandRunner;

/// 支持的平台
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// Solaris：一次 ps 拿到 etime（`D-HH:MM:SS` 格式）
    SunOs,
    /// Linux：先列出 pmon，再逐个查询 etimes
    Linux,
}

impl PlatformKind {
    /// 按顺序做子串匹配，第一个命中的生效
    const TOKENS: [(&'static str, PlatformKind); 2] =
        [("SunOS", PlatformKind::SunOs), ("Linux", PlatformKind::Linux)];

    pub fn from_identity(identity: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| identity.contains(token))
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            PlatformKind::SunOs => "SunOS",
            PlatformKind::Linux => "Linux",
        }
    }

    pub fn default_oratab(self) -> &'static str {
        match self {
            PlatformKind::SunOs => "/var/opt/oracle/oratab",
            PlatformKind::Linux => "/etc/oratab",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 通过 `uname -s` 判断平台；uname 不可用时按空字符串处理
pub fn detect_platform(runner: &dyn CommandRunner) -> Result<PlatformKind> {
    let identity = match runner.run("uname", &["-s"]) {
        Ok(output) if output.success => output.stdout.trim().to_string(),
        Ok(_) => String::new(),
        Err(e) => {
            log::debug!("uname failed: {}", e);
            String::new()
        }
    };
    log::debug!("OS identity: '{}'", identity);

    PlatformKind::from_identity(&identity)
        .ok_or(CheckError::UnsupportedPlatform { identity })
}

/// 平台相关的进程查询能力
pub trait ProcessSource {
    fn kind(&self) -> PlatformKind;

    /// 确认 ps 可用，在任何枚举之前调用
    fn probe(&self) -> Result<()>;

    /// 所有 pmon 进程
    fn oracle_processes(&self) -> Result<Vec<ProcessRecord>>;

    /// 全部进程的命令行，用于查找监听
    fn all_command_lines(&self) -> Result<Vec<String>>;

    /// 把 ps 输出的运行时间字段转换为秒
    fn parse_elapsed(&self, raw: &str) -> Option<u64>;
}

pub fn source_for<'a>(
    kind: PlatformKind,
    runner: &'a dyn CommandRunner,
) -> Box<dyn ProcessSource + 'a> {
    match kind {
        PlatformKind::SunOs => Box::new(SinglePassSource::new(runner)),
        PlatformKind::Linux => Box::new(TwoPassSource::new(runner)),
    }
}

/// 执行 ps 查询，任何失败都归为 `ProcessQueryFailure`
pub(crate) fn query(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> Result<String> {
    let command = format!("{} {}", program, args.join(" "));
    match runner.run(program, args) {
        Ok(output) if output.success => Ok(output.stdout),
        Ok(_) => Err(CheckError::ProcessQueryFailure {
            command,
            reason: "non-zero exit status".to_string(),
        }),
        Err(e) => Err(CheckError::ProcessQueryFailure {
            command,
            reason: e.to_string(),
        }),
    }
}
