use std::fmt;

/// 一条 pmon 进程记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// 进程 ID
    pub pid: u32,
    /// 完整命令行
    pub cmdline: String,
    /// 已运行秒数（无法解析时为 None）
    pub elapsed_secs: Option<u64>,
}

impl ProcessRecord {
    pub fn new(pid: u32, cmdline: impl Into<String>, elapsed_secs: Option<u64>) -> Self {
        Self {
            pid,
            cmdline: cmdline.into(),
            elapsed_secs,
        }
    }

    /// 命令行中 `ora_pmon_` 之后的实例名
    pub fn instance_name(&self) -> Option<&str> {
        pmon_instance(&self.cmdline)
    }
}

/// 每个 Oracle pmon 进程命令行中都带有的前缀
pub const PMON_PREFIX: &str = "ora_pmon_";

/// 取 `ora_pmon_` 之后到下一个空白为止的部分
pub fn pmon_instance(cmdline: &str) -> Option<&str> {
    let start = cmdline.find(PMON_PREFIX)? + PMON_PREFIX.len();
    let name = cmdline[start..].split_whitespace().next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// 运行时间，显示为 `Dd HH:MM:SS` 或 `HH:MM:SS`
pub struct Uptime(pub Option<u64>);

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(secs) = self.0 else {
            return f.write_str("?");
        };
        let days = secs / 86_400;
        let hours = (secs % 86_400) / 3_600;
        let minutes = (secs % 3_600) / 60;
        let seconds = secs % 60;
        if days > 0 {
            write!(f, "{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
        } else {
            write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
        }
    }
}
