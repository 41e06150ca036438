use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;
use crate::models::{ProcessRecord, PMON_PREFIX};
use crate::services::elapsed::{parse_compact_duration, parse_seconds};
use crate::services::platform::{query, PlatformKind, ProcessSource};
use crate::services::runner::CommandRunner;

lazy_static! {
    /// `ps -eo pid,etime,args`
    static ref PID_ETIME_ARGS: Regex =
        Regex::new(r"^\s*(\d+)\s+(\S+)\s+(.*ora_pmon_\S+.*)$").unwrap();
    /// `ps -eo user,pid,args`
    static ref USER_PID_ARGS: Regex = Regex::new(r"^\s*\S+\s+(\d+)\s+(.*)$").unwrap();
    /// `ps -o pid=,etimes=,args= -p <pid>`
    static ref PID_SECS_ARGS: Regex = Regex::new(r"^\s*(\d+)\s+(\d+)\s+(.*)$").unwrap();
}

/// 确认 ps 能查询到当前进程
fn probe_ps(runner: &dyn CommandRunner) -> Result<()> {
    let pid = std::process::id().to_string();
    query(runner, "ps", &["-o", "pid=", "-p", &pid]).map(|_| ())
}

/// 单次查询：`ps -eo pid,etime,args`，etime 为紧凑格式
pub struct SinglePassSource<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> SinglePassSource<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}

impl ProcessSource for SinglePassSource<'_> {
    fn kind(&self) -> PlatformKind {
        PlatformKind::SunOs
    }

    fn probe(&self) -> Result<()> {
        probe_ps(self.runner)
    }

    fn oracle_processes(&self) -> Result<Vec<ProcessRecord>> {
        let output = query(self.runner, "ps", &["-eo", "pid,etime,args"])?;

        let mut records = Vec::new();
        for line in output.lines() {
            let Some(caps) = PID_ETIME_ARGS.captures(line) else {
                continue;
            };
            let Ok(pid) = caps[1].parse::<u32>() else {
                continue;
            };
            let elapsed = self.parse_elapsed(&caps[2]);
            if elapsed.is_none() {
                log::debug!("Unparseable etime '{}' for PID {}", &caps[2], pid);
            }
            let record = ProcessRecord::new(pid, caps[3].trim_end(), elapsed);
            log::debug!("Found pmon: {:?}", record);
            records.push(record);
        }
        Ok(records)
    }

    fn all_command_lines(&self) -> Result<Vec<String>> {
        let output = query(self.runner, "ps", &["-eo", "args"])?;
        // 第一行是表头
        Ok(output.lines().skip(1).map(|l| l.trim().to_string()).collect())
    }

    fn parse_elapsed(&self, raw: &str) -> Option<u64> {
        parse_compact_duration(raw)
    }
}

/// 两次查询：先列出 pmon 的 PID，再逐个用 etimes 取运行秒数
///
/// 每个 PID 一次 ps 调用，实例多时开销线性增长
pub struct TwoPassSource<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> TwoPassSource<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn list_all(&self) -> Result<Vec<(u32, String)>> {
        let output = query(self.runner, "ps", &["-eo", "user,pid,args"])?;
        Ok(output
            .lines()
            .filter_map(|line| {
                let caps = USER_PID_ARGS.captures(line)?;
                let pid = caps[1].parse::<u32>().ok()?;
                Some((pid, caps[2].trim_end().to_string()))
            })
            .collect())
    }

    /// 第二次查询；进程已退出或输出异常时返回 None
    fn elapsed_for(&self, pid: u32) -> Option<ProcessRecord> {
        let pid_arg = pid.to_string();
        let output = match self
            .runner
            .run("ps", &["-o", "pid=,etimes=,args=", "-p", &pid_arg])
        {
            Ok(output) if output.success => output.stdout,
            Ok(_) => {
                log::debug!("PID {} vanished before elapsed query", pid);
                return None;
            }
            Err(e) => {
                log::debug!("Elapsed query for PID {} failed: {}", pid, e);
                return None;
            }
        };

        let caps = output.lines().find_map(|line| PID_SECS_ARGS.captures(line))?;
        if caps[1].parse::<u32>().ok()? != pid || !caps[3].contains(PMON_PREFIX) {
            return None;
        }
        Some(ProcessRecord::new(
            pid,
            caps[3].trim_end(),
            self.parse_elapsed(&caps[2]),
        ))
    }
}

impl ProcessSource for TwoPassSource<'_> {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Linux
    }

    fn probe(&self) -> Result<()> {
        probe_ps(self.runner)
    }

    fn oracle_processes(&self) -> Result<Vec<ProcessRecord>> {
        let pids: Vec<u32> = self
            .list_all()?
            .into_iter()
            .filter(|(_, cmd)| cmd.contains(PMON_PREFIX))
            .map(|(pid, _)| pid)
            .collect();
        log::debug!("pmon PIDs: {:?}", pids);

        let records: Vec<ProcessRecord> =
            pids.into_iter().filter_map(|pid| self.elapsed_for(pid)).collect();
        for record in &records {
            log::debug!("Found pmon: {:?}", record);
        }
        Ok(records)
    }

    fn all_command_lines(&self) -> Result<Vec<String>> {
        Ok(self.list_all()?.into_iter().map(|(_, cmd)| cmd).collect())
    }

    fn parse_elapsed(&self, raw: &str) -> Option<u64> {
        parse_seconds(raw)
    }
}
