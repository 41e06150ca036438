use crate::config::CheckConfig;
use crate::metrics;
use crate::models::{Decision, InstanceStatus, ProcessRecord, RegisteredInstance, Severity, Uptime};
use crate::services::platform::PlatformKind;

/// 一次检查收集到的全部数据
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub platform: PlatformKind,
    pub hostname: String,
    pub instances: Vec<RegisteredInstance>,
    pub processes: Vec<ProcessRecord>,
    pub listener_running: bool,
}

/// 对比 oratab 与实际进程之后的状态
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub platform: PlatformKind,
    pub hostname: String,
    /// 按实例名排序
    pub instances: Vec<RegisteredInstance>,
    /// 按实例名、PID 排序
    pub processes: Vec<ProcessRecord>,
    pub listener_running: bool,
}

impl Reconciliation {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let Snapshot {
            platform,
            hostname,
            mut instances,
            mut processes,
            listener_running,
        } = snapshot;

        instances.retain(|i| i.auto_start);
        for instance in instances.iter_mut() {
            let running = processes
                .iter()
                .any(|p| p.instance_name() == Some(instance.name.as_str()));
            instance.status = if running {
                InstanceStatus::Running
            } else {
                InstanceStatus::NotRunning
            };
        }
        instances.sort_by(|a, b| a.name.cmp(&b.name));
        processes.sort_by(|a, b| {
            a.instance_name()
                .cmp(&b.instance_name())
                .then(a.pid.cmp(&b.pid))
        });

        Self {
            platform,
            hostname,
            instances,
            processes,
            listener_running,
        }
    }

    pub fn running_count(&self) -> usize {
        self.instances
            .iter()
            .filter(|i| i.status == InstanceStatus::Running)
            .count()
    }

    /// 附加在每条非致命结果后面的汇总
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("OS={}", self.platform),
            format!("host={}", self.hostname),
            format!("listener={}", if self.listener_running { "up" } else { "down" }),
            format!("running={}/{}", self.running_count(), self.instances.len()),
        ];
        parts.extend(
            self.instances
                .iter()
                .map(|i| format!("{}:{}", i.name, i.status)),
        );
        parts.extend(self.processes.iter().map(|p| {
            format!(
                "{} up {}",
                p.instance_name().unwrap_or(&p.cmdline),
                Uptime(p.elapsed_secs)
            )
        }));
        parts.join(" ")
    }
}

type Rule = fn(&Reconciliation, &CheckConfig) -> Option<(Severity, String)>;

/// 按优先级排列，第一个命中的规则决定结果
const RULES: [Rule; 4] = [listener_down, instance_not_started, recent_restart, all_running];

fn listener_down(state: &Reconciliation, config: &CheckConfig) -> Option<(Severity, String)> {
    let running = state.running_count();
    if running > 0 && !state.listener_running {
        return Some((
            Severity::Critical,
            format!(
                "listener ({}) is not running while {} instance(s) are up",
                config.listener_name, running
            ),
        ));
    }
    None
}

fn instance_not_started(state: &Reconciliation, _: &CheckConfig) -> Option<(Severity, String)> {
    let missing = state
        .instances
        .iter()
        .find(|i| i.status == InstanceStatus::NotRunning)?;
    Some((
        Severity::Warning,
        format!(
            "instance {} is not running but is flagged for auto-start",
            missing.name
        ),
    ))
}

fn recent_restart(state: &Reconciliation, config: &CheckConfig) -> Option<(Severity, String)> {
    let process = state.processes.iter().find(|p| {
        p.elapsed_secs
            .is_some_and(|secs| secs < config.restart_threshold_secs)
    })?;
    let name = process.instance_name().unwrap_or(&process.cmdline);
    let uptime = Uptime(process.elapsed_secs);

    let message = match config.restart_exception_for(&process.cmdline) {
        Some(exception) => format!("instance {} up only {}: {}", name, uptime, exception.message),
        None => format!("instance {} restarted recently (up {})", name, uptime),
    };
    Some((Severity::Warning, message))
}

fn all_running(state: &Reconciliation, _: &CheckConfig) -> Option<(Severity, String)> {
    Some((
        Severity::Ok,
        format!(
            "{} of {} auto-start instance(s) running",
            state.running_count(),
            state.instances.len()
        ),
    ))
}

/// 计算最终结论
pub fn reconcile(snapshot: Snapshot, config: &CheckConfig) -> Decision {
    let state = Reconciliation::from_snapshot(snapshot);

    let (severity, message) = RULES
        .iter()
        .find_map(|rule| rule(&state, config))
        .unwrap_or((Severity::Unknown, "no rule matched".to_string()));
    log::debug!("Decision: {} - {}", severity, message);

    Decision::new(severity, message)
        .with_summary(state.summary())
        .with_perfdata(metrics::perfdata(&state))
}
