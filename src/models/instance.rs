use std::fmt;

/// 实例运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    Unknown,
    Running,
    NotRunning,
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstanceStatus::Unknown => "unknown",
            InstanceStatus::Running => "running",
            InstanceStatus::NotRunning => "not_running",
        };
        f.write_str(label)
    }
}

/// oratab 中标记为自动启动的实例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredInstance {
    /// 实例名（唯一标识符）
    pub name: String,
    /// ORACLE_HOME
    pub home: String,
    pub auto_start: bool,
    pub status: InstanceStatus,
}

impl RegisteredInstance {
    pub fn auto_start(name: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
            auto_start: true,
            status: InstanceStatus::Unknown,
        }
    }
}
