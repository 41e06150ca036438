use std::fmt;

/// Nagios 插件的四种结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// 进程退出码
    pub fn exit_code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 最终检查结论，构造后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub severity: Severity,
    pub message: String,
    /// 汇总信息；致命错误时为 None
    pub summary: Option<String>,
    /// 性能数据（可能为空）
    pub perfdata: String,
}

impl Decision {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            summary: None,
            perfdata: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_perfdata(mut self, perfdata: impl Into<String>) -> Self {
        self.perfdata = perfdata.into();
        self
    }
}
