use thiserror::Error;

use crate::models::Severity;

/// 致命错误：任何一个出现都会中止检查，不再生成汇总信息
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("unsupported platform '{identity}'{}", known_hint(.identity))]
    UnsupportedPlatform { identity: String },

    #[error("cannot read registry {path}: {source}")]
    RegistryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process listing unavailable ({command}): {reason}")]
    ProcessQueryFailure { command: String, reason: String },

    #[error("invalid configuration: {0:#}")]
    Config(#[from] anyhow::Error),
}

impl CheckError {
    /// 错误对应的告警级别
    pub fn severity(&self) -> Severity {
        match self {
            CheckError::UnsupportedPlatform { .. } => Severity::Critical,
            CheckError::RegistryUnreadable { .. } => Severity::Unknown,
            CheckError::ProcessQueryFailure { .. } => Severity::Critical,
            CheckError::Config(_) => Severity::Unknown,
        }
    }
}

/// 能识别但尚未实现进程查询的平台
const KNOWN_UNSUPPORTED: [&str; 5] = ["AIX", "HP-UX", "Darwin", "FreeBSD", "OSF1"];

fn known_hint(identity: &str) -> &'static str {
    if KNOWN_UNSUPPORTED.iter().any(|name| identity.contains(name)) {
        " (not supported yet)"
    } else {
        ""
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let unsupported = CheckError::UnsupportedPlatform { identity: "IRIX".into() };
        assert_eq!(unsupported.severity(), Severity::Critical);

        let registry = CheckError::RegistryUnreadable {
            path: "/etc/oratab".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(registry.severity(), Severity::Unknown);

        let query = CheckError::ProcessQueryFailure {
            command: "ps".into(),
            reason: "not found".into(),
        };
        assert_eq!(query.severity(), Severity::Critical);
    }

    #[test]
    fn test_unsupported_message_names_known_platforms() {
        let aix = CheckError::UnsupportedPlatform { identity: "AIX".into() };
        assert_eq!(aix.to_string(), "unsupported platform 'AIX' (not supported yet)");

        let other = CheckError::UnsupportedPlatform { identity: "Plan9".into() };
        assert_eq!(other.to_string(), "unsupported platform 'Plan9'");
    }
}
