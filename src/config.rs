use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::platform::PlatformKind;

/// 指定 JSON 配置文件路径的环境变量
pub const CONFIG_ENV: &str = "CHECK_ORACLE_STATUS_CONFIG";
/// 覆盖 oratab 路径的环境变量
pub const ORATAB_ENV: &str = "ORATAB";

/// 特例：某些实例的重启属于计划内行为，给出专门的处理建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartException {
    /// pmon 命令行中的子串
    pub pattern: String,
    /// 命中时输出的提示
    pub message: String,
}

/// 检查配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// oratab 路径，未设置时按平台取默认值
    pub oratab_path: Option<PathBuf>,
    /// 监听进程名
    pub listener_name: String,
    /// 运行时间低于该秒数视为刚重启
    pub restart_threshold_secs: u64,
    pub restart_exceptions: Vec<RestartException>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            oratab_path: None,
            listener_name: "tnslsnr".to_string(),
            restart_threshold_secs: 900,
            restart_exceptions: vec![RestartException {
                pattern: "ora_pmon_RMANCAT".to_string(),
                message: "recovery catalog restarted; expected after the nightly backup cycle, \
                          otherwise check the RMAN job log and alert log"
                    .to_string(),
            }],
        }
    }
}

impl CheckConfig {
    /// 读取配置：默认值 <- JSON 文件 <- ORATAB 环境变量
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(oratab) = std::env::var_os(ORATAB_ENV) {
            log::debug!("Registry path overridden by ${}: {:?}", ORATAB_ENV, oratab);
            config.oratab_path = Some(PathBuf::from(oratab));
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 实际使用的 oratab 路径
    pub fn oratab_for(&self, platform: PlatformKind) -> PathBuf {
        self.oratab_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(platform.default_oratab()))
    }

    /// 第一个命中的特例提示
    pub fn restart_exception_for(&self, cmdline: &str) -> Option<&RestartException> {
        self.restart_exceptions
            .iter()
            .find(|exception| cmdline.contains(&exception.pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.listener_name, "tnslsnr");
        assert_eq!(config.restart_threshold_secs, 900);
        assert_eq!(config.restart_exceptions.len(), 1);
        assert_eq!(
            config.oratab_for(PlatformKind::Linux),
            PathBuf::from("/etc/oratab")
        );
        assert_eq!(
            config.oratab_for(PlatformKind::SunOs),
            PathBuf::from("/var/opt/oracle/oratab")
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CheckConfig::from_json(r#"{"oratab_path": "/tmp/oratab"}"#).unwrap();
        assert_eq!(config.oratab_for(PlatformKind::Linux), PathBuf::from("/tmp/oratab"));
        assert_eq!(config.listener_name, "tnslsnr");
        assert_eq!(config.restart_threshold_secs, 900);
    }

    #[test]
    fn test_exception_lookup() {
        let config = CheckConfig::from_json(
            r#"{"restart_exceptions": [{"pattern": "ora_pmon_TEST", "message": "bounced by refresh"}]}"#,
        )
        .unwrap();
        let hit = config.restart_exception_for("ora_pmon_TEST").unwrap();
        assert_eq!(hit.message, "bounced by refresh");
        assert!(config.restart_exception_for("ora_pmon_RMANCAT").is_none());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = CheckConfig::from_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = CheckConfig::from_file(Path::new("/nonexistent/check.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
