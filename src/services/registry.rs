use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CheckError, Result};
use crate::models::RegisteredInstance;

lazy_static! {
    static ref AUTOSTART_ENTRY: Regex =
        Regex::new(r"^([A-Za-z0-9]+):([A-Za-z0-9_.\-/]+):Y").unwrap();
}

/// 读取 oratab，返回需要自动启动的实例（按名称排序）
pub fn read_registry(path: &Path) -> Result<Vec<RegisteredInstance>> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::RegistryUnreadable {
        path: path.display().to_string(),
        source,
    })?;
    let instances = parse_registry(&content);
    log::debug!(
        "Registry {}: {} auto-start instance(s)",
        path.display(),
        instances.len()
    );
    Ok(instances)
}

/// 解析 `name:home:flag` 行
///
/// 注释行、以 `:N` 结尾的行以及格式不符的行都直接跳过；
/// 同名条目后出现的覆盖先出现的
pub fn parse_registry(content: &str) -> Vec<RegisteredInstance> {
    let mut instances = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim_end();
        if line.starts_with('#') || line.ends_with(":N") {
            continue;
        }
        let Some(caps) = AUTOSTART_ENTRY.captures(line) else {
            if !line.is_empty() {
                log::debug!("Ignoring registry line: '{}'", line);
            }
            continue;
        };
        let instance = RegisteredInstance::auto_start(&caps[1], &caps[2]);
        log::debug!("  {} ({})", instance.name, instance.home);
        instances.insert(instance.name.clone(), instance);
    }

    instances.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ORATAB: &str = "\
# This file is used by ORACLE utilities.
#DISABLED:/u01/app/oracle/product/19.0.0/dbhome_1:Y
+ASM:/u01/app/grid:N
PROD:/u01/app/oracle/product/19.0.0/dbhome_1:Y
DEV01:/u01/app/oracle/product/19.0.0/dbhome_1:Y:extra:fields
TEST:/u01/app/oracle/product/19.0.0/dbhome_1:N
bad line without colons
weird name!:/u01:Y
";

    fn names(instances: &[RegisteredInstance]) -> Vec<&str> {
        instances.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_only_autostart_entries_are_registered() {
        let instances = parse_registry(ORATAB);
        assert_eq!(names(&instances), vec!["DEV01", "PROD"]);
        assert!(instances.iter().all(|i| i.auto_start));
        assert_eq!(instances[1].home, "/u01/app/oracle/product/19.0.0/dbhome_1");
    }

    #[test]
    fn test_no_autostart_check_runs_before_pattern() {
        // 格式错误但以 :N 结尾，也只是被跳过
        let instances = parse_registry("!!!:N\nA1:/u01:N\n");
        assert!(instances.is_empty());
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let instances = parse_registry("PROD:/u01/db:Y\r\nDEV:/u01/db:N  \r\n");
        assert_eq!(names(&instances), vec!["PROD"]);
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let instances = parse_registry("PROD:/u01/old:Y\nPROD:/u02/new:Y\n");
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].home, "/u02/new");
    }

    #[test]
    fn test_read_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", ORATAB).unwrap();
        let instances = read_registry(file.path()).unwrap();
        assert_eq!(names(&instances), vec!["DEV01", "PROD"]);
    }

    #[test]
    fn test_missing_registry_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_registry(&dir.path().join("oratab")).unwrap_err();
        assert!(matches!(err, CheckError::RegistryUnreadable { .. }));
    }
}
