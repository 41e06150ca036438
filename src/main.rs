use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use sysinfo::System;

mod cli;
mod config;
mod error;
mod metrics;
mod models;
mod report;
mod services;

use cli::CommandArgs;
use config::CheckConfig;
use error::Result;
use models::Decision;
use services::{
    detect_platform, is_listener_running, read_registry, reconcile, source_for, CommandRunner,
    ProcessSource, Snapshot, SystemRunner,
};

fn main() -> ExitCode {
    let args = match CommandArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            if let Err(err) = e.print() {
                log::debug!("Failed to print help: {}", err);
            }
            return ExitCode::SUCCESS;
        }
        Err(e) => return emit(&report::usage_error(&e.to_string())),
    };

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let decision = match CheckConfig::load() {
        Ok(config) => run(&SystemRunner, &config),
        Err(e) => Err(e.into()),
    }
    .unwrap_or_else(|e| {
        log::error!("Check aborted: {}", e);
        report::fatal(&e)
    });

    emit(&decision)
}

/// 平台 -> ps 可用性 -> oratab -> pmon 进程 -> 监听 -> 结论
fn run(runner: &dyn CommandRunner, config: &CheckConfig) -> Result<Decision> {
    let platform = detect_platform(runner)?;
    log::debug!("Platform: {}", platform);

    let source = source_for(platform, runner);
    source.probe()?;

    let instances = read_registry(&config.oratab_for(platform))?;
    let processes = source.oracle_processes()?;
    let listener_running = is_listener_running(source.as_ref(), &config.listener_name)?;

    let hostname = System::host_name().unwrap_or_else(|| "unknown".to_string());
    let snapshot = Snapshot {
        platform: source.kind(),
        hostname,
        instances,
        processes,
        listener_running,
    };
    Ok(reconcile(snapshot, config))
}

fn emit(decision: &Decision) -> ExitCode {
    println!("{}", report::render(decision));
    ExitCode::from(decision.severity.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;
    use crate::models::Severity;
    use crate::services::runner::testing::ScriptedRunner;
    use std::io::Write;

    fn oratab(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn config_for(path: &std::path::Path) -> CheckConfig {
        CheckConfig {
            oratab_path: Some(path.to_path_buf()),
            ..CheckConfig::default()
        }
    }

    fn probe() -> String {
        format!("ps -o pid= -p {}", std::process::id())
    }

    #[test]
    fn test_linux_end_to_end_ok() {
        let file = oratab("DEV01:/u01/app/oracle/19:Y\n");
        let probe = probe();
        let runner = ScriptedRunner::new()
            .ok("uname -s", "Linux\n")
            .ok(&probe, "1\n")
            .ok(
                "ps -eo user,pid,args",
                "USER PID COMMAND\noracle 4188 ora_pmon_DEV01\noracle 4301 tnslsnr LISTENER -inherit\n",
            )
            .ok("ps -o pid=,etimes=,args= -p 4188", "4188 5000 ora_pmon_DEV01\n");

        let decision = run(&runner, &config_for(file.path())).unwrap();
        assert_eq!(decision.severity, Severity::Ok);
        assert!(decision.summary.unwrap().contains("DEV01:running"));
    }

    #[test]
    fn test_solaris_end_to_end_recent_restart() {
        let file = oratab("DEV01:/u01/app/oracle/19:Y\n");
        let probe = probe();
        let runner = ScriptedRunner::new()
            .ok("uname -s", "SunOS\n")
            .ok(&probe, "1\n")
            .ok("ps -eo pid,etime,args", "  PID ELAPSED COMMAND\n 2290 02:00 ora_pmon_DEV01\n")
            .ok("ps -eo args", "COMMAND\nora_pmon_DEV01\n/u01/bin/tnslsnr LISTENER\n");

        let decision = run(&runner, &config_for(file.path())).unwrap();
        assert_eq!(decision.severity, Severity::Warning);
        assert!(decision.message.contains("restarted recently"));
    }

    #[test]
    fn test_unsupported_platform_skips_registry() {
        let runner = ScriptedRunner::new().ok("uname -s", "IRIX64\n");
        let config = config_for(std::path::Path::new("/nonexistent/oratab"));

        let err = run(&runner, &config).unwrap_err();
        assert!(matches!(err, CheckError::UnsupportedPlatform { .. }));
        assert_eq!(err.severity(), Severity::Critical);
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn test_missing_ps_is_critical() {
        let file = oratab("DEV01:/u01:Y\n");
        let runner = ScriptedRunner::new().ok("uname -s", "Linux\n");

        let err = run(&runner, &config_for(file.path())).unwrap_err();
        assert!(matches!(err, CheckError::ProcessQueryFailure { .. }));
        assert_eq!(err.severity(), Severity::Critical);
    }

    #[test]
    fn test_missing_registry_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe();
        let runner = ScriptedRunner::new()
            .ok("uname -s", "Linux\n")
            .ok(&probe, "1\n");

        let err = run(&runner, &config_for(&dir.path().join("oratab"))).unwrap_err();
        assert!(matches!(err, CheckError::RegistryUnreadable { .. }));
        assert_eq!(report::fatal(&err).severity, Severity::Unknown);
    }
}
