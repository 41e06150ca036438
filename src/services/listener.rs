use crate::error::Result;
use crate::services::platform::ProcessSource;

/// 在全部进程中查找监听进程
pub fn is_listener_running(source: &dyn ProcessSource, listener_name: &str) -> Result<bool> {
    let running = listener_in(&source.all_command_lines()?, listener_name);
    log::debug!("Listener '{}' running: {}", listener_name, running);
    Ok(running)
}

pub fn listener_in(command_lines: &[String], listener_name: &str) -> bool {
    command_lines.iter().any(|cmd| cmd.contains(listener_name))
}
