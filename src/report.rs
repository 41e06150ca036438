use crate::error::CheckError;
use crate::models::{Decision, Severity};

/// 输出行开头的检查名
pub const CHECK_NAME: &str = "ORACLE_STATUS";

/// 把结论渲染成一行状态文本
pub fn render(decision: &Decision) -> String {
    let mut line = format!("{} {} - {}", CHECK_NAME, decision.severity, decision.message);
    if let Some(summary) = &decision.summary {
        line.push_str("; ");
        line.push_str(summary);
    }
    line.push_str(" |");
    if !decision.perfdata.is_empty() {
        line.push(' ');
        line.push_str(&decision.perfdata);
    }
    // 必须保持单行
    line.replace(['\n', '\r'], " ")
}

/// 致命错误直接生成结论，不附带汇总
pub fn fatal(error: &CheckError) -> Decision {
    Decision::new(error.severity(), error.to_string())
}

/// 命令行参数错误
pub fn usage_error(message: &str) -> Decision {
    Decision::new(Severity::Unknown, message.trim().to_string())
}
