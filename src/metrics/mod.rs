use crate::services::reconciler::Reconciliation;

/// 单个性能数据项：`label=value;warn;crit;min;max`
struct PerfValue {
    label: &'static str,
    value: usize,
    min: Option<usize>,
    max: Option<usize>,
}

impl PerfValue {
    fn render(&self) -> String {
        let bound = |b: Option<usize>| b.map(|v| v.to_string()).unwrap_or_default();
        let rendered = format!(
            "{}={};;;{};{}",
            self.label,
            self.value,
            bound(self.min),
            bound(self.max)
        );
        rendered.trim_end_matches(';').to_string()
    }
}

/// 生成 Nagios 性能数据
pub fn perfdata(state: &Reconciliation) -> String {
    let expected = state.instances.len();
    let values = [
        PerfValue {
            label: "running",
            value: state.running_count(),
            min: Some(0),
            max: Some(expected),
        },
        PerfValue {
            label: "expected",
            value: expected,
            min: Some(0),
            max: None,
        },
        PerfValue {
            label: "listener",
            value: usize::from(state.listener_running),
            min: Some(0),
            max: Some(1),
        },
    ];

    values
        .iter()
        .map(PerfValue::render)
        .collect::<Vec<_>>()
        .join(" ")
}
