use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref DAYS_HMS: Regex = Regex::new(r"^(\d+)-(\d+):(\d+):(\d+)$").unwrap();
    static ref HMS: Regex = Regex::new(r"^(\d+):(\d+):(\d+)$").unwrap();
    static ref MS: Regex = Regex::new(r"^(\d+):(\d+)$").unwrap();
}

/// 解析 ps etime 格式：`D-HH:MM:SS`、`HH:MM:SS` 或 `MM:SS`
///
/// 三种格式按字段数互斥，无法识别时返回 None
pub fn parse_compact_duration(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(caps) = DAYS_HMS.captures(raw) {
        return weighted_sum(&caps, &[86_400, 3_600, 60, 1]);
    }
    if let Some(caps) = HMS.captures(raw) {
        return weighted_sum(&caps, &[3_600, 60, 1]);
    }
    if let Some(caps) = MS.captures(raw) {
        return weighted_sum(&caps, &[60, 1]);
    }
    None
}

/// 各字段乘以对应秒数后求和；字段过大或溢出时返回 None
fn weighted_sum(caps: &Captures<'_>, weights: &[u64]) -> Option<u64> {
    weights
        .iter()
        .enumerate()
        .try_fold(0u64, |total, (i, weight)| {
            let value: u64 = caps[i + 1].parse().ok()?;
            total.checked_add(value.checked_mul(*weight)?)
        })
}

/// 解析 `etimes`：直接就是秒数
pub fn parse_seconds(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
