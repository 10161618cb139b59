//! # Summary Statistics Module / 汇总统计模块
//!
//! Derives the presentation values of the session summary: per-status
//! percentages, a human-readable duration with unit promotion, formatted
//! start/stop instants and the pie chart slices.
//!
//! 派生会话摘要的展示值：各状态的百分比、带单位提升的可读持续时间、
//! 格式化的开始/结束时刻以及饼图扇区数据。

use chrono::{Local, TimeZone};

use crate::core::aggregate::SessionStats;
use crate::core::models::{Status, StatusCounts};

/// Sentinel used wherever a value cannot be computed (empty session, missing
/// timestamps).
/// 当值无法计算时（空会话、缺失时间戳）使用的哨兵文本。
pub const NOT_AVAILABLE: &str = "Not available";

/// Session-level derived values, ready to be printed into the document.
/// 会话级派生值，可直接打印到文档中。
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub start_text: String,
    pub stop_text: String,
    pub duration_text: String,
    pub counts: StatusCounts,
    pub total: usize,
}

impl SessionSummary {
    pub fn from_stats(stats: &SessionStats) -> Self {
        let duration_text = stats
            .bounds
            .duration_ms()
            .map(format_duration)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            start_text: format_instant(stats.bounds.start),
            stop_text: format_instant(stats.bounds.stop),
            duration_text,
            counts: stats.counts.clone(),
            total: stats.total,
        }
    }

    /// The share of `status` among all retained results, formatted as
    /// `"{:.2}%"`, or the sentinel when the session is empty.
    pub fn percentage_of(&self, status: Status) -> String {
        percentage(self.counts.get(status), self.total)
    }

    /// `(status, count)` pairs with a non-zero count, in canonical order.
    /// Empty statuses never get a pie slice.
    pub fn chart_slices(&self) -> Vec<(Status, usize)> {
        self.counts.iter().filter(|(_, count)| *count > 0).collect()
    }
}

/// `100 * count / total` formatted to two decimal places, or the sentinel
/// when `total` is zero.
pub fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        NOT_AVAILABLE.to_string()
    } else {
        format!("{:.2}%", 100.0 * count as f64 / total as f64)
    }
}

/// Renders a millisecond duration with unit promotion. Each higher unit is
/// computed by integer division and the remainder carried down, never
/// re-derived from the raw value.
///
/// 以单位提升方式渲染毫秒级持续时间。每个更高的单位通过整数除法计算，
/// 余数向下传递，绝不从原始值重新推导。
pub fn format_duration(ms: i64) -> String {
    if ms < 1000 {
        return format!("{ms}ms");
    }
    let seconds = ms / 1000;
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m {}s", minutes, seconds % 60);
    }
    let hours = minutes / 60;
    format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
}

/// ctime-like rendering of an epoch-millisecond instant in local time.
/// ctime 风格的本地时间渲染（输入为毫秒级时间戳）。
fn format_instant(ms: Option<i64>) -> String {
    ms.and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|instant| instant.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
