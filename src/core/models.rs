//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout allure-docx.
//! It mirrors the Allure result-file schema (result records, container records
//! and nested step trees) and adds the derived types produced by aggregation.
//!
//! 此模块定义了整个 allure-docx 中使用的核心数据结构。
//! 它对应 Allure 结果文件的模式（结果记录、容器记录和嵌套步骤树），
//! 并添加了聚合阶段产生的派生类型。

use serde::{Deserialize, Serialize};

/// The outcome of one test execution or step, as recorded by Allure.
/// Unrecognized status strings fall back to `Unknown` instead of failing
/// the whole parse.
///
/// Allure 记录的单次测试执行或步骤的结果状态。
/// 无法识别的状态字符串会回退为 `Unknown`，而不是使整个解析失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Broken,
    Skipped,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Status {
    /// All statuses in the canonical tally order used for summaries and charts.
    /// 汇总和图表使用的规范统计顺序中的所有状态。
    pub const ALL: [Status; 5] = [
        Status::Passed,
        Status::Skipped,
        Status::Broken,
        Status::Failed,
        Status::Unknown,
    ];

    /// Presentation rank: the most actionable outcomes sort first.
    /// 展示排序等级：最需要关注的结果排在最前。
    pub fn rank(&self) -> u8 {
        match self {
            Status::Broken => 0,
            Status::Failed => 1,
            Status::Skipped => 2,
            Status::Passed => 3,
            Status::Unknown => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Broken => "broken",
            Status::Skipped => "skipped",
            Status::Unknown => "unknown",
        }
    }

    /// `true` for outcomes rendered with failure styling.
    pub fn is_bad(&self) -> bool {
        matches!(self, Status::Failed | Status::Broken)
    }

    /// The Allure status palette as an RRGGBB hex string, used for run colors
    /// in the document.
    /// Allure 状态调色板的 RRGGBB 十六进制表示，用于文档中的文本颜色。
    pub fn color_hex(&self) -> &'static str {
        match self {
            Status::Passed => "97CC64",
            Status::Broken => "FFD050",
            Status::Failed => "FD5A3E",
            Status::Skipped => "AAAAAA",
            Status::Unknown => "D35EBE",
        }
    }

    /// The same palette as RGB components, used by the pie chart.
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        match self {
            Status::Passed => (0x97, 0xCC, 0x64),
            Status::Broken => (0xFF, 0xD0, 0x50),
            Status::Failed => (0xFD, 0x5A, 0x3E),
            Status::Skipped => (0xAA, 0xAA, 0xAA),
            Status::Unknown => (0xD3, 0x5E, 0xBE),
        }
    }
}

/// A name/value test or step parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// A name/value label attached to a test (owner, severity, feature, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// A link attached to a test. Links missing either part are skipped when
/// rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// A file attached to a test or step. `source` is a file name relative to the
/// results directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub source: String,
}

/// Failure message and stack trace of a test or step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl StatusDetails {
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    pub fn trace_text(&self) -> Option<&str> {
        self.trace.as_deref().filter(|t| !t.is_empty())
    }
}

/// One node of a step tree. Steps nest to unbounded depth; the tree is finite
/// because it comes from finite JSON. Fixture entries in a container's
/// `befores`/`afters` lists share this shape.
///
/// 步骤树中的一个节点。步骤可以无限深度嵌套，但由于来自有限的 JSON，
/// 树总是有限的。容器 `befores`/`afters` 列表中的 fixture 条目也是这种结构。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepNode>,
}

/// One recorded test execution, parsed from a `*-result.json` file.
/// Field names are kept bit-exact with the Allure schema via serde renames.
///
/// 一次记录的测试执行，从 `*-result.json` 文件解析。
/// 字段名通过 serde 重命名与 Allure 模式保持完全一致。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default)]
    pub uuid: String,
    /// Logical identity of the test across reruns.
    /// 测试在多次重跑之间的逻辑标识。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepNode>,
}

impl ResultRecord {
    /// The key used to group reruns of the same logical test. Records written
    /// without a `historyId` fall back to their own uuid, so they never merge
    /// with anything else.
    pub fn dedup_key(&self) -> &str {
        self.history_id.as_deref().unwrap_or(&self.uuid)
    }

    /// The fully qualified name, falling back to the display name when the
    /// producer omitted `fullName`.
    pub fn qualified_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    pub fn duration_ms(&self) -> Option<i64> {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => Some(stop - start),
            _ => None,
        }
    }
}

/// A setup/teardown grouping parsed from a `*-container.json` file. Related
/// many-to-many to results via `children` uuid membership.
///
/// 从 `*-container.json` 文件解析的前置/清理分组。
/// 通过 `children` 中的 uuid 与结果记录构成多对多关系。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerRecord {
    #[serde(default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Uuids of the result records this container owns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Setup fixtures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub befores: Vec<StepNode>,
    /// Teardown fixtures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub afters: Vec<StepNode>,
}

/// The earliest-start / latest-stop window observed over a set of timed nodes.
/// Both bounds are unset until the first observation; merging is a pure fold,
/// so step trees can be reduced bottom-up without shared mutable state.
///
/// 在一组带时间戳的节点上观察到的最早开始/最晚结束窗口。
/// 在第一次观察之前两个边界均未设置；合并是纯折叠操作，
/// 因此步骤树可以自底向上归约，无需共享可变状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBounds {
    pub start: Option<i64>,
    pub stop: Option<i64>,
}

impl TimeBounds {
    /// Widens the window with one node's own timestamps.
    pub fn observe(&mut self, start: Option<i64>, stop: Option<i64>) {
        if let Some(start) = start {
            if self.start.is_none_or(|current| start < current) {
                self.start = Some(start);
            }
        }
        if let Some(stop) = stop {
            if self.stop.is_none_or(|current| stop > current) {
                self.stop = Some(stop);
            }
        }
    }

    /// Widens the window with another already-computed window.
    pub fn merge(&mut self, other: TimeBounds) {
        self.observe(other.start, other.stop);
    }

    /// Wall-clock duration of the window in milliseconds, when both bounds
    /// were observed.
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => Some(stop - start),
            _ => None,
        }
    }
}

/// Per-status tallies over the retained results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: [usize; 5],
}

impl StatusCounts {
    fn index(status: Status) -> usize {
        match status {
            Status::Passed => 0,
            Status::Skipped => 1,
            Status::Broken => 2,
            Status::Failed => 3,
            Status::Unknown => 4,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        self.counts[Self::index(status)]
    }

    pub fn increment(&mut self, status: Status) {
        self.counts[Self::index(status)] += 1;
    }

    /// Iterates tallies in the canonical `Status::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, usize)> + '_ {
        Status::ALL.into_iter().map(|status| (status, self.get(status)))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_rank_orders_broken_first() {
        assert!(Status::Broken.rank() < Status::Failed.rank());
        assert!(Status::Failed.rank() < Status::Skipped.rank());
        assert!(Status::Skipped.rank() < Status::Passed.rank());
        assert!(Status::Passed.rank() < Status::Unknown.rank());
    }

    #[test]
    fn time_bounds_observe_widens_in_both_directions() {
        let mut bounds = TimeBounds::default();
        bounds.observe(Some(100), Some(200));
        bounds.observe(Some(150), Some(400));
        bounds.observe(Some(50), Some(120));
        assert_eq!(bounds.start, Some(50));
        assert_eq!(bounds.stop, Some(400));
        assert_eq!(bounds.duration_ms(), Some(350));
    }

    #[test]
    fn time_bounds_ignore_missing_timestamps() {
        let mut bounds = TimeBounds::default();
        bounds.observe(None, None);
        assert_eq!(bounds, TimeBounds::default());
        assert_eq!(bounds.duration_ms(), None);
    }
}
