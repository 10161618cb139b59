//! # Presentation Config Module / 展示配置模块
//!
//! Typed resolution of the report presentation configuration: which fields
//! and labels are rendered for which test status, cover metadata, the ordered
//! details table and the summary toggles. Configs are TOML files; the
//! `info`/`labels` sections map field or label names to status letter codes
//! (`f`ailed, `b`roken, `p`assed, `s`kipped, `u`nknown).
//!
//! 报告展示配置的类型化解析：每种测试状态渲染哪些字段和标签、封面元数据、
//! 有序的详情表和摘要开关。配置为 TOML 文件；`info`/`labels` 小节将字段或
//! 标签名映射到状态字母码（`f`ailed、`b`roken、`p`assed、`s`kipped、`u`nknown）。

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::core::models::Status;

/// Embedded presets. A custom config file is merged over `standard`, so it
/// only needs to spell out the deviations.
/// 内置预设。自定义配置文件会合并到 `standard` 之上，因此只需写出差异部分。
const STANDARD: &str = include_str!("assets/standard.toml");
const STANDARD_ON_FAIL: &str = include_str!("assets/standard_on_fail.toml");
const COMPACT: &str = include_str!("assets/compact.toml");
const NO_TRACE: &str = include_str!("assets/no_trace.toml");

/// Names accepted by the `--config` selector, besides a file path.
pub const PRESET_NAMES: [&str; 4] = ["standard", "standard_on_fail", "compact", "no_trace"];

/// Which sections of a test's detail page are rendered. One instance exists
/// per status; all flags default to off and are switched on by letter codes.
///
/// 测试详情页中渲染哪些部分。每种状态对应一个实例；
/// 所有开关默认关闭，由字母码打开。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoFlags {
    pub duration: bool,
    pub description: bool,
    pub parameters: bool,
    pub details: bool,
    pub trace: bool,
    pub links: bool,
    pub setup: bool,
    pub body: bool,
    pub teardown: bool,
    pub steps: bool,
    pub attachments: bool,
    /// Whether tests with this status get a detail section at all.
    pub tests: bool,
}

/// One value of type `T` per test status.
#[derive(Debug, Clone, Default)]
pub struct StatusMap<T> {
    pub passed: T,
    pub failed: T,
    pub broken: T,
    pub skipped: T,
    pub unknown: T,
}

impl<T> StatusMap<T> {
    pub fn get(&self, status: Status) -> &T {
        match status {
            Status::Passed => &self.passed,
            Status::Failed => &self.failed,
            Status::Broken => &self.broken,
            Status::Skipped => &self.skipped,
            Status::Unknown => &self.unknown,
        }
    }

    pub fn get_mut(&mut self, status: Status) -> &mut T {
        match status {
            Status::Passed => &mut self.passed,
            Status::Failed => &mut self.failed,
            Status::Broken => &mut self.broken,
            Status::Skipped => &mut self.skipped,
            Status::Unknown => &mut self.unknown,
        }
    }
}

/// Cover page metadata.
#[derive(Debug, Clone, Default)]
pub struct Cover {
    pub title: Option<String>,
    pub company: Option<String>,
}

/// Summary section toggles. Both default to on.
#[derive(Debug, Clone, Copy)]
pub struct SummaryToggles {
    pub overview: bool,
    pub table: bool,
}

impl Default for SummaryToggles {
    fn default() -> Self {
        Self {
            overview: true,
            table: true,
        }
    }
}

/// Optional logo placed on the cover page.
#[derive(Debug, Clone)]
pub struct Logo {
    pub path: PathBuf,
    pub height_cm: Option<f32>,
}

/// The fully resolved presentation configuration. Read-only to the rest of
/// the pipeline; aggregation never mutates it.
///
/// 完全解析后的展示配置。对流水线的其余部分只读；聚合阶段绝不修改它。
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub info: StatusMap<InfoFlags>,
    /// Label names (lowercase) shown per status, in config order.
    pub labels: StatusMap<Vec<String>>,
    pub cover: Cover,
    /// Ordered key/value pairs of the details table. Keys prefixed with `*`
    /// are rendered de-emphasized.
    pub details: Vec<(String, String)>,
    pub summary: SummaryToggles,
    pub logo: Option<Logo>,
}

impl ReportConfig {
    /// Resolves a `--config` selector: a preset name, or a path to a custom
    /// TOML file merged over the `standard` preset.
    ///
    /// 解析 `--config` 选择器：一个预设名，或一个自定义 TOML 文件路径
    /// （合并到 `standard` 预设之上）。
    pub fn load(selector: &str) -> Result<Self> {
        let raw = match selector {
            "standard" => parse_raw(STANDARD).context("embedded preset `standard` is invalid")?,
            "standard_on_fail" => parse_raw(STANDARD_ON_FAIL)
                .context("embedded preset `standard_on_fail` is invalid")?,
            "compact" => parse_raw(COMPACT).context("embedded preset `compact` is invalid")?,
            "no_trace" => parse_raw(NO_TRACE).context("embedded preset `no_trace` is invalid")?,
            path => {
                let base =
                    parse_raw(STANDARD).context("embedded preset `standard` is invalid")?;
                let custom = Self::read_raw(Path::new(path))?;
                base.overlaid_with(custom)
            }
        };
        Ok(raw.resolve())
    }

    fn read_raw(path: &Path) -> Result<RawConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        parse_raw(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

fn parse_raw(contents: &str) -> Result<RawConfig> {
    Ok(toml::from_str(contents)?)
}

/// The on-disk shape of a config file, before letter codes are resolved.
/// Section entries keep their document order (the details table is an
/// ordered presentation contract).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(deserialize_with = "ordered_pairs")]
    info: Vec<(String, String)>,
    #[serde(deserialize_with = "ordered_pairs")]
    labels: Vec<(String, String)>,
    cover: RawCover,
    #[serde(deserialize_with = "ordered_pairs")]
    details: Vec<(String, String)>,
    summary: RawSummary,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawCover {
    title: Option<String>,
    company: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSummary {
    overview: Option<bool>,
    table: Option<bool>,
}

impl RawConfig {
    /// Merges `overlay` over `self`, key by key per section. Overlay values
    /// replace base values; new keys are appended in overlay order.
    fn overlaid_with(mut self, overlay: RawConfig) -> RawConfig {
        overlay_pairs(&mut self.info, overlay.info);
        overlay_pairs(&mut self.labels, overlay.labels);
        overlay_pairs(&mut self.details, overlay.details);
        if overlay.cover.title.is_some() {
            self.cover.title = overlay.cover.title;
        }
        if overlay.cover.company.is_some() {
            self.cover.company = overlay.cover.company;
        }
        if overlay.summary.overview.is_some() {
            self.summary.overview = overlay.summary.overview;
        }
        if overlay.summary.table.is_some() {
            self.summary.table = overlay.summary.table;
        }
        self
    }

    fn resolve(self) -> ReportConfig {
        let mut config = ReportConfig {
            details: self.details,
            cover: Cover {
                title: self.cover.title,
                company: self.cover.company,
            },
            summary: SummaryToggles {
                overview: self.summary.overview.unwrap_or(true),
                table: self.summary.table.unwrap_or(true),
            },
            ..ReportConfig::default()
        };

        for (key, codes) in &self.info {
            for status in statuses_for(codes) {
                if !set_info_flag(config.info.get_mut(status), key) {
                    log::warn!("unknown info field `{key}` in report config, ignoring");
                    break;
                }
            }
        }
        for (label, codes) in &self.labels {
            for status in statuses_for(codes) {
                config.labels.get_mut(status).push(label.to_lowercase());
            }
        }
        config
    }
}

fn overlay_pairs(base: &mut Vec<(String, String)>, overlay: Vec<(String, String)>) {
    for (key, value) in overlay {
        match base.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => base.push((key, value)),
        }
    }
}

fn statuses_for(codes: &str) -> impl Iterator<Item = Status> + '_ {
    [
        ('f', Status::Failed),
        ('b', Status::Broken),
        ('p', Status::Passed),
        ('s', Status::Skipped),
        ('u', Status::Unknown),
    ]
    .into_iter()
    .filter(move |(code, _)| codes.contains(*code))
    .map(|(_, status)| status)
}

fn set_info_flag(flags: &mut InfoFlags, key: &str) -> bool {
    let slot = match key {
        "duration" => &mut flags.duration,
        "description" => &mut flags.description,
        "parameters" => &mut flags.parameters,
        "details" => &mut flags.details,
        "trace" => &mut flags.trace,
        "links" => &mut flags.links,
        "setup" => &mut flags.setup,
        "body" => &mut flags.body,
        "teardown" => &mut flags.teardown,
        "steps" => &mut flags.steps,
        "attachments" => &mut flags.attachments,
        "tests" => &mut flags.tests,
        _ => return false,
    };
    *slot = true;
    true
}

/// Deserializes a TOML table into pairs in document order. Requires the
/// `preserve_order` feature of the `toml` crate; without it tables are backed
/// by a sorted map and the entries arrive alphabetized.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a table of string values")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::new();
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                pairs.push((key, value));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}
