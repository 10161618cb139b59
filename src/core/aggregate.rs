//! # Aggregation Module / 聚合模块
//!
//! Transforms raw result and container records into the canonical view
//! consumed by rendering: reruns deduplicated, parameterized variants
//! disambiguated, containers cross-linked, session time bounds folded and the
//! final list stably sorted by severity then name.
//!
//! 将原始的结果记录和容器记录转换为渲染所需的规范视图：
//! 重跑去重、参数化变体区分命名、容器交叉关联、会话时间窗口折叠，
//! 最终列表按严重程度和名称稳定排序。

use std::collections::HashMap;

use crate::core::models::{
    ContainerRecord, ResultRecord, StatusCounts, StepNode, TimeBounds,
};

/// One retained test, ready for presentation: the (possibly disambiguated)
/// display name, the winning execution, and the containers that own it.
///
/// 一条保留下来的测试记录，可直接用于展示：（可能已区分命名的）显示名称、
/// 胜出的那次执行，以及拥有它的容器。
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub name: String,
    pub result: ResultRecord,
    pub parents: Vec<ContainerRecord>,
}

/// Session-scoped aggregates over the retained results.
/// 对保留结果的会话级聚合。
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub bounds: TimeBounds,
    pub counts: StatusCounts,
    pub total: usize,
}

/// Runs the whole aggregation pipeline. Deterministic: the output ordering
/// does not depend on the order the records were loaded in.
///
/// 运行整个聚合流水线。结果是确定性的：输出顺序不依赖记录的加载顺序。
pub fn aggregate(
    results: Vec<ResultRecord>,
    containers: Vec<ContainerRecord>,
) -> (Vec<TestEntry>, SessionStats) {
    let retained = dedup_reruns(results);

    let mut entries: Vec<TestEntry> = retained
        .into_iter()
        .map(|result| TestEntry {
            name: result.name.clone(),
            result,
            parents: Vec::new(),
        })
        .collect();

    // Qualified-name order drives both disambiguation and the numbering of
    // parameterized variants.
    entries.sort_by(|a, b| {
        (a.result.qualified_name(), &a.result.uuid)
            .cmp(&(b.result.qualified_name(), &b.result.uuid))
    });
    disambiguate_parameterized(&mut entries);

    let mut stats = SessionStats::default();
    for entry in &entries {
        stats.total += 1;
        stats.counts.increment(entry.result.status);
        stats.bounds.observe(entry.result.start, entry.result.stop);
        for step in &entry.result.steps {
            stats.bounds.merge(step_bounds(step));
        }
    }

    link_containers(&mut entries, &containers, &mut stats.bounds);

    // Presentation contract: severity groups first, alphabetical within.
    entries.sort_by(|a, b| {
        (a.result.status.rank(), &a.name).cmp(&(b.result.status.rank(), &b.name))
    });

    (entries, stats)
}

/// Keeps only the most recent execution per history id. Reruns share a
/// `historyId`; the one with the latest `start` wins, with the uuid breaking
/// ties so the outcome is stable.
///
/// 每个 history id 只保留最近的一次执行。重跑共享同一个 `historyId`；
/// `start` 最晚的一次胜出，uuid 用于决胜以保证结果稳定。
fn dedup_reruns(results: Vec<ResultRecord>) -> Vec<ResultRecord> {
    let mut by_history: HashMap<String, ResultRecord> = HashMap::new();
    for result in results {
        let key = result.dedup_key().to_string();
        match by_history.get(&key) {
            Some(current) if !is_more_recent(&result, current) => {}
            _ => {
                by_history.insert(key, result);
            }
        }
    }
    by_history.into_values().collect()
}

fn is_more_recent(candidate: &ResultRecord, current: &ResultRecord) -> bool {
    (candidate.start, &candidate.uuid) > (current.start, &current.uuid)
}

/// Appends `" [n]"` (0-based, in retained order) to the display name of every
/// parameterized result that shares its qualified name with another retained
/// result. Expects `entries` sorted by qualified name.
///
/// 为每个与其他保留结果共享限定名的参数化结果的显示名称追加 `" [n]"`
/// （从 0 开始，按保留顺序编号）。要求 `entries` 已按限定名排序。
fn disambiguate_parameterized(entries: &mut [TestEntry]) {
    let mut run_start = 0;
    while run_start < entries.len() {
        let run_end = run_start
            + entries[run_start..]
                .iter()
                .take_while(|entry| {
                    entry.result.qualified_name()
                        == entries[run_start].result.qualified_name()
                })
                .count();
        if run_end - run_start > 1 {
            let mut variant = 0;
            for entry in &mut entries[run_start..run_end] {
                if !entry.result.parameters.is_empty() {
                    entry.name.push_str(&format!(" [{variant}]"));
                    variant += 1;
                }
            }
        }
        run_start = run_end;
    }
}

/// Attaches each container to the retained results listed in its `children`
/// and folds its setup/teardown step bounds into the session window, once per
/// linked container.
fn link_containers(
    entries: &mut [TestEntry],
    containers: &[ContainerRecord],
    bounds: &mut TimeBounds,
) {
    for container in containers {
        let mut linked = false;
        for entry in entries.iter_mut() {
            if container.children.iter().any(|child| *child == entry.result.uuid) {
                entry.parents.push(container.clone());
                linked = true;
            }
        }
        if linked {
            for fixture in container.befores.iter().chain(&container.afters) {
                bounds.merge(step_bounds(fixture));
            }
        }
    }
}

/// Pure bottom-up fold of a step subtree into its `(min start, max stop)`
/// window.
/// 对步骤子树进行纯自底向上折叠，得到其（最早开始，最晚结束）窗口。
pub fn step_bounds(step: &StepNode) -> TimeBounds {
    let mut bounds = TimeBounds {
        start: step.start,
        stop: step.stop,
    };
    for child in &step.steps {
        bounds.merge(step_bounds(child));
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Status;

    fn step(start: i64, stop: i64, children: Vec<StepNode>) -> StepNode {
        StepNode {
            name: "step".to_string(),
            start: Some(start),
            stop: Some(stop),
            steps: children,
            ..StepNode::default()
        }
    }

    #[test]
    fn step_bounds_fold_nested_children() {
        let tree = step(100, 200, vec![step(50, 120, vec![step(40, 60, vec![])])]);
        let bounds = step_bounds(&tree);
        assert_eq!(bounds.start, Some(40));
        assert_eq!(bounds.stop, Some(200));
    }

    #[test]
    fn step_bounds_of_untimed_step_are_unset() {
        let node = StepNode::default();
        assert_eq!(step_bounds(&node), TimeBounds::default());
    }

    #[test]
    fn dedup_prefers_latest_start() {
        let mut older = ResultRecord::default();
        older.uuid = "a".to_string();
        older.history_id = Some("h".to_string());
        older.start = Some(100);
        older.status = Status::Failed;

        let mut newer = older.clone();
        newer.uuid = "b".to_string();
        newer.start = Some(200);
        newer.status = Status::Passed;

        let retained = dedup_reruns(vec![older, newer]);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].uuid, "b");
    }
}
