use allure_docx::core::models::{
    ContainerRecord, ResultRecord, Status, StatusCounts, TimeBounds,
};

/// Parses a representative result file and checks that the camelCase and
/// `type` renames of the Allure schema are mapped onto the Rust field names.
///
/// 解析一个有代表性的结果文件，检查 Allure 模式的 camelCase 和 `type`
/// 重命名是否映射到了 Rust 字段名上。
#[test]
fn test_result_record_field_mapping() {
    let json = r#"{
        "uuid": "u-1",
        "historyId": "h-1",
        "name": "login works",
        "fullName": "tests.auth#login_works",
        "status": "failed",
        "statusDetails": {"message": "boom", "trace": "stack"},
        "start": 1000,
        "stop": 4000,
        "parameters": [{"name": "user", "value": "alice"}],
        "labels": [{"name": "severity", "value": "critical"}],
        "links": [{"name": "issue-12", "url": "https://example.com/12", "type": "issue"}],
        "attachments": [{"name": "screen", "type": "image/png", "source": "a.png"}],
        "steps": [
            {"name": "outer", "status": "failed", "start": 1000, "stop": 4000,
             "steps": [{"name": "inner", "status": "failed", "start": 1200, "stop": 1300}]}
        ]
    }"#;

    let record: ResultRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.uuid, "u-1");
    assert_eq!(record.history_id.as_deref(), Some("h-1"));
    assert_eq!(record.qualified_name(), "tests.auth#login_works");
    assert_eq!(record.status, Status::Failed);
    assert_eq!(record.duration_ms(), Some(3000));

    let details = record.status_details.as_ref().unwrap();
    assert_eq!(details.message_text(), Some("boom"));
    assert_eq!(details.trace_text(), Some("stack"));

    assert_eq!(record.links[0].link_type.as_deref(), Some("issue"));
    assert_eq!(record.attachments[0].mime_type.as_deref(), Some("image/png"));
    assert_eq!(record.steps[0].steps[0].name, "inner");
}

/// A status string outside the known set must not fail the parse; it falls
/// back to `Unknown`, and so does a record with no status at all.
///
/// 已知集合之外的状态字符串不能导致解析失败；它回退为 `Unknown`，
/// 完全没有状态的记录也是如此。
#[test]
fn test_unrecognized_status_falls_back_to_unknown() {
    let record: ResultRecord =
        serde_json::from_str(r#"{"uuid": "u", "name": "t", "status": "flaky"}"#).unwrap();
    assert_eq!(record.status, Status::Unknown);

    let bare: ResultRecord = serde_json::from_str(r#"{"uuid": "u", "name": "t"}"#).unwrap();
    assert_eq!(bare.status, Status::Unknown);
}

/// A record without `historyId` dedups against nothing but itself, and a
/// record without `fullName` qualifies by its display name.
///
/// 没有 `historyId` 的记录只与自身去重，没有 `fullName` 的记录
/// 以其显示名称作为限定名。
#[test]
fn test_record_fallback_keys() {
    let record: ResultRecord =
        serde_json::from_str(r#"{"uuid": "u-9", "name": "solo"}"#).unwrap();
    assert_eq!(record.dedup_key(), "u-9");
    assert_eq!(record.qualified_name(), "solo");
    assert_eq!(record.duration_ms(), None);
}

/// Containers carry fixtures and child membership; empty lists are accepted.
#[test]
fn test_container_record_parsing() {
    let json = r#"{
        "uuid": "c-1",
        "name": "session fixture",
        "children": ["u-1", "u-2"],
        "befores": [{"name": "prepare", "status": "passed", "start": 10, "stop": 20}]
    }"#;
    let container: ContainerRecord = serde_json::from_str(json).unwrap();
    assert_eq!(container.children, vec!["u-1", "u-2"]);
    assert_eq!(container.befores.len(), 1);
    assert!(container.afters.is_empty());
}

/// `StatusCounts::iter` walks the canonical order and the total matches the
/// sum of all increments.
#[test]
fn test_status_counts_iterate_in_canonical_order() {
    let mut counts = StatusCounts::default();
    counts.increment(Status::Failed);
    counts.increment(Status::Passed);
    counts.increment(Status::Passed);

    let order: Vec<Status> = counts.iter().map(|(status, _)| status).collect();
    assert_eq!(order, Status::ALL.to_vec());
    assert_eq!(counts.get(Status::Passed), 2);
    assert_eq!(counts.get(Status::Failed), 1);
    assert_eq!(counts.total(), 3);
}

/// Merging two time windows keeps the widest extent of both.
#[test]
fn test_time_bounds_merge_takes_widest_window() {
    let mut left = TimeBounds {
        start: Some(100),
        stop: Some(200),
    };
    let right = TimeBounds {
        start: Some(40),
        stop: Some(150),
    };
    left.merge(right);
    assert_eq!(left.start, Some(40));
    assert_eq!(left.stop, Some(200));
}
