//! Shared fixtures for the integration tests: builders for Allure result and
//! container JSON files, written the way the adapters write them.
//!
//! 集成测试的共享夹具：按照适配器的写法构建 Allure 结果和容器 JSON 文件。

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};

/// Writes one `*-result.json` file into `dir`.
pub fn write_result(dir: &Path, file_stem: &str, value: &Value) {
    fs::write(dir.join(format!("{file_stem}-result.json")), value.to_string()).unwrap();
}

/// Writes one `*-container.json` file into `dir`.
pub fn write_container(dir: &Path, file_stem: &str, value: &Value) {
    fs::write(
        dir.join(format!("{file_stem}-container.json")),
        value.to_string(),
    )
    .unwrap();
}

/// A minimal but schema-complete result record.
pub fn sample_result(
    uuid: &str,
    history_id: &str,
    name: &str,
    status: &str,
    start: i64,
    stop: i64,
) -> Value {
    json!({
        "uuid": uuid,
        "historyId": history_id,
        "name": name,
        "fullName": format!("tests.sample#{name}"),
        "status": status,
        "start": start,
        "stop": stop,
        "labels": [
            {"name": "severity", "value": "normal"},
        ],
        "steps": [
            {"name": "step 1", "status": status, "start": start, "stop": stop},
        ],
    })
}

/// A container owning the given result uuids, with one setup fixture.
pub fn sample_container(uuid: &str, children: &[&str], start: i64, stop: i64) -> Value {
    json!({
        "uuid": uuid,
        "name": "session fixture",
        "children": children,
        "befores": [
            {"name": "prepare environment", "status": "passed", "start": start, "stop": stop},
        ],
        "afters": [
            {"name": "clean up", "status": "passed", "start": stop, "stop": stop + 5},
        ],
    })
}
