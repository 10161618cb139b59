//! # Result Loader Module / 结果加载模块
//!
//! Reads an Allure results directory and partitions its JSON files into
//! result records and container records. A single unparsable file aborts the
//! whole build; no partial report is ever produced from corrupt input.
//!
//! 读取 Allure 结果目录，并将其中的 JSON 文件划分为结果记录和容器记录。
//! 任何一个无法解析的文件都会中止整个构建；损坏的输入永远不会产生部分报告。

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::core::error::ReportError;
use crate::core::models::{ContainerRecord, ResultRecord};

/// File-name markers written by the Allure adapters.
/// Allure 适配器写出的文件名标记。
const RESULT_MARKER: &str = "result";
const CONTAINER_MARKER: &str = "container";

/// Scans `dir` (non-recursively) and parses every `*result*.json` and
/// `*container*.json` file it contains. The `.json` restriction keeps
/// attachment payloads out of the scan.
///
/// 非递归扫描 `dir`，解析其中所有 `*result*.json` 和 `*container*.json` 文件。
/// 限定 `.json` 扩展名可将附件文件排除在扫描之外。
pub fn load_results_dir(
    dir: &Path,
) -> Result<(Vec<ResultRecord>, Vec<ContainerRecord>), ReportError> {
    let mut results = Vec::new();
    let mut containers = Vec::new();

    let entries = fs::read_dir(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    // Collect and sort the file names so a load error always points at the
    // same file regardless of filesystem enumeration order.
    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    for path in paths {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !file_name.ends_with(".json") {
            continue;
        }
        if file_name.contains(CONTAINER_MARKER) {
            containers.push(parse_record::<ContainerRecord>(&path)?);
        } else if file_name.contains(RESULT_MARKER) {
            results.push(parse_record::<ResultRecord>(&path)?);
        }
    }

    log::debug!(
        "loaded {} result record(s) and {} container record(s) from {}",
        results.len(),
        containers.len(),
        dir.display()
    );

    Ok((results, containers))
}

fn parse_record<T: DeserializeOwned>(path: &Path) -> Result<T, ReportError> {
    let contents = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ReportError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}
