//! # File System Operations Module / 文件系统操作模块
//!
//! Small path utilities shared by the CLI and the report pipeline.
//!
//! CLI 和报告流水线共享的小型路径工具。

use std::env;
use std::path::{Path, PathBuf};

/// Resolves a possibly relative path against the current working directory.
/// Unlike `fs::canonicalize` this does not require the path to exist, so it
/// also works for the not-yet-written output file.
///
/// # Arguments
/// * `path` - Path to resolve
///
/// # Returns
/// An absolute path
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
