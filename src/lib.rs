//! # Allure DOCX Library / Allure DOCX 库
//!
//! This library provides the core functionality for the allure-docx tool,
//! which turns a directory of Allure test results into a DOCX report with a
//! session summary, a results pie chart and per-test detail sections.
//!
//! 此库为 allure-docx 工具提供核心功能，
//! 它将 Allure 测试结果目录转换为带有会话摘要、结果饼图和
//! 每个测试详情小节的 DOCX 报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Allure data models, loading, aggregation and summary statistics
//! - `infra` - Infrastructure services like path handling and PDF conversion
//! - `reporting` - Document, chart and console output
//! - `cli` - Command-line interface
//! - `commands` - CLI-level operations
//!
//! - `core` - Allure 数据模型、加载、聚合和汇总统计
//! - `infra` - 基础设施服务，如路径处理和 PDF 转换
//! - `reporting` - 文档、图表和控制台输出
//! - `cli` - 命令行接口
//! - `commands` - CLI 级操作

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::aggregate;
pub use crate::core::config;
pub use crate::core::models;
pub use crate::core::summary;
