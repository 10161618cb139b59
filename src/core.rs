//! # Core Module / 核心模块
//!
//! This module contains the core functionality of allure-docx,
//! including the Allure data models, the result loader, the aggregation
//! pipeline, summary statistics and the presentation configuration.
//!
//! 此模块包含 allure-docx 的核心功能，
//! 包括 Allure 数据模型、结果加载器、聚合流水线、汇总统计和展示配置。

pub mod aggregate;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod summary;

// Re-exports
pub use aggregate::{SessionStats, TestEntry, aggregate};
pub use config::ReportConfig;
pub use error::ReportError;
pub use models::{ContainerRecord, ResultRecord, Status, StepNode};
pub use summary::SessionSummary;
