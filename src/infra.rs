//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for allure-docx,
//! including path handling and the external PDF conversion step.
//!
//! 此模块为 allure-docx 提供基础设施服务，
//! 包括路径处理和外部 PDF 转换步骤。

pub mod fs;
pub mod pdf;
