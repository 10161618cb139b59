//! # Reporting Module / 报告模块
//!
//! This module handles the presentation side of a report build: the DOCX
//! document renderer, the results pie chart and the colored console summary
//! printed after a successful build.
//!
//! 此模块处理报告构建的展示部分：DOCX 文档渲染器、结果饼图，
//! 以及构建成功后打印的彩色控制台摘要。

pub mod console;
pub mod docx;
pub mod piechart;

// Re-export common reporting entry points
pub use console::print_summary;
pub use docx::DocxRenderer;
pub use piechart::render_pie_chart;
