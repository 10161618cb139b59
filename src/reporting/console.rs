//! # Console Reporting Module / 控制台报告模块
//!
//! Prints a colored tally of the built report to the console, mirroring the
//! per-status lines of the document's summary section.
//!
//! 在控制台打印生成报告的彩色统计，与文档摘要部分的各状态行保持一致。

use std::path::Path;

use colored::*;

use crate::core::models::Status;
use crate::core::summary::SessionSummary;

/// Prints a formatted summary of the report session to the console.
///
/// 在控制台打印报告会话的格式化摘要。
///
/// # Output Format / 输出格式
/// ```text
/// --- Report Summary ---
///   - passed   |    2 (66.67%)
///   - failed   |    1 (33.33%)
///   Start:    Mon Mar  4 10:12:01 2024
///   End:      Mon Mar  4 10:12:06 2024
///   Duration: 5s
/// Report written to report.docx
/// ```
pub fn print_summary(summary: &SessionSummary, output: &Path) {
    println!("\n{}", "--- Report Summary ---".bold());

    for (status, count) in summary.counts.iter() {
        if count == 0 {
            continue;
        }
        let status_colored = match status {
            Status::Passed => status.as_str().green(),
            Status::Failed => status.as_str().red(),
            Status::Broken => status.as_str().yellow(),
            Status::Skipped => status.as_str().dimmed(),
            Status::Unknown => status.as_str().magenta(),
        };
        println!(
            "  - {:<8} | {:>4} ({})",
            status_colored,
            count,
            summary.percentage_of(status)
        );
    }
    if summary.total == 0 {
        println!("  {}", "no test results were found".yellow());
    }

    println!("  Start:    {}", summary.start_text);
    println!("  End:      {}", summary.stop_text);
    println!("  Duration: {}", summary.duration_text);
    println!("Report written to {}", output.display());
}
