//! # Generate Command Module / 生成命令模块
//!
//! Drives one report build end to end: load the results directory, aggregate,
//! derive the session summary, draw the chart, render the document and save
//! it. The whole pipeline is one synchronous sequence; records are
//! independent until cross-linking, which needs all of them loaded.
//!
//! 端到端驱动一次报告构建：加载结果目录、聚合、派生会话摘要、绘制图表、
//! 渲染文档并保存。整个流水线是一个同步序列；记录在交叉关联之前相互独立，
//! 而交叉关联需要所有记录都已加载。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};

use crate::core::config::{Logo, ReportConfig};
use crate::core::error::ReportError;
use crate::core::loader::load_results_dir;
use crate::core::summary::SessionSummary;
use crate::core::{SessionStats, aggregate};
use crate::infra::{fs as fsx, pdf};
use crate::reporting::{DocxRenderer, console, piechart};

/// Everything one `allure-docx` invocation was asked to do.
/// 一次 `allure-docx` 调用被要求完成的全部内容。
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub allure_dir: PathBuf,
    pub output: PathBuf,
    /// Preset name or path to a custom config file.
    pub config: String,
    pub title: Option<String>,
    pub logo: Option<PathBuf>,
    pub logo_height_cm: Option<f32>,
    pub pdf: bool,
    /// Strict empty-report policy: abort instead of rendering the
    /// "no results" placeholder page.
    pub fail_if_empty: bool,
}

pub fn execute(options: GenerateOptions) -> Result<()> {
    let allure_dir = fsx::absolutize(&options.allure_dir);
    let output = fsx::absolutize(&options.output);
    ensure!(
        fsx::is_directory(&allure_dir),
        "results directory {} does not exist or is not a directory",
        allure_dir.display()
    );

    let config = resolved_config(&options)?;

    let (results, containers) = load_results_dir(&allure_dir)?;
    let (entries, stats) = aggregate(results, containers);
    if entries.is_empty() && options.fail_if_empty {
        return Err(ReportError::NoResults(allure_dir).into());
    }

    let summary = SessionSummary::from_stats(&stats);
    let chart_png = render_chart(&summary, &stats);

    let renderer = DocxRenderer::new(&config, &allure_dir);
    let docx = renderer.render(&entries, &summary, chart_png.as_deref());
    save_document(docx, &output)?;

    console::print_summary(&summary, &output);

    if options.pdf {
        match pdf::convert_to_pdf(&output) {
            Ok(pdf_path) => println!("PDF written to {}", pdf_path.display()),
            Err(e) => log::warn!("PDF conversion failed: {e:#}"),
        }
    }

    Ok(())
}

fn resolved_config(options: &GenerateOptions) -> Result<ReportConfig> {
    let mut config = ReportConfig::load(&options.config)?;
    // CLI overrides are folded in after the preset/file merge.
    if let Some(title) = &options.title {
        config.cover.title = Some(title.clone());
    }
    if let Some(path) = &options.logo {
        config.logo = Some(Logo {
            path: fsx::absolutize(path),
            height_cm: options.logo_height_cm,
        });
    }
    Ok(config)
}

/// The chart is decoration: a failed render degrades the summary to
/// text-only instead of failing the build.
fn render_chart(summary: &SessionSummary, stats: &SessionStats) -> Option<Vec<u8>> {
    if stats.total == 0 {
        return None;
    }
    match piechart::render_pie_chart(&summary.chart_slices()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("could not render the results pie chart: {e:#}");
            None
        }
    }
}

/// Writes the document to a temporary file next to the target and renames it
/// into place, so a failed build never leaves a partial output file.
///
/// 先将文档写入目标旁的临时文件，再重命名到位，
/// 因此失败的构建绝不会留下不完整的输出文件。
fn save_document(docx: docx_rs::Docx, output: &Path) -> Result<()> {
    let out_dir = output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let temp = tempfile::Builder::new()
        .prefix(".allure-docx-")
        .suffix(".docx")
        .tempfile_in(out_dir)
        .context("failed to create a temporary output file")?;

    docx.build()
        .pack(temp.as_file())
        .with_context(|| format!("failed to write the report document for {}", output.display()))?;

    temp.persist(output)
        .with_context(|| format!("failed to move the report into place at {}", output.display()))?;
    Ok(())
}
