//! # PDF Conversion Module / PDF 转换模块
//!
//! Optional post-processing step that converts the generated DOCX file to PDF
//! by shelling out to LibreOffice (`soffice`). Conversion is best-effort: the
//! DOCX report already exists when this runs, so a missing converter is
//! reported but never fails the build.
//!
//! 可选的后处理步骤，通过调用 LibreOffice（`soffice`）将生成的 DOCX 文件转换
//! 为 PDF。属于尽力而为：运行到这里时 DOCX 报告已经生成，因此找不到转换器只会
//! 被报告，不会使构建失败。

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Converts `docx_path` to a PDF next to it, returning the PDF path.
/// `soffice` names the output after the input file stem.
///
/// 将 `docx_path` 转换为同目录下的 PDF 并返回其路径。
/// `soffice` 按输入文件名命名输出文件。
pub fn convert_to_pdf(docx_path: &Path) -> Result<PathBuf> {
    let soffice =
        which::which("soffice").context("soffice (LibreOffice) was not found on PATH")?;

    let out_dir = docx_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let status = Command::new(&soffice)
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(out_dir)
        .arg(docx_path)
        .status()
        .with_context(|| format!("failed to run {}", soffice.display()))?;

    if !status.success() {
        bail!("soffice exited with {status} while converting {}", docx_path.display());
    }

    Ok(docx_path.with_extension("pdf"))
}
