//! # Pie Chart Module / 饼图模块
//!
//! Draws the session results pie chart as a PNG image, returned as bytes for
//! embedding into the document. Slices use the Allure status palette. The
//! chart itself is drawn text-free; status names, counts and percentages
//! stand right next to it in the summary table, so the build does not depend
//! on any system font being installed.
//!
//! 将会话结果饼图绘制为 PNG 图像，以字节形式返回用于嵌入文档。
//! 扇区使用 Allure 状态调色板。图表本身不含文字；状态名、数量和百分比
//! 就在摘要表中图表旁边，因此构建不依赖系统中安装的任何字体。

use anyhow::{Result, anyhow};
use plotters::prelude::*;

use crate::core::models::Status;

const WIDTH: u32 = 560;
const HEIGHT: u32 = 560;
const RADIUS: f64 = 250.0;

/// Renders the pie chart for the given non-empty `(status, count)` slices.
/// The caller treats a failure here as recoverable: the summary degrades to
/// text-only.
///
/// 为给定的非空 `(status, count)` 扇区数据渲染饼图。
/// 调用者将此处的失败视为可恢复：摘要会降级为纯文本。
pub fn render_pie_chart(slices: &[(Status, usize)]) -> Result<Vec<u8>> {
    let total: usize = slices.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Err(anyhow!("cannot draw a pie chart of an empty session"));
    }

    let image = tempfile::Builder::new()
        .prefix("allure-docx-pie-")
        .suffix(".png")
        .tempfile()?;

    {
        let root = BitMapBackend::new(image.path(), (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("failed to prepare chart canvas: {e}"))?;

        let center = ((WIDTH / 2) as i32, (HEIGHT / 2) as i32);
        // Slices start at twelve o'clock and run clockwise.
        let mut angle = -90.0_f64;
        for (status, count) in slices {
            let sweep = 360.0 * *count as f64 / total as f64;
            let (r, g, b) = status.color_rgb();
            let sector = sector_points(center, RADIUS, angle, angle + sweep);
            root.draw(&Polygon::new(sector, RGBColor(r, g, b).filled()))
                .map_err(|e| anyhow!("failed to draw chart slice: {e}"))?;
            angle += sweep;
        }

        root.present()
            .map_err(|e| anyhow!("failed to write chart image: {e}"))?;
    }

    Ok(std::fs::read(image.path())?)
}

/// Approximates one pie sector as a closed polygon: the center plus points
/// along the arc in one-degree steps.
fn sector_points(
    center: (i32, i32),
    radius: f64,
    from_deg: f64,
    to_deg: f64,
) -> Vec<(i32, i32)> {
    let mut points = vec![center];
    let steps = ((to_deg - from_deg).ceil() as usize).max(1);
    for i in 0..=steps {
        let angle = (from_deg + (to_deg - from_deg) * i as f64 / steps as f64).to_radians();
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}
