//! # DOCX Rendering Module / DOCX 渲染模块
//!
//! Emits the report document: cover page, details table, session summary with
//! the embedded pie chart, per-status listing tables and one detail section
//! per test. Everything here is mechanical emission; which fields appear for
//! which test status is decided entirely by the resolved `ReportConfig`, and
//! that conditional inclusion logic is the contract this module reproduces.
//!
//! 生成报告文档：封面、详情表、带内嵌饼图的会话摘要、各状态结果列表，
//! 以及每个测试一个详情小节。这里的一切都是机械式输出；
//! 每种测试状态展示哪些字段完全由解析后的 `ReportConfig` 决定，
//! 该条件化包含逻辑正是本模块要复现的契约。

use std::fs;
use std::mem;
use std::path::Path;

use chrono::Local;
use docx_rs::{
    AlignmentType, BreakType, Docx, Footer, Header, Paragraph, Pic, Run, RunFonts, Style,
    StyleType, Table, TableCell, TableOfContents, TableRow, WidthType,
};

use crate::core::aggregate::TestEntry;
use crate::core::config::{InfoFlags, ReportConfig};
use crate::core::models::{Attachment, Status, StepNode};
use crate::core::summary::{SessionSummary, format_duration};

/// Spaces per step nesting level.
const INDENT: usize = 6;

/// Table column widths in twips (1 cm = 567).
const NARROW_COL: usize = 4 * 567;
const WIDE_COL: usize = 12 * 567;
const HALF_COL: usize = 8 * 567;

/// Image widths in EMU (1 mm = 36 000).
const ATTACHMENT_WIDTH: u32 = 100 * 36_000;
const CHART_WIDTH: u32 = 75 * 36_000;
const EMU_PER_CM: u32 = 360_000;

/// Listing-table order in the summary section.
const LISTING_ORDER: [Status; 4] = [
    Status::Failed,
    Status::Broken,
    Status::Skipped,
    Status::Passed,
];

/// Builds the report document from the aggregated view. One renderer instance
/// produces one document.
///
/// 从聚合视图构建报告文档。一个渲染器实例产生一份文档。
pub struct DocxRenderer<'a> {
    config: &'a ReportConfig,
    allure_dir: &'a Path,
    docx: Docx,
}

impl<'a> DocxRenderer<'a> {
    pub fn new(config: &'a ReportConfig, allure_dir: &'a Path) -> Self {
        Self {
            config,
            allure_dir,
            docx: base_document(config),
        }
    }

    /// Renders the whole document. An empty session produces the cover and a
    /// single placeholder page (the strict policy never reaches this point).
    ///
    /// 渲染整份文档。空会话只生成封面和一个占位页面
    /// （严格策略不会执行到这里）。
    pub fn render(
        mut self,
        entries: &[TestEntry],
        summary: &SessionSummary,
        chart_png: Option<&[u8]>,
    ) -> Docx {
        self.render_cover();

        if entries.is_empty() {
            self.push(
                Paragraph::new()
                    .add_run(Run::new().add_text("No test results were found."))
                    .style("Subtitle"),
            );
            return self.docx;
        }

        self.render_details();
        self.render_summary(summary, chart_png, entries);

        let config = self.config;
        let detailed: Vec<&TestEntry> = entries
            .iter()
            .filter(|entry| config.info.get(entry.result.status).tests)
            .collect();
        if !detailed.is_empty() {
            self.heading1("Test Results");
            self.docx = mem::take(&mut self.docx)
                .add_table_of_contents(TableOfContents::new().heading_styles_range(1, 1).auto());
            for entry in detailed {
                self.render_test(entry);
            }
        }

        self.docx
    }

    // --- document sections ---

    fn render_cover(&mut self) {
        if let Some(logo) = &self.config.logo {
            match fs::read(&logo.path) {
                Ok(bytes) => {
                    let height = (logo.height_cm.unwrap_or(5.0) * EMU_PER_CM as f32) as u32;
                    let pic = scaled_pic(&bytes, None, Some(height));
                    self.push(
                        Paragraph::new()
                            .add_run(Run::new().add_image(pic))
                            .align(AlignmentType::Right),
                    );
                }
                Err(e) => {
                    log::warn!("skipping logo {}: {e}", logo.path.display());
                }
            }
        }

        if let Some(company) = &self.config.cover.company {
            self.push(
                Paragraph::new()
                    .add_run(Run::new().add_text(company))
                    .style("Company"),
            );
        }

        for _ in 0..4 {
            self.push(Paragraph::new());
        }
        self.push(
            Paragraph::new()
                .add_run(Run::new().add_text("Test Report"))
                .style("Title"),
        );

        let subtitle = self.cover_subtitle();
        if !subtitle.is_empty() {
            self.push(
                Paragraph::new()
                    .add_run(multiline_run(&subtitle))
                    .style("Subtitle"),
            );
        }
        self.push(
            Paragraph::new()
                .add_run(Run::new().add_text(Local::now().format("%Y-%m-%d").to_string()))
                .style("Heading2"),
        );
        self.page_break();
    }

    fn render_details(&mut self) {
        if self.config.details.is_empty() {
            return;
        }
        self.heading1("Test Details");

        let rows = self
            .config
            .details
            .iter()
            .map(|(key, value)| {
                let de_emphasized = key.starts_with('*');
                let display_key = key.trim_start_matches('*');
                let mut key_run = Run::new().add_text(display_key);
                let mut value_run = Run::new().add_text(value.trim());
                if de_emphasized {
                    key_run = key_run.italic().color("808080");
                    value_run = value_run.italic().color("808080");
                }
                TableRow::new(vec![
                    cell_with(key_run, NARROW_COL),
                    cell_with(value_run, WIDE_COL),
                ])
            })
            .collect();
        self.push_table(Table::new(rows).set_grid(vec![NARROW_COL, WIDE_COL]));
        self.page_break();
    }

    fn render_summary(
        &mut self,
        summary: &SessionSummary,
        chart_png: Option<&[u8]>,
        entries: &[TestEntry],
    ) {
        let toggles = self.config.summary;
        if !toggles.overview && !toggles.table {
            return;
        }
        self.heading1("Test Session Summary");

        if toggles.overview {
            let timing = Paragraph::new().add_run(multiline_run(&format!(
                "Start: {}\nEnd: {}\nDuration: {}",
                summary.start_text, summary.stop_text, summary.duration_text
            )));

            let mut tallies = Paragraph::new();
            let mut first = true;
            for (status, count) in summary.counts.iter() {
                if !first {
                    tallies = tallies.add_run(Run::new().add_break(BreakType::TextWrapping));
                }
                first = false;
                tallies = tallies
                    .add_run(
                        Run::new()
                            .add_text(format!("{}: ", status.as_str()))
                            .color(status.color_hex()),
                    )
                    .add_run(
                        Run::new()
                            .add_text(format!("{count} ({})", summary.percentage_of(status))),
                    );
            }

            let mut chart_cell = TableCell::new().width(HALF_COL, WidthType::Dxa);
            match chart_png {
                Some(bytes) => {
                    let pic = scaled_pic(bytes, Some(CHART_WIDTH), None);
                    chart_cell = chart_cell
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)));
                }
                None => {
                    chart_cell = chart_cell.add_paragraph(Paragraph::new());
                }
            }

            let overview_row = TableRow::new(vec![
                TableCell::new()
                    .width(HALF_COL, WidthType::Dxa)
                    .add_paragraph(timing)
                    .add_paragraph(tallies),
                chart_cell,
            ]);
            self.push_table(Table::new(vec![overview_row]).set_grid(vec![HALF_COL, HALF_COL]));
            self.push(Paragraph::new());
        }

        if toggles.table {
            for status in LISTING_ORDER {
                if !self.config.info.get(status).tests || summary.counts.get(status) == 0 {
                    continue;
                }
                let rows = entries
                    .iter()
                    .filter(|entry| entry.result.status == status)
                    .map(|entry| {
                        TableRow::new(vec![
                            cell_with(Run::new().add_text(&entry.name), WIDE_COL),
                            cell_with(
                                Run::new().add_text(status.as_str()).color(status.color_hex()),
                                NARROW_COL,
                            ),
                        ])
                    })
                    .collect();
                self.push_table(Table::new(rows).set_grid(vec![WIDE_COL, NARROW_COL]));
                self.push(Paragraph::new());
            }
        }

        self.page_break();
    }

    fn render_test(&mut self, entry: &TestEntry) {
        let status = entry.result.status;
        let flags = *self.config.info.get(status);

        self.push(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(format!("{}  [ {} ]", entry.name, status.as_str()))
                        .color(status.color_hex()),
                )
                .style("Heading1")
                .page_break_before(true),
        );

        self.render_label_table(entry, &flags);

        if flags.description {
            if let Some(description) = entry.result.description.as_deref() {
                if !description.is_empty() {
                    self.heading2("Description");
                    self.push(Paragraph::new().add_run(multiline_run(description)));
                }
            }
        }

        if flags.parameters && !entry.result.parameters.is_empty() {
            self.heading2("Parameters");
            for parameter in &entry.result.parameters {
                self.push(
                    Paragraph::new()
                        .add_run(
                            Run::new()
                                .add_text(format!("{}: {}", parameter.name, parameter.value)),
                        )
                        .style("Step"),
                );
            }
        }

        if flags.details {
            if let Some(details) = &entry.result.status_details {
                let message = details.message_text();
                let trace = details.trace_text().filter(|_| flags.trace);
                if message.is_some() || trace.is_some() {
                    self.heading2("Details");
                    if let Some(message) = message {
                        let style = if status.is_bad() { "StepFailed" } else { "Step" };
                        self.push(
                            Paragraph::new().add_run(multiline_run(message)).style(style),
                        );
                    }
                    if let Some(trace) = trace {
                        self.push_trace(trace);
                    }
                }
            }
        }

        if flags.links && !entry.result.links.is_empty() {
            self.heading2("Links");
            for link in &entry.result.links {
                match (link.name.as_deref(), link.url.as_deref()) {
                    (Some(name), Some(url)) => {
                        self.push(
                            Paragraph::new()
                                .add_run(Run::new().add_text(format!("{name}: {url}"))),
                        );
                    }
                    _ => {
                        log::warn!(
                            "a link of test `{}` is missing its name or url, skipping",
                            entry.name
                        );
                    }
                }
            }
        }

        if flags.setup && entry.parents.iter().any(|parent| !parent.befores.is_empty()) {
            self.heading2("Test Setup");
            for parent in &entry.parents {
                for fixture in &parent.befores {
                    self.render_fixture(fixture, &flags);
                }
            }
        }

        if flags.body {
            let has_steps = flags.steps && !entry.result.steps.is_empty();
            let has_attachments = flags.attachments && !entry.result.attachments.is_empty();
            if has_steps || has_attachments {
                self.heading2("Test Body");
                if flags.steps {
                    self.render_steps(&entry.result.steps, &flags, 0);
                }
                if flags.attachments {
                    self.render_attachments(&entry.result.attachments, 0);
                }
            }
        }

        if flags.teardown && entry.parents.iter().any(|parent| !parent.afters.is_empty()) {
            self.heading2("Test Teardown");
            for parent in &entry.parents {
                for fixture in &parent.afters {
                    self.render_fixture(fixture, &flags);
                }
            }
        }

        self.push(Paragraph::new());
    }

    /// The duration row plus one row per configured label, matched
    /// case-insensitively against the test's labels. A label with several
    /// values gets one paragraph per value in its cell.
    fn render_label_table(&mut self, entry: &TestEntry, flags: &InfoFlags) {
        let mut rows = Vec::new();

        if flags.duration {
            if let Some(ms) = entry.result.duration_ms() {
                rows.push(TableRow::new(vec![
                    cell_with(Run::new().add_text("Duration"), NARROW_COL),
                    cell_with(Run::new().add_text(format_duration(ms)), WIDE_COL),
                ]));
            }
        }

        for label_name in self.config.labels.get(entry.result.status) {
            let values: Vec<&str> = entry
                .result
                .labels
                .iter()
                .filter(|label| label.name.eq_ignore_ascii_case(label_name))
                .map(|label| label.value.as_str())
                .collect();
            if values.is_empty() {
                continue;
            }
            let mut value_cell = TableCell::new().width(WIDE_COL, WidthType::Dxa);
            for value in values {
                value_cell =
                    value_cell.add_paragraph(Paragraph::new().add_run(Run::new().add_text(value)));
            }
            rows.push(TableRow::new(vec![
                cell_with(Run::new().add_text(capitalize(label_name)), NARROW_COL),
                value_cell,
            ]));
        }

        if !rows.is_empty() {
            self.push_table(Table::new(rows).set_grid(vec![NARROW_COL, WIDE_COL]));
            self.push(Paragraph::new());
        }
    }

    fn render_fixture(&mut self, fixture: &StepNode, flags: &InfoFlags) {
        self.push(
            Paragraph::new()
                .add_run(Run::new().add_text(format!("[Fixture] {}", fixture.name)))
                .style("Step"),
        );
        if flags.steps {
            self.render_steps(&fixture.steps, flags, 1);
        }
        if flags.attachments {
            self.render_attachments(&fixture.attachments, 1);
        }
    }

    fn render_steps(&mut self, steps: &[StepNode], flags: &InfoFlags, indent: usize) {
        let indent_str = " ".repeat(indent * INDENT);
        for step in steps {
            let style = if step.status.is_bad() { "StepFailed" } else { "Step" };
            self.push(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("{indent_str}> {}", step.name)))
                    .style(style),
            );

            if flags.parameters {
                for parameter in &step.parameters {
                    self.push(
                        Paragraph::new()
                            .add_run(Run::new().add_text(format!(
                                "{indent_str}    {} = {}",
                                parameter.name,
                                format_argval(&parameter.value)
                            )))
                            .style("Step"),
                    );
                }
            }

            if flags.details {
                if let Some(details) = &step.status_details {
                    if let Some(message) = details.message_text() {
                        self.push(
                            Paragraph::new().add_run(multiline_run(message)).style(style),
                        );
                    }
                    if flags.trace {
                        if let Some(trace) = details.trace_text() {
                            self.push_trace(trace);
                        }
                    }
                }
            }

            self.render_steps(&step.steps, flags, indent + 1);

            if flags.attachments {
                self.render_attachments(&step.attachments, indent);
            }
        }
    }

    /// Attachment paragraphs, with image attachments embedded. A missing or
    /// unreadable attachment file is logged and skipped, never fatal.
    fn render_attachments(&mut self, attachments: &[Attachment], indent: usize) {
        let indent_str = " ".repeat(indent * INDENT);
        for attachment in attachments {
            let name = attachment.name.as_deref().unwrap_or("");
            self.push(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("{indent_str}[Attachment] {name}")))
                    .style("Step"),
            );

            let is_image = attachment
                .mime_type
                .as_deref()
                .is_some_and(|mime| mime.contains("image"));
            if !is_image {
                continue;
            }

            let path = self.allure_dir.join(&attachment.source);
            match fs::read(&path) {
                Ok(bytes) => {
                    let pic = scaled_pic(&bytes, Some(ATTACHMENT_WIDTH), None);
                    self.push(Paragraph::new().add_run(Run::new().add_image(pic)));
                }
                Err(e) => {
                    log::warn!("skipping attachment {}: {e}", path.display());
                }
            }
        }
    }

    // --- primitives ---

    fn push(&mut self, paragraph: Paragraph) {
        self.docx = mem::take(&mut self.docx).add_paragraph(paragraph);
    }

    fn push_table(&mut self, table: Table) {
        self.docx = mem::take(&mut self.docx).add_table(table);
    }

    fn heading1(&mut self, text: &str) {
        self.push(
            Paragraph::new()
                .add_run(Run::new().add_text(text))
                .style("Heading1"),
        );
    }

    fn heading2(&mut self, text: &str) {
        self.push(
            Paragraph::new()
                .add_run(Run::new().add_text(text))
                .style("Heading2"),
        );
    }

    fn page_break(&mut self) {
        self.push(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
    }

    /// A one-cell table holding a monospaced stack trace.
    fn push_trace(&mut self, trace: &str) {
        let code = multiline_run(trace).fonts(RunFonts::new().ascii("Courier New")).size(16);
        let row = TableRow::new(vec![TableCell::new()
            .width(NARROW_COL + WIDE_COL, WidthType::Dxa)
            .add_paragraph(Paragraph::new().add_run(code))]);
        self.push_table(Table::new(vec![row]).set_grid(vec![NARROW_COL + WIDE_COL]));
        self.push(Paragraph::new());
    }

    fn cover_subtitle(&self) -> String {
        let mut subtitle = self.config.cover.title.clone().unwrap_or_default();
        if let Some(device) = self.device_under_test() {
            if !subtitle.is_empty() {
                subtitle.push('\n');
            }
            subtitle.push_str(device);
        }
        subtitle
    }

    fn device_under_test(&self) -> Option<&str> {
        self.config
            .details
            .iter()
            .find(|(key, _)| key.trim_start_matches('*') == "Device under test")
            .map(|(_, value)| value.as_str())
    }
}

/// Document skeleton: styles shared by all sections plus the running header
/// (report title and device under test) and footer (generation date) on every
/// page after the cover.
fn base_document(config: &ReportConfig) -> Docx {
    let mut docx = Docx::new()
        .add_style(Style::new("Title", StyleType::Paragraph).name("Title").size(56).bold())
        .add_style(
            Style::new("Subtitle", StyleType::Paragraph)
                .name("Subtitle")
                .size(32)
                .color("666666"),
        )
        .add_style(
            Style::new("Company", StyleType::Paragraph)
                .name("Company")
                .size(28)
                .italic()
                .color("444444"),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_style(Style::new("Step", StyleType::Paragraph).name("Step").size(20))
        .add_style(
            Style::new("StepFailed", StyleType::Paragraph)
                .name("Step Failed")
                .size(20)
                .color("FD5A3E"),
        );

    let mut header_text = config.cover.title.clone().unwrap_or_default();
    if let Some((_, device)) = config
        .details
        .iter()
        .find(|(key, _)| key.trim_start_matches('*') == "Device under test")
    {
        if !header_text.is_empty() {
            header_text.push('\n');
        }
        header_text.push_str(device);
    }
    if !header_text.is_empty() {
        docx = docx
            .header(
                Header::new().add_paragraph(
                    Paragraph::new().add_run(multiline_run(&header_text)).style("Step"),
                ),
            )
            .first_header(Header::new());
    }

    docx.footer(
        Footer::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(Local::now().format("%Y-%m-%d").to_string()))
                .style("Step")
                .align(AlignmentType::Right),
        ),
    )
    .first_footer(Footer::new())
}

/// A run whose newlines become soft line breaks. DOCX runs do not render
/// embedded `\n` characters.
fn multiline_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

/// Builds an embedded picture scaled to the requested width or height,
/// keeping the aspect ratio when the PNG dimensions are readable.
fn scaled_pic(bytes: &[u8], width_emu: Option<u32>, height_emu: Option<u32>) -> Pic {
    let pic = Pic::new(bytes);
    let (target_w, target_h) = match (png_dimensions(bytes), width_emu, height_emu) {
        (Some((w, h)), Some(width), _) if w > 0 => {
            (width, (width as u64 * h as u64 / w as u64) as u32)
        }
        (Some((w, h)), None, Some(height)) if h > 0 => {
            ((height as u64 * w as u64 / h as u64) as u32, height)
        }
        // Unknown aspect ratio: fall back to a 4:3 box.
        (None, Some(width), _) => (width, width / 4 * 3),
        (None, None, Some(height)) => (height / 3 * 4, height),
        _ => return pic,
    };
    pic.size(target_w, target_h)
}

/// Reads the dimensions out of a PNG IHDR chunk, if `bytes` are a PNG.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || &bytes[..8] != b"\x89PNG\r\n\x1a\n" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}

/// Remove newlines and limit the rendered length of a parameter value, the
/// way the Allure pytest logger formats arguments.
fn format_argval(value: &str) -> String {
    const MAX_ARG_LENGTH: usize = 100;
    let value = value.replace('\n', " ");
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > MAX_ARG_LENGTH {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - MAX_ARG_LENGTH..].iter().collect();
        format!("{head} ... {tail}")
    } else {
        value
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn cell_with(run: Run, width: usize) -> TableCell {
    TableCell::new()
        .width(width, WidthType::Dxa)
        .add_paragraph(Paragraph::new().add_run(run))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argval_is_flattened_and_truncated() {
        assert_eq!(format_argval("a\nb"), "a b");
        let long: String = "x".repeat(150);
        let formatted = format_argval(&long);
        assert!(formatted.starts_with("xxx ... "));
        assert_eq!(formatted.chars().count(), 3 + 5 + 100);
    }

    #[test]
    fn png_dimensions_require_a_png_signature() {
        assert_eq!(png_dimensions(b"not a png at all, promise"), None);
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&640u32.to_be_bytes());
        bytes.extend_from_slice(&480u32.to_be_bytes());
        assert_eq!(png_dimensions(&bytes), Some((640, 480)));
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("severity"), "Severity");
        assert_eq!(capitalize(""), "");
    }
}
