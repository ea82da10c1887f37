//! Terminal output: notes, tables, and report rendering.

use menuscan_core::TextEntry;
use menuscan_understanding::{MenuAnalysis, ScanReport};

// ---------------------------------------------------------------------------
// ANSI helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Visible width in characters; Hangul and other wide glyphs count as one.
fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

/// Errors go to stderr.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left }
    }
    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right }
    }
}

/// Render a table with given columns and rows. Missing cells render blank.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| visible_width(&c.header)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(visible_width(cell));
        }
    }

    let render_row = |cells: Vec<String>| format!("  {}\n", cells.join("  ").trim_end());

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| pad_cell(&col.header, *w, &col.align))
        .collect();
    out.push_str(&render_row(header));
    out.push_str(&render_row(widths.iter().map(|w| "-".repeat(*w)).collect()));

    for row in rows {
        let cells = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, w))| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad_cell(cell, *w, &col.align)
            })
            .collect();
        out.push_str(&render_row(cells));
    }
    out
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = " ".repeat(width.saturating_sub(visible_width(s)));
    match align {
        Align::Left => format!("{s}{pad}"),
        Align::Right => format!("{pad}{s}"),
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn format_quad(entry: &TextEntry) -> String {
    match &entry.quad {
        Some(quad) => quad
            .points()
            .iter()
            .map(|p| format!("({},{})", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" "),
        None => "-".to_string(),
    }
}

/// Extracted lines with their boxes, one row per entry.
pub fn render_scan(report: &ScanReport) -> String {
    let mut out = format!("{} ({})\n\n", display_name(&report.file_name), report.file_size);
    if report.lines.is_empty() {
        out.push_str("  (no text found)\n");
        return out;
    }

    let rows: Vec<Vec<String>> = report
        .lines
        .iter()
        .enumerate()
        .map(|(i, entry)| vec![(i + 1).to_string(), entry.text.clone(), format_quad(entry)])
        .collect();

    out.push_str(&render_table(
        &[Column::right("#"), Column::left("Text"), Column::left("Box")],
        &rows,
    ));
    out
}

/// Menu items as a numbered list, followed by the analysis message.
pub fn render_menu(analysis: &MenuAnalysis) -> String {
    let mut out = format!(
        "{} ({}), {} lines extracted\n\n",
        display_name(&analysis.file_name),
        analysis.file_size,
        analysis.extracted_texts.len()
    );
    for (i, item) in analysis.menu_items.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {item}\n", i + 1));
    }
    if !analysis.menu_items.is_empty() {
        out.push('\n');
    }
    out.push_str(&analysis.message);
    out.push('\n');
    out
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "(unnamed image)" } else { name }
}
