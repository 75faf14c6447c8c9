//! Output formatting for command results.

use std::path::Path;

use runarchive_durability::{ArtifactOutcome, BatchReport, RunContext, RunEntry};
use runarchive_wire::CsvTable;
use serde_json::json;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn format_batch(ctx: &RunContext, report: &BatchReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => report
            .outcomes()
            .iter()
            .map(|outcome| match outcome {
                ArtifactOutcome::Saved(s) => format!("Saved CSV: {}", s.path.display()),
                ArtifactOutcome::Failed(f) => format!("(error) {}: {}", f.name, f.error),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Json => {
            let saved: Vec<_> = report
                .saved()
                .map(|s| {
                    json!({
                        "name": s.name,
                        "path": s.path.display().to_string(),
                        "rows": s.rows,
                    })
                })
                .collect();
            let failed: Vec<_> = report
                .failures()
                .map(|f| json!({ "name": f.name, "error": f.error.to_string() }))
                .collect();
            json!({
                "run_directory": ctx.run_directory().display().to_string(),
                "timestamp": ctx.timestamp().to_string(),
                "saved": saved,
                "failed": failed,
            })
            .to_string()
        }
    }
}

pub fn format_runs(runs: &[RunEntry], mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            if runs.is_empty() {
                return "(empty)".to_string();
            }
            runs.iter()
                .map(|r| format!("{}  {}", r.timestamp, r.path.display()))
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputMode::Json => {
            let items: Vec<_> = runs
                .iter()
                .map(|r| {
                    json!({
                        "timestamp": r.timestamp.to_string(),
                        "path": r.path.display().to_string(),
                    })
                })
                .collect();
            serde_json::Value::Array(items).to_string()
        }
    }
}

pub fn format_table(path: &Path, table: &CsvTable, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => render_aligned(table),
        OutputMode::Json => json!({
            "path": path.display().to_string(),
            "header": table.header,
            "rows": table.rows,
        })
        .to_string(),
    }
}

pub fn format_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}", message),
        OutputMode::Json => json!({ "error": message }).to_string(),
    }
}

/// Columns padded to their widest cell, header separated by a rule.
fn render_aligned(table: &CsvTable) -> String {
    if table.header.is_empty() {
        return "(empty)".to_string();
    }

    let mut widths: Vec<usize> = table.header.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = *w)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(table.header.as_slice())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(table.rows.iter().map(|row| render_row(row.as_slice())));
    lines.join("\n")
}
