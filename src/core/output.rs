//! Rendering for the `view` and `list-availables` surfaces.

use crate::core::array::HandleArray;
use crate::core::error::SvcError;
use crate::core::service::ServiceList;
use std::ffi::OsString;
use std::path::Path;

const HEADERS: [&str; 5] = ["PID", "NAME", "STATUS", "DOWN", "TIME"];
const SEPARATOR: &str = "  ";

/// Column-aligned status table. Every column is as wide as its widest cell.
pub fn render_table(list: &ServiceList) -> String {
    let rows: Vec<[String; 5]> = list
        .iter()
        .map(|s| {
            [
                s.pid().to_string(),
                s.name().to_string(),
                s.status().to_string(),
                if s.is_down() { "yes" } else { "no" }.to_string(),
                s.elapsed().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    let ruler: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&ruler.join(SEPARATOR));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell.as_ref(), width = *w))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    out.push_str(&line);
    out.push('\n');
}

pub fn render_json(list: &ServiceList) -> Result<String, SvcError> {
    Ok(serde_json::to_string_pretty(list)?)
}

/// One `<root>/<name>` line per available service.
pub fn render_available(root: &Path, names: &HandleArray<OsString>) -> String {
    names
        .iter()
        .map(|n| format!("{}\n", root.join(n).display()))
        .collect()
}
