//! Company domain list input.
//!
//! Domains come from a spreadsheet with a header row. Only the configured
//! domain column matters; every other column is ignored.

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use thiserror::Error;

/// Errors reading the domain list.
#[derive(Debug, Error)]
pub enum DomainSourceError {
    #[error("Failed to open spreadsheet {path}: {source}")]
    Open {
        path: PathBuf,
        source: calamine::XlsxError,
    },
    #[error("Spreadsheet has no sheets")]
    NoSheets,
    #[error("Failed to read sheet: {0}")]
    Sheet(#[from] calamine::XlsxError),
}

/// Read domain keys from the first sheet of a spreadsheet.
///
/// The first row is the header. Cells under the `column` header are
/// collected in row order, trimmed, prefixed with `prefix`, and returned.
/// Rows with an empty or missing cell are dropped. A spreadsheet without
/// the named column yields an empty list; only an unreadable file is an
/// error.
pub fn read_domains(
    path: &Path,
    column: &str,
    prefix: &str,
) -> Result<Vec<String>, DomainSourceError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| DomainSourceError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DomainSourceError::NoSheets)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let Some(column_idx) = header.iter().position(|cell| cell_text(cell).as_deref() == Some(column))
    else {
        tracing::warn!(
            "Spreadsheet {} has no '{}' column; nothing to generate",
            path.display(),
            column
        );
        return Ok(Vec::new());
    };

    let domains = rows
        .filter_map(|row| row.get(column_idx).and_then(cell_text))
        .map(|domain| format!("{}{}", prefix, domain))
        .collect();

    Ok(domains)
}

/// Text content of a cell, trimmed. Numeric cells are rendered as text so
/// a digits-only domain still comes through. Empty cells yield `None`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
