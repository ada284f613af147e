//! CSV export of the projected close series.
//!
//! Layout: header `Date,Close`, then one `YYYY-MM-DD,<close>` row per point.
//! Writes are atomic (write to a uniquely named temp file in the destination
//! directory, persist it over the target), so the destination is either the
//! complete new file or whatever was there before.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::data::frame::{ClosePoint, CLOSE_COLUMNS};
use crate::data::DataError;

/// Rows shown by [`render_preview`] when printing a run summary.
pub const PREVIEW_ROWS: usize = 5;

/// Write `points` to `path` as CSV, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn write_close_csv(path: &Path, points: &[ClosePoint]) -> Result<usize, DataError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Dropped (and removed) on any early return below.
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| DataError::ExportError(format!("temp file in {}: {e}", dir.display())))?;

    {
        let map_err = |e: csv::Error| DataError::ExportError(format!("{}: {e}", path.display()));

        let mut wtr = csv::Writer::from_writer(tmp.as_file_mut());
        wtr.write_record(CLOSE_COLUMNS).map_err(map_err)?;
        for p in points {
            wtr.write_record([p.date.to_string(), p.close.to_string()])
                .map_err(map_err)?;
        }
        wtr.flush()
            .map_err(|e| DataError::ExportError(format!("flush {}: {e}", path.display())))?;
    }

    tmp.persist(path).map_err(|e| {
        DataError::ExportError(format!("atomic rename to {} failed: {}", path.display(), e.error))
    })?;

    debug!(path = %path.display(), rows = points.len(), "csv written");
    Ok(points.len())
}

/// Format the first `n` points as a small aligned table, one line per row,
/// preceded by a header line.
pub fn render_preview(points: &[ClosePoint], n: usize) -> String {
    let shown = &points[..n.min(points.len())];

    let closes: Vec<String> = shown.iter().map(|p| p.close.to_string()).collect();
    let idx_width = shown.len().saturating_sub(1).to_string().len();
    let close_width = closes
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Close".len());

    let mut out = format!(
        "{:idx_width$}  {:>10}  {:>close_width$}\n",
        "", "Date", "Close"
    );
    for (i, (p, close)) in shown.iter().zip(&closes).enumerate() {
        out.push_str(&format!(
            "{i:<idx_width$}  {:>10}  {close:>close_width$}\n",
            p.date.to_string()
        ));
    }
    out
}
