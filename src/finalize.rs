// src/finalize.rs
use std::fs;
use std::path::Path;

use encoding_rs::BIG5;
use rust_xlsxwriter::Workbook;
use tracing::{debug, info, warn};

use crate::config::consts::SHEET_NAME;
use crate::config::options::DecodePolicy;
use crate::csv::{max_columns, parse_rows};
use crate::error::FinalizeError;
use crate::file::{intermediate_path, remove_if_exists, staging_path};

/// What one conversion produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub rows: usize,
    pub columns: usize,
    /// Undecodable bytes were dropped (lenient policy only).
    pub malformed: bool,
}

/// Decode CP950 bytes. `encoding_rs` Big5 is the WHATWG superset of CP950.
/// Returns the text and whether anything had to be dropped.
pub fn decode_cp950(bytes: &[u8]) -> (String, bool) {
    let (text, had_errors) = BIG5.decode_without_bom_handling(bytes);
    if had_errors {
        (text.replace('\u{FFFD}', ""), true)
    } else {
        (text.into_owned(), false)
    }
}

/// Sheet coordinates for a zero-based row/column pair.
pub fn cell_index(row: usize, column: usize) -> Result<(u32, u16), FinalizeError> {
    match (u32::try_from(row), u16::try_from(column)) {
        (Ok(r), Ok(c)) => Ok((r, c)),
        _ => Err(FinalizeError::CellOutOfRange { row, column }),
    }
}

/// Write `rows` as literal strings into a one-sheet workbook at `path`.
pub fn write_sheet(path: &Path, rows: &[Vec<String>]) -> Result<(), FinalizeError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = cell_index(r, c)?;
            sheet.write_string(r, c, cell.as_str())?;
        }
    }
    workbook.save(path)?;
    Ok(())
}

/// Promote a raw CSV export to its final `.xlsx`.
///
/// Any existing `final_path` is replaced. The raw file is first renamed to
/// `<final stem>.csv`, converted, and deleted once the workbook is in place.
/// The workbook is built under `<final>.tmp` and renamed, so `final_path`
/// is either complete or absent.
pub fn finalize(raw_path: &Path, final_path: &Path, policy: DecodePolicy) -> Result<Conversion, FinalizeError> {
    if remove_if_exists(final_path)? {
        info!("Finalize: replacing existing {}", final_path.display());
    }

    let intermediate = intermediate_path(final_path);
    if raw_path != intermediate {
        fs::rename(raw_path, &intermediate)?;
    }

    let bytes = fs::read(&intermediate)?;
    let (text, malformed) = decode_cp950(&bytes);
    if malformed && policy == DecodePolicy::Strict {
        return Err(FinalizeError::Encoding { path: intermediate });
    }

    let rows = parse_rows(&text, ',');
    let staged = staging_path(final_path);
    let written = write_sheet(&staged, &rows)
        .and_then(|()| fs::rename(&staged, final_path).map_err(FinalizeError::from));
    if let Err(e) = written {
        if let Err(ce) = remove_if_exists(&staged) {
            warn!("Finalize: could not remove {}: {ce}", staged.display());
        }
        return Err(e);
    }

    fs::remove_file(&intermediate)?;
    debug!("Finalize: {} rows → {}", rows.len(), final_path.display());

    Ok(Conversion {
        rows: rows.len(),
        columns: max_columns(&rows),
        malformed,
    })
}
