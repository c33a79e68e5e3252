/// Cell-level helpers shared by the sheet extractors
use calamine::{Data, Range};

use crate::models::CellValue;

/// True when every cell is empty or a blank string
pub fn is_row_empty(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Trimmed textual form of a key cell (post ID, account name, icon path)
///
/// Whole-number floats drop their fraction so numeric post IDs read the same as
/// when they were stored as text.
pub fn cell_text(cell: Option<&Data>) -> Option<String> {
    let text = match cell? {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{f:.0}"),
        other => CellValue::from_cell(other)?.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Build a worksheet range from materialized rows
///
/// Short rows are padded with empty cells.
pub fn range_from_rows(rows: Vec<Vec<Data>>) -> Range<Data> {
    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Range::empty();
    }

    let mut range = Range::new((0, 0), ((height - 1) as u32, (width - 1) as u32));
    for (row_idx, row) in rows.into_iter().enumerate() {
        for (col_idx, cell) in row.into_iter().enumerate() {
            range.set_value((row_idx as u32, col_idx as u32), cell);
        }
    }
    range
}
