/// Header row → column index mapping
use calamine::Data;
use std::collections::BTreeMap;

use crate::models::CellValue;

static EMPTY_CELL: Data = Data::Empty;

/// Named columns of a sheet in their original order
///
/// Columns whose header is blank are dropped. Names are kept verbatim, so a
/// header with surrounding spaces stays distinct from the trimmed vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    columns: Vec<(String, usize)>,
}

impl HeaderMap {
    pub fn from_row(row: &[Data]) -> Self {
        let columns = row
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                let name = match cell {
                    Data::String(s) => s.clone(),
                    Data::Empty => return None,
                    other => CellValue::from_cell(other)?.to_string(),
                };
                if name.trim().is_empty() {
                    None
                } else {
                    Some((name, index))
                }
            })
            .collect();

        Self { columns }
    }

    /// Index of the first column called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, index)| *index)
    }

    /// Header at a column position
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.columns
            .iter()
            .find(|(_, i)| *i == index)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.columns.iter().map(|(name, index)| (name.as_str(), *index))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cells of `row` keyed by header; for duplicate headers the right-most column wins
    pub fn project<'h, 'r>(&'h self, row: &'r [Data]) -> BTreeMap<&'h str, &'r Data> {
        let mut fields = BTreeMap::new();
        for (name, index) in self.iter() {
            fields.insert(name, row.get(index).unwrap_or(&EMPTY_CELL));
        }
        fields
    }
}
