//! Splits the flat order export into practice groups.
//!
//! Column 0 is sparse: a non-empty value starts a new practice, and every
//! following row with an empty column 0 belongs to it.

use std::collections::HashMap;

use tracing::warn;

use crate::filter::should_keep;
use crate::sheet::SourceSheet;
use crate::window::DateWindow;

pub const COLUMN_COUNT: usize = 8;
pub const GROUP_INDEX: usize = 0;
pub const DOB_INDEX: usize = 2;
pub const EXPIRE_DATE_INDEX: usize = 5;
/// Source row holding the column headings.
pub const HEADER_ROW: usize = 1;
pub const FIRST_DATA_ROW: usize = 2;

/// The eight text cells of one order row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRow {
    cells: [String; COLUMN_COUNT],
}

impl SourceRow {
    pub fn new(cells: [String; COLUMN_COUNT]) -> Self {
        Self { cells }
    }

    pub fn read<S: SourceSheet + ?Sized>(sheet: &S, row: usize) -> Self {
        Self::new(std::array::from_fn(|col| sheet.cell_text(row, col)))
    }

    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }

    pub fn dob(&self) -> &str {
        &self.cells[DOB_INDEX]
    }

    pub fn expiration(&self) -> &str {
        &self.cells[EXPIRE_DATE_INDEX]
    }
}

pub fn read_header<S: SourceSheet + ?Sized>(sheet: &S) -> SourceRow {
    SourceRow::read(sheet, HEADER_ROW)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub rows: Vec<SourceRow>,
}

/// Practice groups in first-seen order. Groups whose rows were all filtered
/// out are still present, with no rows.
#[derive(Debug, Clone, Default)]
pub struct GroupedRows {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupedRows {
    fn entry(&mut self, name: &str) -> &mut Group {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.groups.push(Group {
                    name: name.to_string(),
                    rows: Vec::new(),
                });
                self.index.insert(name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.index.get(name).map(|&idx| &self.groups[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Groups that will appear in the report.
    pub fn non_empty(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.rows.is_empty())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

/// Accumulator threaded through the row scan.
#[derive(Default)]
struct Scan {
    current: Option<String>,
    groups: GroupedRows,
}

impl Scan {
    fn step<S: SourceSheet + ?Sized>(mut self, sheet: &S, row: usize, window: &DateWindow) -> Self {
        let marker = sheet.cell_text(row, GROUP_INDEX);
        if !marker.is_empty() {
            self.groups.entry(&marker);
            self.current = Some(marker);
            return self;
        }

        let record = SourceRow::read(sheet, row);
        if !should_keep(Some(record.expiration()), window) {
            return self;
        }

        let group = match self.current.as_deref() {
            Some(name) => name,
            None => {
                warn!(row, "Order row appears before any practice header, filing it under an unnamed practice");
                ""
            }
        };
        self.groups.entry(group).rows.push(record);
        self
    }
}

/// Scans every row after the headers and keeps the ones expiring inside
/// `window`, grouped under their practice.
pub fn extract_groups<S: SourceSheet + ?Sized>(sheet: &S, window: &DateWindow) -> GroupedRows {
    (FIRST_DATA_ROW..sheet.row_count())
        .fold(Scan::default(), |scan, row| scan.step(sheet, row, window))
        .groups
}
