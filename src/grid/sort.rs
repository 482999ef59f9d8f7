use std::cmp::Ordering;

use crate::core::TermRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Content,
    ForgotCounter,
    StartDate,
    NextDate,
    Status,
}

impl Column {
    pub const ALL: [Column; 5] =
        [Column::Content, Column::ForgotCounter, Column::StartDate, Column::NextDate, Column::Status];

    /// Field name used by the backend JSON.
    pub fn key(self) -> &'static str {
        match self {
            Column::Content => "content",
            Column::ForgotCounter => "forgot_counter",
            Column::StartDate => "sdate",
            Column::NextDate => "ndate",
            Column::Status => "status",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Content => "Term",
            Column::ForgotCounter => "Times forgot",
            Column::StartDate => "Start date",
            Column::NextDate => "Next notification",
            Column::Status => "Status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.key() == key)
    }

    pub fn value(self, record: &TermRecord) -> CellValue<'_> {
        match self {
            Column::Content => CellValue::Text(&record.content),
            Column::ForgotCounter => CellValue::Int(i64::from(record.forgot_counter)),
            Column::StartDate => CellValue::Int(record.sdate),
            Column::NextDate => CellValue::Int(record.ndate),
            Column::Status => CellValue::Text(&record.status),
        }
    }
}

/// A cell's native value. Columns are typed once at ingestion, so two cells of the
/// same column always hold the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue<'a> {
    Int(i64),
    Text(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "⬆",
            SortDirection::Descending => "⬇",
        }
    }
}

pub fn compare(left: &TermRecord, right: &TermRecord, column: Column) -> Ordering {
    column.value(left).cmp(&column.value(right))
}

/// Stable: indices whose records compare equal keep their relative order.
pub fn sort_indices(
    indices: &mut [usize],
    records: &[TermRecord],
    column: Column,
    direction: SortDirection,
) {
    indices.sort_by(|&lhs, &rhs| {
        let ordering = compare(&records[lhs], &records[rhs], column);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content: &str, forgot_counter: u32) -> TermRecord {
        TermRecord {
            content: content.to_string(),
            forgot_counter,
            sdate: 0,
            ndate: 0,
            status: "active".to_string(),
            fdate: 0,
        }
    }

    #[test]
    fn test_numeric_column_compares_numerically() {
        // "10" < "9" as strings, but not as numbers
        let nine = record("9", 9);
        let ten = record("10", 10);
        assert_eq!(compare(&nine, &ten, Column::ForgotCounter), Ordering::Less);
        assert_eq!(compare(&ten, &nine, Column::Content), Ordering::Less);
    }

    #[test]
    fn test_sort_indices_is_stable_in_both_directions() {
        let records = vec![record("a", 1), record("b", 0), record("c", 1), record("d", 0)];

        let mut ascending: Vec<usize> = (0..records.len()).collect();
        sort_indices(&mut ascending, &records, Column::ForgotCounter, SortDirection::Ascending);
        assert_eq!(ascending, vec![1, 3, 0, 2]);

        let mut descending: Vec<usize> = (0..records.len()).collect();
        sort_indices(&mut descending, &records, Column::ForgotCounter, SortDirection::Descending);
        assert_eq!(descending, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_column_keys_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_key(column.key()), Some(column));
        }
        assert_eq!(Column::from_key("fdate"), None);
    }
}
