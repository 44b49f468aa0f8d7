//! In-memory spreadsheet tables built from CSV exports.
//!
//! Every cell is kept as text; an empty string stands for an empty cell.

/// One sheet: header row plus data rows padded to the header width
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV text exported from a spreadsheet.
    ///
    /// Strips a UTF-8 BOM, sniffs the delimiter from the header line,
    /// tolerates ragged records and skips rows where every cell is empty.
    /// A flexible reader over a `&str` has no failing input (no I/O, valid
    /// UTF-8, any record length), so parsing never fails.
    pub fn from_csv(name: &str, csv_text: &str) -> Self {
        let text = csv_text.trim_start_matches('\u{FEFF}');
        let delimiter = sniff_delimiter(text);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map(|record| record.iter().map(|h| h.trim().to_string()).collect())
            .unwrap_or_default();

        let mut rows = Vec::new();
        for record in reader.records().flatten() {
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            let mut row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }

        tracing::debug!(
            "Parsed sheet '{}': {} columns, {} rows (delimiter {:?})",
            name,
            headers.len(),
            rows.len(),
            delimiter as char
        );

        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cell of a row by optional column index; missing column or cell reads as empty
pub fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(|v| v.as_str())
        .unwrap_or("")
}

/// Ordered sheets of one uploaded workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Table>,
}

impl Workbook {
    pub fn new(sheets: Vec<Table>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Pick the delimiter occurring most often in the header line (outside quotes)
fn sniff_delimiter(text: &str) -> u8 {
    let header_line = text.lines().next().unwrap_or("");
    let mut in_quotes = false;
    let mut counts = [(b',', 0usize), (b';', 0usize), (b'\t', 0usize)];

    for ch in header_line.bytes() {
        if ch == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        for (delimiter, count) in counts.iter_mut() {
            if ch == *delimiter {
                *count += 1;
            }
        }
    }

    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(delimiter, _)| *delimiter)
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_strips_bom_and_trims_headers() {
        let table = Table::from_csv("orders", "\u{FEFF} SKU , Qty\nA,1\n");
        assert_eq!(table.headers, vec!["SKU", "Qty"]);
        assert_eq!(table.rows, vec![vec!["A".to_string(), "1".to_string()]]);
    }

    #[test]
    fn test_from_csv_semicolon_export() {
        let text = "No. Pesanan;SKU Induk;Jumlah\n\"2401;X\";KIT-1;3,5\n";
        let table = Table::from_csv("shopee", text);
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows[0][0], "2401;X");
        assert_eq!(table.rows[0][2], "3,5");
    }

    #[test]
    fn test_from_csv_pads_short_rows_and_skips_blank_rows() {
        let text = "a,b,c\n1\n,,\n4,5,6\n";
        let table = Table::from_csv("t", text);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_from_csv_accepts_any_record_shape() {
        let text = "a,b\n1,2,3,4\n5\n";
        let table = Table::from_csv("ragged", text);
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["1", "2", "3", "4"]);
        assert_eq!(table.rows[1], vec!["5", ""]);

        let empty = Table::from_csv("empty", "");
        assert!(empty.headers.is_empty());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let row = vec!["x".to_string()];
        assert_eq!(cell(&row, Some(0)), "x");
        assert_eq!(cell(&row, Some(3)), "");
        assert_eq!(cell(&row, None), "");
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("\"a,b\";c;d"), b';');
        assert_eq!(sniff_delimiter("single"), b',');
    }
}
