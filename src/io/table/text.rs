use std::io::BufRead;

use crate::io::{Error, TableFormat};
use crate::model::table::{DuplicatePolicy, ElementTable, TableError};

struct Row {
    line: usize,
    symbol: String,
    number: u32,
}

pub fn read<R: BufRead>(reader: R, policy: DuplicatePolicy) -> Result<ElementTable, Error> {
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        let ln = i + 1;

        let data = strip_comment(&content).trim();
        if data.is_empty() {
            continue;
        }

        let mut fields = data.split_whitespace();
        let (Some(symbol), Some(number), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::parse(
                TableFormat::Text,
                ln,
                "expected two columns: symbol and atomic number",
            ));
        };

        let number = number.parse::<u32>().map_err(|_| {
            Error::parse(
                TableFormat::Text,
                ln,
                format!("invalid atomic number '{number}'"),
            )
        })?;

        rows.push(Row {
            line: ln,
            symbol: symbol.to_string(),
            number,
        });
    }

    let pairs = rows.iter().map(|row| (row.symbol.as_str(), row.number));
    ElementTable::build(pairs, policy).map_err(|err| locate(err, &rows))
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(data, _)| data)
}

/// Attaches the line of the offending row to a table error.
fn locate(err: TableError, rows: &[Row]) -> Error {
    let line = match &err {
        TableError::InvalidSymbol(symbol) => rows
            .iter()
            .find(|row| &row.symbol == symbol)
            .map(|row| row.line),
        TableError::DuplicateSymbol { symbol, .. } => rows
            .iter()
            .filter(|row| &row.symbol == symbol)
            .nth(1)
            .map(|row| row.line),
    };
    match line {
        Some(line) => Error::parse(TableFormat::Text, line, err.to_string()),
        None => Error::Table(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_str(input: &str, policy: DuplicatePolicy) -> Result<ElementTable, Error> {
        read(Cursor::new(input), policy)
    }

    #[test]
    fn reads_two_column_rows() {
        let table = read_str("H 1\nHe\t2\n  Li   3  \n", DuplicatePolicy::KeepFirst).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("He"), Some(2));
        assert_eq!(table.lookup("Li"), Some(3));
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let input = "# periodic table\n\nH 1 # hydrogen\n\n# end\nO 8\n";
        let table = read_str(input, DuplicatePolicy::KeepFirst).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("O"), Some(8));
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = read_str("H 1\nHe\n", DuplicatePolicy::KeepFirst).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = read_str("H 1 extra\n", DuplicatePolicy::KeepFirst).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_numbers() {
        for bad in ["H one", "H -1", "H 99999999999"] {
            let err = read_str(bad, DuplicatePolicy::KeepFirst).unwrap_err();
            match err {
                Error::Parse {
                    format,
                    line,
                    details,
                } => {
                    assert_eq!(format, TableFormat::Text);
                    assert_eq!(line, 1);
                    assert!(details.starts_with("invalid atomic number"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn invalid_symbol_reports_its_line() {
        let err = read_str("H 1\nC4 6\n", DuplicatePolicy::KeepFirst).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn duplicate_handling_follows_policy() {
        let input = "C 6\nN 7\nC 12\n";
        let table = read_str(input, DuplicatePolicy::KeepFirst).unwrap();
        assert_eq!(table.lookup("C"), Some(6));

        let err = read_str(input, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = read_str("", DuplicatePolicy::KeepFirst).unwrap();
        assert!(table.is_empty());
    }
}
