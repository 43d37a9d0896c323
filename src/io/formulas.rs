use std::io::BufRead;

use super::Error;

/// One whitespace-delimited formula and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaRecord {
    /// 1-based position of the formula in the input.
    pub index: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based byte column of the formula's first character.
    pub column: usize,
    pub text: String,
}

/// Iterator over the formulas of a text stream.
///
/// Lines are read lazily; a read failure is yielded once and then ends the
/// iteration.
pub struct FormulaReader<R> {
    reader: R,
    line: usize,
    index: usize,
    pending: std::vec::IntoIter<FormulaRecord>,
    done: bool,
}

impl<R: BufRead> FormulaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            index: 0,
            pending: Vec::new().into_iter(),
            done: false,
        }
    }

    /// Collects every remaining formula, stopping at the first read error.
    pub fn read_all(self) -> Result<Vec<FormulaRecord>, Error> {
        self.collect()
    }

    fn fill(&mut self) -> Result<bool, Error> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;

            let start = buf.as_ptr() as usize;
            let records: Vec<_> = buf
                .split_whitespace()
                .map(|word| {
                    self.index += 1;
                    FormulaRecord {
                        index: self.index,
                        line: self.line,
                        column: word.as_ptr() as usize - start + 1,
                        text: word.to_string(),
                    }
                })
                .collect();

            if !records.is_empty() {
                self.pending = records.into_iter();
                return Ok(true);
            }
        }
    }
}

impl<R: BufRead> Iterator for FormulaReader<R> {
    type Item = Result<FormulaRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(record) = self.pending.next() {
            return Some(Ok(record));
        }
        if self.done {
            return None;
        }
        match self.fill() {
            Ok(true) => self.pending.next().map(Ok),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn texts(input: &str) -> Vec<String> {
        FormulaReader::new(Cursor::new(input))
            .map(|r| r.unwrap().text)
            .collect()
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            texts("H2O NaCl\n\tCa3(PO4)2   Mg(OH)2\r\n"),
            ["H2O", "NaCl", "Ca3(PO4)2", "Mg(OH)2"]
        );
    }

    #[test]
    fn empty_and_blank_inputs_yield_nothing() {
        assert!(texts("").is_empty());
        assert!(texts("\n   \n\t\n").is_empty());
    }

    #[test]
    fn records_track_location() {
        let records = FormulaReader::new(Cursor::new("H2O  NaCl\n\n  KCl\n"))
            .read_all()
            .unwrap();
        let located: Vec<_> = records
            .iter()
            .map(|r| (r.index, r.line, r.column, r.text.as_str()))
            .collect();
        assert_eq!(
            located,
            [(1, 1, 1, "H2O"), (2, 1, 6, "NaCl"), (3, 3, 3, "KCl")]
        );
    }

    #[test]
    fn last_line_without_newline_is_read() {
        assert_eq!(texts("H2\nO2"), ["H2", "O2"]);
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn read_error_is_yielded_once() {
        let mut reader = FormulaReader::new(io::BufReader::new(Failing));
        assert!(matches!(reader.next(), Some(Err(Error::Io { .. }))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let bytes: &[u8] = b"H2O\n\xff\xfe\n";
        let result = FormulaReader::new(bytes).read_all();
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
