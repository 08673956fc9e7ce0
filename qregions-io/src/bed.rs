use std::fmt::{self, Display};
use std::io::BufRead;

use qregions_core::models::{Position, Region};
use qregions_core::utils::normalize_chrom_name;

/// Number of tab-separated fields a data line needs: chrom, start, end.
pub const MIN_BED_FIELDS: usize = 3;

///
/// One data line of a BED-like interval file.
///
/// Coordinates are kept as read: zero-based `start`, exclusive `end`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub chr: String,
    pub start: Position,
    pub end: Position,
    /// Optional 4th column, used to build `label_tag` sub-labels
    pub tag: Option<String>,
}

impl BedRecord {
    /// Apply the `chr` prefix rule of [`normalize_chrom_name`] in place.
    pub fn normalize_chrom(&mut self) {
        self.chr = normalize_chrom_name(&self.chr);
    }

    /// The inclusive span this record covers. Inverted when `end <= start`, `None` when the
    /// end has no inclusive counterpart.
    pub fn to_region(&self) -> Option<Region> {
        Region::from_half_open(self.chr.clone(), self.start, self.end)
    }
}

/// Why a line could not be turned into a [`BedRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BedLineError {
    TooFewFields(usize),
    InvalidStart(String),
    InvalidEnd(String),
    InvalidUtf8,
}

impl Display for BedLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedLineError::TooFewFields(n) => {
                write!(f, "expected at least {MIN_BED_FIELDS} fields, found {n}")
            }
            BedLineError::InvalidStart(s) => write!(f, "invalid start position {s:?}"),
            BedLineError::InvalidEnd(s) => write!(f, "invalid end position {s:?}"),
            BedLineError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

/// One line of an interval file, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BedLine {
    /// A parsed data line
    Record(BedRecord),
    /// Blank, `#`, `track` or `browser` line
    Comment,
    /// A line that should have been data but isn't
    Malformed { line: String, reason: BedLineError },
}

///
/// Parse one line (without its newline) of a BED-like file.
///
/// ```
/// use qregions_io::{BedLine, parse_bed_line};
///
/// match parse_bed_line("chr1\t15\t25\ttypeA") {
///     BedLine::Record(record) => {
///         assert_eq!((record.start, record.end), (15, 25));
///         assert_eq!(record.tag.as_deref(), Some("typeA"));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn parse_bed_line(line: &str) -> BedLine {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
    {
        return BedLine::Comment;
    }

    let malformed = |reason| BedLine::Malformed {
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_BED_FIELDS {
        return malformed(BedLineError::TooFewFields(fields.len()));
    }

    let start = match fields[1].trim().parse::<Position>() {
        Ok(start) => start,
        Err(_) => return malformed(BedLineError::InvalidStart(fields[1].to_string())),
    };
    let end = match fields[2].trim().parse::<Position>() {
        Ok(end) => end,
        Err(_) => return malformed(BedLineError::InvalidEnd(fields[2].to_string())),
    };

    BedLine::Record(BedRecord {
        chr: fields[0].to_string(),
        start,
        end,
        tag: fields
            .get(3)
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.to_string()),
    })
}

///
/// Iterator over the classified lines of a BED-like file.
///
/// Yields `(line_number, BedLine)` pairs; line numbers start at 1. A line that is not valid
/// UTF-8 comes out as [`BedLine::Malformed`]; read errors end the iteration with an `Err`.
///
pub struct BedReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> BedReader<R> {
    pub fn new(reader: R) -> Self {
        BedReader {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for BedReader<R> {
    type Item = std::io::Result<(usize, BedLine)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line = match std::str::from_utf8(&self.buf) {
                    Ok(line) => parse_bed_line(line),
                    Err(_) => BedLine::Malformed {
                        line: String::from_utf8_lossy(&self.buf)
                            .trim_end_matches(['\r', '\n'])
                            .to_string(),
                        reason: BedLineError::InvalidUtf8,
                    },
                };
                Some(Ok((self.line_number, line)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
