//! Plain-text VCF reading and writing.
//!
//! Reads a VCF file (plain text or gzipped/bgzf, via
//! [`get_dynamic_reader_w_stdin`](qregions_core::utils::get_dynamic_reader_w_stdin)), keeps the
//! header lines as they are, and exposes each data line as a [`VcfRecord`] whose INFO column can
//! be edited before the line is written back out.

use std::fmt::{self, Display};
use std::io::{BufRead, Write};

use qregions_core::models::Position;
use qregions_core::traits::VariantRecord;

use crate::error::{RegionIoError, Result};

/// INFO key that carries the region annotation.
pub const REGIONS_INFO_KEY: &str = "Regions";

/// Header line declaring [`REGIONS_INFO_KEY`].
pub const REGIONS_INFO_HEADER: &str =
    "##INFO=<ID=Regions,Number=.,Type=String,Description=\"Tags for regions.\">";

const CHROM_COL: usize = 0;
const POS_COL: usize = 1;
const REF_COL: usize = 3;
const INFO_COL: usize = 7;
const MIN_VCF_COLUMNS: usize = 8;

///
/// The `##` meta lines and the `#CHROM` column line of a VCF file.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcfHeader {
    pub lines: Vec<String>,
}

impl VcfHeader {
    /// True if an `##INFO=<ID=<id>,...>` line is present.
    pub fn has_info(&self, id: &str) -> bool {
        let prefix = format!("##INFO=<ID={id},");
        self.lines.iter().any(|line| line.starts_with(&prefix))
    }

    ///
    /// Add a meta line right before the `#CHROM` line (or at the end if there is none).
    ///
    pub fn insert_meta(&mut self, meta: impl Into<String>) {
        let at = self
            .lines
            .iter()
            .position(|line| line.starts_with("#CHROM"))
            .unwrap_or(self.lines.len());
        self.lines.insert(at, meta.into());
    }

    /// Declare the `Regions` INFO key unless it is already declared.
    pub fn ensure_regions_info(&mut self) {
        if !self.has_info(REGIONS_INFO_KEY) {
            self.insert_meta(REGIONS_INFO_HEADER);
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

///
/// One VCF data line, split into its tab-separated columns.
///
/// ```
/// use qregions_core::VariantRecord;
/// use qregions_io::VcfRecord;
///
/// let mut record: VcfRecord = "chr1\t19\t.\tA\tG\t.\tPASS\tDP=10".parse().unwrap();
/// assert_eq!(record.ref_span(), (18, 18));
///
/// record.set_regions(Some("CONF,FP"));
/// assert_eq!(record.to_string(), "chr1\t19\t.\tA\tG\t.\tPASS\tDP=10;Regions=CONF,FP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfRecord {
    columns: Vec<String>,
    pos: Position,
}

impl VcfRecord {
    /// Parse a data line; `line_number` is only used for error messages.
    pub fn parse(line: &str, line_number: usize) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let columns: Vec<String> = line.split('\t').map(String::from).collect();
        if columns.len() < MIN_VCF_COLUMNS {
            return Err(RegionIoError::MalformedVcfLine {
                line_number,
                reason: format!(
                    "expected at least {MIN_VCF_COLUMNS} columns, found {}",
                    columns.len()
                ),
            });
        }

        let pos = match columns[POS_COL].parse::<Position>() {
            Ok(pos) if pos >= 1 => pos,
            _ => {
                return Err(RegionIoError::MalformedVcfLine {
                    line_number,
                    reason: format!("invalid POS {:?}", columns[POS_COL]),
                });
            }
        };

        Ok(VcfRecord { columns, pos })
    }

    /// One-based POS column
    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn reference(&self) -> &str {
        &self.columns[REF_COL]
    }

    pub fn info_column(&self) -> &str {
        &self.columns[INFO_COL]
    }

    ///
    /// Value of an INFO key. Flags (keys without `=`) give `Some("")`.
    ///
    pub fn info(&self, key: &str) -> Option<&str> {
        self.info_column()
            .split(';')
            .filter(|entry| !entry.is_empty() && *entry != ".")
            .find_map(|entry| match entry.split_once('=') {
                Some((k, v)) if k == key => Some(v),
                None if entry == key => Some(""),
                _ => None,
            })
    }

    ///
    /// Replace, add, or (with `None`) remove an INFO key. An INFO column left empty becomes `.`.
    ///
    pub fn set_info(&mut self, key: &str, value: Option<&str>) {
        let mut entries: Vec<String> = self
            .info_column()
            .split(';')
            .filter(|entry| !entry.is_empty() && *entry != ".")
            .filter(|entry| entry.split_once('=').map_or(*entry, |(k, _)| k) != key)
            .map(String::from)
            .collect();

        if let Some(value) = value {
            entries.push(format!("{key}={value}"));
        }

        self.columns[INFO_COL] = if entries.is_empty() {
            ".".to_string()
        } else {
            entries.join(";")
        };
    }

    /// Number of reference bases covered: `INFO/END - (POS - 1)` when END is present and
    /// parseable, otherwise the length of REF. Never less than 1.
    pub fn rlen(&self) -> Position {
        let start = self.pos - 1;
        let rlen = self
            .info("END")
            .and_then(|end| end.parse::<Position>().ok())
            .and_then(|end| end.checked_sub(start))
            .unwrap_or(self.reference().len() as Position);
        rlen.max(1)
    }
}

impl std::str::FromStr for VcfRecord {
    type Err = RegionIoError;

    fn from_str(s: &str) -> Result<Self> {
        VcfRecord::parse(s, 0)
    }
}

impl Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.join("\t"))
    }
}

impl VariantRecord for VcfRecord {
    fn chrom(&self) -> &str {
        &self.columns[CHROM_COL]
    }

    fn ref_span(&self) -> (Position, Position) {
        let start = self.pos - 1;
        (start, start.saturating_add(self.rlen() - 1))
    }

    fn set_regions(&mut self, regions: Option<&str>) {
        self.set_info(REGIONS_INFO_KEY, regions);
    }
}

///
/// Streaming VCF reader: the header is read on construction, records on iteration.
///
pub struct VcfReader<R> {
    reader: R,
    header: VcfHeader,
    /// First data line, read while looking for the end of the header
    pending: Option<(usize, String)>,
    buf: String,
    line_number: usize,
}

impl<R: BufRead> VcfReader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let mut header = VcfHeader::default();
        let mut pending = None;
        let mut line_number = 0;
        let mut buf = String::new();

        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            line_number += 1;
            let line = buf.trim_end_matches(['\r', '\n']);
            if line.starts_with('#') {
                header.lines.push(line.to_string());
            } else {
                pending = Some((line_number, line.to_string()));
                break;
            }
        }

        Ok(VcfReader {
            reader,
            header,
            pending,
            buf,
            line_number,
        })
    }

    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut VcfHeader {
        &mut self.header
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VcfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_number, line) = match self.pending.take() {
                Some(pending) => pending,
                None => {
                    self.buf.clear();
                    match self.reader.read_line(&mut self.buf) {
                        Ok(0) => return None,
                        Ok(_) => {
                            self.line_number += 1;
                            (self.line_number, self.buf.clone())
                        }
                        Err(e) => return Some(Err(e.into())),
                    }
                }
            };

            if line.trim().is_empty() {
                continue;
            }
            return Some(VcfRecord::parse(&line, line_number));
        }
    }
}
