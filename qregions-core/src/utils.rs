use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::errors::{CoreError, Result};

/// Prefix added by [`normalize_chrom_name`].
pub const CHR_PREFIX: &str = "chr";

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = is_gzipped(path);
    let file = File::open(path).map_err(|source| CoreError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
///
/// # Returns
///
/// A `BufReader` object for a given file path or stdin.
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        let file_path = Path::new(file_path_str);
        get_dynamic_reader(file_path)
    }
}

/// Get a writer for a file (gzip-compressed when the name ends in `.gz`) or stdout
///
/// # Arguments
///
/// - file_path: path to the file to write, or '-' for stdout
pub fn get_dynamic_writer_w_stdout(file_path_str: &str) -> Result<BufWriter<Box<dyn Write>>> {
    if file_path_str == "-" {
        return Ok(BufWriter::new(Box::new(std::io::stdout()) as Box<dyn Write>));
    }

    let path = Path::new(file_path_str);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|source| CoreError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    let file: Box<dyn Write> = match is_gzipped(path) {
        true => Box::new(GzEncoder::new(file, Compression::default())),
        false => Box::new(file),
    };

    Ok(BufWriter::new(file))
}

pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Prefix UCSC-style `chr` to Ensembl-style chromosome names.
///
/// Names starting with a digit 1-9, or with `X`, `Y` or `M` get the prefix;
/// everything else (including names already starting with `chr`) is returned unchanged.
///
pub fn normalize_chrom_name(chrom: &str) -> String {
    match chrom.as_bytes().first() {
        Some(b'1'..=b'9' | b'X' | b'Y' | b'M') => format!("{CHR_PREFIX}{chrom}"),
        _ => chrom.to_string(),
    }
}

///
/// Derive a label from a file name: drop a trailing `.gz`, then the last extension.
///
/// `fp.bed.gz` and `fp.bed` both give `fp`.
///
pub fn file_label_stem(path: &Path) -> String {
    let path = if is_gzipped(path) {
        path.with_extension("")
    } else {
        path.to_path_buf()
    };

    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::BufRead;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1", "chr1")]
    #[case("22", "chr22")]
    #[case("X", "chrX")]
    #[case("Y", "chrY")]
    #[case("MT", "chrMT")]
    #[case("chrX", "chrX")]
    #[case("chr1", "chr1")]
    #[case("0", "0")]
    #[case("GL000192.1", "GL000192.1")]
    #[case("", "")]
    fn test_normalize_chrom_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_chrom_name(input), expected);
    }

    #[rstest]
    #[case("FP.bed", "FP")]
    #[case("/data/fp.bed.gz", "fp")]
    #[case("regions/conf", "conf")]
    #[case("tier1.v2.bed", "tier1.v2")]
    fn test_file_label_stem(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(file_label_stem(&PathBuf::from(input)), expected);
    }

    #[rstest]
    fn test_round_trip_through_gz_writer() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out/regions.bed.gz");
        {
            let mut writer = get_dynamic_writer_w_stdout(path.to_str().unwrap()).unwrap();
            writeln!(writer, "chr1\t10\t20").unwrap();
            writer.flush().unwrap();
        }

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["chr1\t10\t20".to_string()]);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = get_dynamic_reader(Path::new("/definitely/not/here.bed"));
        assert!(matches!(result, Err(CoreError::FileOpen { .. })));
    }
}
