use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use qregions::{LoadOptions, QuantifyRegions};

pub fn run_sizes(matches: &ArgMatches) -> Result<()> {
    let specs: Vec<&String> = matches
        .get_many::<String>("regions")
        .context("At least one region file is required.")?
        .collect();
    let options = LoadOptions {
        fix_chr: matches.get_flag("fixchr"),
    };

    let mut regions = QuantifyRegions::new();
    regions.load(&specs, &options)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_sizes(&regions, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// One `label<TAB>size` line per label, in the order labels were first seen.
pub fn write_sizes<W: Write>(regions: &QuantifyRegions, writer: &mut W) -> io::Result<()> {
    for (label, size) in regions.region_sizes() {
        writeln!(writer, "{label}\t{size}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_write_sizes() {
        let tempdir = tempfile::tempdir().unwrap();
        let fp = tempdir.path().join("FP.bed");
        std::fs::write(&fp, "chr1\t15\t25\ttypeA\nchr1\t40\t41\n").unwrap();

        let mut regions = QuantifyRegions::new();
        regions
            .load(&[fp.display().to_string()], &LoadOptions::default())
            .unwrap();

        let mut out = Vec::new();
        write_sizes(&regions, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "FP\t11\nFP_typeA\t10\n");
    }
}
